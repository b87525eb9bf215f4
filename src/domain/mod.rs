//! Domain layer - Core business entities and logic
//!
//! This module contains the core domain models that represent
//! clinic concepts independent of infrastructure concerns.
//!
//! Contains: accounts and roles, clinical profiles, appointments,
//! and the value objects exchanged by the offboarding workflow.

pub mod account;
pub mod appointment;
pub mod offboarding;
pub mod profile;

pub use account::{Account, Role, RoleAssignable};
pub use appointment::{Appointment, AppointmentKind, AppointmentStatus, CanceledBy};
pub use offboarding::{Actor, CancellationNotice, OffboardingReport, Recipient};
pub use profile::{Profile, ProfileDetails, ProfileKind, ProfileRef, ProfileStatus};
