//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.
//! Writes go through the transaction-bound repositories of the Unit of Work.

mod account_repository;
mod appointment_repository;
pub(crate) mod entities;
mod profile_repository;
mod role_store;

pub use account_repository::{AccountRepository, AccountStore};
pub use appointment_repository::{AppointmentRepository, AppointmentStore};
pub(crate) use appointment_repository::party_column;
pub use profile_repository::{ProfileRepository, ProfileStore};
pub use role_store::{RoleStore, RoleUpdate};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use account_repository::MockAccountRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use appointment_repository::MockAppointmentRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use profile_repository::MockProfileRepository;
