//! Clinic API - staff administration for a clinic.
//!
//! The heart of the crate is the offboarding workflow: retiring a patient
//! or specialist demotes the linked account, removes the profile and its
//! appointments in one transaction, and queues a cancellation email for
//! every counterpart once that transaction has committed.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Accounts, profiles, appointments and offboarding values
//! - **services**: Offboarding, enrollment and lookups
//! - **infra**: Database, migrations, repositories, Unit of Work
//! - **notifications**: Cancellation notices and their dispatch
//! - **jobs**: Email job payload and worker handler
//! - **api**: HTTP handlers, middleware, and routes
//! - **types**: Shared response types
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! clinic-api migrate up
//! clinic-api serve
//! clinic-api jobs work
//! clinic-api offboard specialist <PROFILE_ID> --actor <ADMIN_ID>
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod jobs;
pub mod notifications;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Account, Actor, OffboardingReport, ProfileKind, ProfileRef, Role};
pub use errors::{AppError, AppResult};
