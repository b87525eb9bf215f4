//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod account;
pub mod appointment;
pub mod patient;
pub mod specialist;

pub use account::Entity as AccountEntity;
pub use appointment::Entity as AppointmentEntity;
pub use patient::Entity as PatientEntity;
pub use specialist::Entity as SpecialistEntity;
