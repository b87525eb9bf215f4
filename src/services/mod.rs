//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.
//!
//! Multi-step writes run inside a single Unit of Work transaction.

mod auth_service;
pub mod container;
mod directory_service;
mod enrollment_service;
mod offboarding_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use auth_service::{AuthService, Authenticator, Claims};
pub use directory_service::{AccountOverview, Directory, DirectoryService};
pub use enrollment_service::{EnrollmentService, Registrar};
pub use offboarding_service::{Offboarder, OffboardingService};

#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
