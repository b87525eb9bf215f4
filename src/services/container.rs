//! Service Container - Centralized service access.
//!
//! Handlers and commands depend on the service traits only; the container
//! wires them to the Unit of Work and the notification dispatcher.

use std::sync::Arc;

use super::{
    AuthService, Authenticator, Directory, DirectoryService, EnrollmentService, Offboarder,
    OffboardingService, Registrar,
};
use crate::config::Config;
use crate::infra::Persistence;
use crate::notifications::NotificationDispatcher;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    /// Get authentication service
    fn auth(&self) -> Arc<dyn AuthService>;

    /// Get offboarding service
    fn offboarding(&self) -> Arc<dyn OffboardingService>;

    /// Get enrollment service
    fn enrollment(&self) -> Arc<dyn EnrollmentService>;

    /// Get directory service
    fn directory(&self) -> Arc<dyn DirectoryService>;
}

/// Concrete implementation of ServiceContainer
#[derive(Clone)]
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    offboarding_service: Arc<dyn OffboardingService>,
    enrollment_service: Arc<dyn EnrollmentService>,
    directory_service: Arc<dyn DirectoryService>,
}

impl Services {
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        offboarding_service: Arc<dyn OffboardingService>,
        enrollment_service: Arc<dyn EnrollmentService>,
        directory_service: Arc<dyn DirectoryService>,
    ) -> Self {
        Self {
            auth_service,
            offboarding_service,
            enrollment_service,
            directory_service,
        }
    }

    /// Create service container from database connection, config and dispatcher
    pub fn from_connection(
        db: sea_orm::DatabaseConnection,
        config: Config,
        dispatcher: Arc<dyn NotificationDispatcher>,
    ) -> Self {
        let uow = Arc::new(Persistence::new(db));

        Self {
            auth_service: Arc::new(Authenticator::new(config)),
            offboarding_service: Arc::new(Offboarder::new(uow.clone(), dispatcher)),
            enrollment_service: Arc::new(Registrar::new(uow.clone())),
            directory_service: Arc::new(Directory::new(uow)),
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn offboarding(&self) -> Arc<dyn OffboardingService> {
        self.offboarding_service.clone()
    }

    fn enrollment(&self) -> Arc<dyn EnrollmentService> {
        self.enrollment_service.clone()
    }

    fn directory(&self) -> Arc<dyn DirectoryService> {
        self.directory_service.clone()
    }
}
