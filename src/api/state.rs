//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::Database;
use crate::notifications::NotificationDispatcher;
use crate::services::{
    AuthService, DirectoryService, EnrollmentService, OffboardingService, ServiceContainer,
    Services,
};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Token verification
    pub auth_service: Arc<dyn AuthService>,
    /// Profile offboarding
    pub offboarding_service: Arc<dyn OffboardingService>,
    /// Profile enrollment
    pub enrollment_service: Arc<dyn EnrollmentService>,
    /// Read-only lookups
    pub directory_service: Arc<dyn DirectoryService>,
    /// Database connection
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state from database connection and config.
    pub fn from_config(
        database: Arc<Database>,
        config: Config,
        dispatcher: Arc<dyn NotificationDispatcher>,
    ) -> Self {
        let container = Services::from_connection(database.get_connection(), config, dispatcher);
        Self::new(&container, database)
    }

    /// Create application state from any service container.
    pub fn new(container: &dyn ServiceContainer, database: Arc<Database>) -> Self {
        Self {
            auth_service: container.auth(),
            offboarding_service: container.offboarding(),
            enrollment_service: container.enrollment(),
            directory_service: container.directory(),
            database,
        }
    }
}
