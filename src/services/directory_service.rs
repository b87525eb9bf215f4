//! Directory service - Read-only lookups for the admin surface.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{Account, Appointment, Profile, ProfileRef};
use crate::errors::{AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// Account together with the clinical profiles attached to it
#[derive(Debug, Clone, Serialize)]
pub struct AccountOverview {
    pub account: Account,
    pub profiles: Vec<Profile>,
}

/// Directory service trait for dependency injection.
///
/// Soft-deleted accounts and appointments are excluded.
#[async_trait]
pub trait DirectoryService: Send + Sync {
    /// Active account by ID with its profiles
    async fn get_account(&self, id: Uuid) -> AppResult<AccountOverview>;

    /// Profile by reference
    async fn get_profile(&self, profile: ProfileRef) -> AppResult<Profile>;

    /// Appointments of an existing profile, oldest first
    async fn appointments_of(&self, profile: ProfileRef) -> AppResult<Vec<Appointment>>;
}

/// Concrete implementation of DirectoryService using Unit of Work.
pub struct Directory<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> Directory<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> DirectoryService for Directory<U> {
    async fn get_account(&self, id: Uuid) -> AppResult<AccountOverview> {
        let account = self
            .uow
            .accounts()
            .find_by_id(id)
            .await?
            .ok_or_not_found()?;
        let profiles = self.uow.profiles().list_for_account(id).await?;

        Ok(AccountOverview { account, profiles })
    }

    async fn get_profile(&self, profile: ProfileRef) -> AppResult<Profile> {
        self.uow
            .profiles()
            .find(profile)
            .await?
            .ok_or_not_found()
    }

    async fn appointments_of(&self, profile: ProfileRef) -> AppResult<Vec<Appointment>> {
        self.get_profile(profile).await?;
        self.uow.appointments().list_for_profile(profile).await
    }
}
