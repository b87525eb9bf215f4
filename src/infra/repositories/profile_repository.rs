//! Read access to patient and specialist profiles.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use uuid::Uuid;

use super::entities::{patient, specialist, PatientEntity, SpecialistEntity};
use crate::domain::{Profile, ProfileKind, ProfileRef};
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Find a profile by typed reference
    async fn find(&self, profile: ProfileRef) -> AppResult<Option<Profile>>;

    /// All profiles (of either kind) attached to an account
    async fn list_for_account(&self, account_id: Uuid) -> AppResult<Vec<Profile>>;
}

pub struct ProfileStore {
    db: DatabaseConnection,
}

impl ProfileStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProfileRepository for ProfileStore {
    async fn find(&self, profile: ProfileRef) -> AppResult<Option<Profile>> {
        let found = match profile.kind {
            ProfileKind::Patient => PatientEntity::find_by_id(profile.id)
                .one(&self.db)
                .await?
                .map(Profile::from),
            ProfileKind::Specialist => SpecialistEntity::find_by_id(profile.id)
                .one(&self.db)
                .await?
                .map(Profile::from),
        };
        Ok(found)
    }

    async fn list_for_account(&self, account_id: Uuid) -> AppResult<Vec<Profile>> {
        let mut profiles: Vec<Profile> = PatientEntity::find()
            .filter(patient::Column::AccountId.eq(account_id))
            .all(&self.db)
            .await?
            .into_iter()
            .map(Profile::from)
            .collect();

        profiles.extend(
            SpecialistEntity::find()
                .filter(specialist::Column::AccountId.eq(account_id))
                .all(&self.db)
                .await?
                .into_iter()
                .map(Profile::from),
        );

        Ok(profiles)
    }
}
