//! Read access to appointments.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use super::entities::appointment::{self, Entity as AppointmentEntity};
use crate::domain::{Appointment, ProfileKind, ProfileRef};
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    /// Find appointment by ID including soft-deleted
    async fn find_by_id_with_deleted(&self, id: Uuid) -> AppResult<Option<Appointment>>;

    /// Active appointments of a profile, oldest first
    async fn list_for_profile(&self, profile: ProfileRef) -> AppResult<Vec<Appointment>>;
}

pub struct AppointmentStore {
    db: DatabaseConnection,
}

impl AppointmentStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Column holding the given side of an appointment
pub(crate) fn party_column(kind: ProfileKind) -> appointment::Column {
    match kind {
        ProfileKind::Patient => appointment::Column::PatientId,
        ProfileKind::Specialist => appointment::Column::SpecialistId,
    }
}

#[async_trait]
impl AppointmentRepository for AppointmentStore {
    async fn find_by_id_with_deleted(&self, id: Uuid) -> AppResult<Option<Appointment>> {
        let result = AppointmentEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(Appointment::from))
    }

    async fn list_for_profile(&self, profile: ProfileRef) -> AppResult<Vec<Appointment>> {
        let models = AppointmentEntity::find()
            .filter(party_column(profile.kind).eq(profile.id))
            .filter(appointment::Column::DeletedAt.is_null())
            .order_by_asc(appointment::Column::ScheduledAt)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Appointment::from).collect())
    }
}
