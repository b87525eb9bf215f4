//! Appointment entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{Appointment, AppointmentKind, AppointmentStatus};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "appointments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub patient_id: Option<Uuid>,
    pub specialist_id: Option<Uuid>,
    pub scheduled_at: DateTimeUtc,
    pub kind: String,
    pub status: String,
    pub comment: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    /// Soft delete timestamp (NULL = active, set = deleted)
    pub deleted_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Appointment {
    fn from(model: Model) -> Self {
        Appointment {
            id: model.id,
            patient_id: model.patient_id,
            specialist_id: model.specialist_id,
            scheduled_at: model.scheduled_at,
            kind: AppointmentKind::from(model.kind.as_str()),
            status: AppointmentStatus::from(model.status.as_str()),
            comment: model.comment,
            created_at: model.created_at,
            updated_at: model.updated_at,
            deleted_at: model.deleted_at,
        }
    }
}
