//! Patient profile entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{Profile, ProfileDetails, ProfileStatus};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "patients")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// NULL once the linked account row is removed
    pub account_id: Option<Uuid>,
    /// Assigned specialist
    pub specialist_id: Option<Uuid>,
    pub admitted_on: Date,
    pub discharged_on: Option<Date>,
    pub status: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Profile {
    fn from(model: Model) -> Self {
        Profile {
            id: model.id,
            account_id: model.account_id,
            admitted_on: model.admitted_on,
            discharged_on: model.discharged_on,
            status: ProfileStatus::from(model.status.as_str()),
            details: ProfileDetails::Patient {
                specialist_id: model.specialist_id,
            },
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
