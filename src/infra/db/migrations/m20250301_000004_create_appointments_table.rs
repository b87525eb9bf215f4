//! Migration: Create appointments table.
//!
//! One `specialist_id` column carries the specialist link; there is no
//! secondary column for the same relationship.

use sea_orm_migration::prelude::*;

use super::m20250301_000002_create_specialists_table::Specialists;
use super::m20250301_000003_create_patients_table::Patients;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Appointments::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Appointments::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Appointments::PatientId).uuid().null())
                    .col(ColumnDef::new(Appointments::SpecialistId).uuid().null())
                    .col(
                        ColumnDef::new(Appointments::ScheduledAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Appointments::Kind)
                            .string_len(16)
                            .not_null()
                            .default("in_person"),
                    )
                    .col(
                        ColumnDef::new(Appointments::Status)
                            .string_len(16)
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(Appointments::Comment).text().null())
                    .col(
                        ColumnDef::new(Appointments::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Appointments::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Appointments::DeletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    // History outlives the profiles it references
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_appointments_patient")
                            .from(Appointments::Table, Appointments::PatientId)
                            .to(Patients::Table, Patients::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_appointments_specialist")
                            .from(Appointments::Table, Appointments::SpecialistId)
                            .to(Specialists::Table, Specialists::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_appointments_patient_scheduled")
                    .table(Appointments::Table)
                    .col(Appointments::PatientId)
                    .col(Appointments::ScheduledAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_appointments_specialist_scheduled")
                    .table(Appointments::Table)
                    .col(Appointments::SpecialistId)
                    .col(Appointments::ScheduledAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Appointments::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Appointments {
    Table,
    Id,
    PatientId,
    SpecialistId,
    ScheduledAt,
    Kind,
    Status,
    Comment,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}
