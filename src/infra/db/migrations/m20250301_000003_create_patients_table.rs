//! Migration: Create patients table.

use sea_orm_migration::prelude::*;

use super::m20250301_000001_create_accounts_table::Accounts;
use super::m20250301_000002_create_specialists_table::Specialists;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Patients::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Patients::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Patients::AccountId).uuid().null())
                    .col(ColumnDef::new(Patients::SpecialistId).uuid().null())
                    .col(ColumnDef::new(Patients::AdmittedOn).date().not_null())
                    .col(ColumnDef::new(Patients::DischargedOn).date().null())
                    .col(
                        ColumnDef::new(Patients::Status)
                            .string_len(16)
                            .not_null()
                            .default("active"),
                    )
                    .col(
                        ColumnDef::new(Patients::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Patients::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_patients_account")
                            .from(Patients::Table, Patients::AccountId)
                            .to(Accounts::Table, Accounts::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_patients_specialist")
                            .from(Patients::Table, Patients::SpecialistId)
                            .to(Specialists::Table, Specialists::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_patients_account_id")
                    .table(Patients::Table)
                    .col(Patients::AccountId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Patients::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Patients {
    Table,
    Id,
    AccountId,
    SpecialistId,
    AdmittedOn,
    DischargedOn,
    Status,
    CreatedAt,
    UpdatedAt,
}
