//! Migration: Create specialists table.

use sea_orm_migration::prelude::*;

use super::m20250301_000001_create_accounts_table::Accounts;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Specialists::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Specialists::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Specialists::AccountId).uuid().null())
                    .col(ColumnDef::new(Specialists::Specialty).string().null())
                    .col(ColumnDef::new(Specialists::AdmittedOn).date().not_null())
                    .col(ColumnDef::new(Specialists::DischargedOn).date().null())
                    .col(
                        ColumnDef::new(Specialists::Status)
                            .string_len(16)
                            .not_null()
                            .default("active"),
                    )
                    .col(
                        ColumnDef::new(Specialists::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Specialists::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    // Offboarding removes the profile, never the account
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_specialists_account")
                            .from(Specialists::Table, Specialists::AccountId)
                            .to(Accounts::Table, Accounts::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_specialists_account_id")
                    .table(Specialists::Table)
                    .col(Specialists::AccountId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Specialists::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Specialists {
    Table,
    Id,
    AccountId,
    Specialty,
    AdmittedOn,
    DischargedOn,
    Status,
    CreatedAt,
    UpdatedAt,
}
