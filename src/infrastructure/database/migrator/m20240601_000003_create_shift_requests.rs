//! Create shift_requests table
//!
//! Status lifecycle: pending -> approved | rejected. Rows are never deleted,
//! so both foreign keys restrict deletion of the referenced user / shift.

use sea_orm_migration::prelude::*;

use super::m20240601_000001_create_users::Users;
use super::m20240601_000002_create_shifts::Shifts;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ShiftRequests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ShiftRequests::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ShiftRequests::UserId).integer().not_null())
                    .col(ColumnDef::new(ShiftRequests::ShiftId).integer().not_null())
                    .col(
                        ColumnDef::new(ShiftRequests::Status)
                            .string_len(20)
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(ShiftRequests::RequestedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ShiftRequests::ApprovedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_shift_requests_user")
                            .from(ShiftRequests::Table, ShiftRequests::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_shift_requests_shift")
                            .from(ShiftRequests::Table, ShiftRequests::ShiftId)
                            .to(Shifts::Table, Shifts::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        for (name, col) in [
            ("idx_shift_requests_status", ShiftRequests::Status),
            ("idx_shift_requests_user", ShiftRequests::UserId),
            ("idx_shift_requests_shift", ShiftRequests::ShiftId),
        ] {
            manager
                .create_index(
                    Index::create()
                        .name(name)
                        .table(ShiftRequests::Table)
                        .col(col)
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ShiftRequests::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum ShiftRequests {
    Table,
    Id,
    UserId,
    ShiftId,
    Status,
    RequestedAt,
    ApprovedAt,
}
