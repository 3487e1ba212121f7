//! Create shifts table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Shifts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Shifts::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Shifts::Date).date().not_null())
                    .col(ColumnDef::new(Shifts::StartTime).time().not_null())
                    .col(ColumnDef::new(Shifts::EndTime).time().not_null())
                    .col(ColumnDef::new(Shifts::Role).string().not_null())
                    .col(
                        ColumnDef::new(Shifts::Location)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Shifts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_shifts_date")
                    .table(Shifts::Table)
                    .col(Shifts::Date)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Shifts::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Shifts {
    Table,
    Id,
    Date,
    StartTime,
    EndTime,
    Role,
    Location,
    CreatedAt,
}
