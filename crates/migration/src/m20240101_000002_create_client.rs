//! Create `client` table.
//!
//! No FK to `colorist`: parent existence is checked by the service layer,
//! the same way the parent's `clients` array is maintained there.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Client::Table)
                    .if_not_exists()
                    .col(uuid(Client::Id).primary_key())
                    .col(uuid(Client::ColoristId).not_null())
                    .col(string_len(Client::Name, 50).not_null())
                    .col(string_len(Client::LastName, 50).not_null())
                    .col(ColumnDef::new(Client::Email).string_len(254).null())
                    .col(ColumnDef::new(Client::PhoneNumber).string_len(20).null())
                    .col(
                        ColumnDef::new(Client::Sheets)
                            .array(ColumnType::Uuid)
                            .not_null()
                            .default(Expr::cust("'{}'::uuid[]")),
                    )
                    .col(integer(Client::Version).default(0))
                    .col(timestamp_with_time_zone(Client::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp_with_time_zone(Client::UpdatedAt).default(Expr::current_timestamp()))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Client::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Client {
    Table,
    Id,
    ColoristId,
    Name,
    LastName,
    Email,
    PhoneNumber,
    Sheets,
    Version,
    CreatedAt,
    UpdatedAt,
}
