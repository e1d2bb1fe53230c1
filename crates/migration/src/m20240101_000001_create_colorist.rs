//! Create `colorist` table.
//!
//! `clients` is the denormalised list of owned client ids.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Colorist::Table)
                    .if_not_exists()
                    .col(uuid(Colorist::Id).primary_key())
                    .col(string_len(Colorist::Email, 254).unique_key().not_null())
                    .col(string_len(Colorist::Username, 30).unique_key().not_null())
                    .col(string_len(Colorist::Name, 50).not_null())
                    .col(string_len(Colorist::LastName, 50).not_null())
                    .col(ColumnDef::new(Colorist::HairSalonName).string_len(50).null())
                    .col(string_len(Colorist::PasswordHash, 255).not_null())
                    .col(
                        ColumnDef::new(Colorist::Clients)
                            .array(ColumnType::Uuid)
                            .not_null()
                            .default(Expr::cust("'{}'::uuid[]")),
                    )
                    .col(integer(Colorist::Version).default(0))
                    .col(timestamp_with_time_zone(Colorist::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp_with_time_zone(Colorist::UpdatedAt).default(Expr::current_timestamp()))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Colorist::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Colorist {
    Table,
    Id,
    Email,
    Username,
    Name,
    LastName,
    HairSalonName,
    PasswordHash,
    Clients,
    Version,
    CreatedAt,
    UpdatedAt,
}
