//! Create `hair_service` table. Ingredients are embedded as `jsonb`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(HairService::Table)
                    .if_not_exists()
                    .col(uuid(HairService::Id).primary_key())
                    .col(uuid(HairService::ColoristId).not_null())
                    .col(uuid(HairService::ClientId).not_null())
                    .col(uuid(HairService::SheetId).not_null())
                    .col(string_len(HairService::Name, 50).not_null())
                    .col(ColumnDef::new(HairService::Observations).string_len(500).null())
                    .col(json_binary(HairService::Ingredients).default(Expr::cust("'[]'::jsonb")))
                    .col(integer(HairService::Version).default(0))
                    .col(timestamp_with_time_zone(HairService::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp_with_time_zone(HairService::UpdatedAt).default(Expr::current_timestamp()))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(HairService::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum HairService {
    Table,
    Id,
    ColoristId,
    ClientId,
    SheetId,
    Name,
    Observations,
    Ingredients,
    Version,
    CreatedAt,
    UpdatedAt,
}
