//! Create `sheet` table (a dated color formula card for one client).
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Sheet::Table)
                    .if_not_exists()
                    .col(uuid(Sheet::Id).primary_key())
                    .col(uuid(Sheet::ColoristId).not_null())
                    .col(uuid(Sheet::ClientId).not_null())
                    .col(string_len(Sheet::Date, 10).not_null())
                    .col(
                        ColumnDef::new(Sheet::HairServices)
                            .array(ColumnType::Uuid)
                            .not_null()
                            .default(Expr::cust("'{}'::uuid[]")),
                    )
                    .col(integer(Sheet::Version).default(0))
                    .col(timestamp_with_time_zone(Sheet::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp_with_time_zone(Sheet::UpdatedAt).default(Expr::current_timestamp()))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Sheet::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Sheet {
    Table,
    Id,
    ColoristId,
    ClientId,
    Date,
    HairServices,
    Version,
    CreatedAt,
    UpdatedAt,
}
