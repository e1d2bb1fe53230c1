use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Client: every read is scoped by colorist
        manager
            .create_index(
                Index::create()
                    .name("idx_client_colorist")
                    .table(Client::Table)
                    .col(Client::ColoristId)
                    .to_owned(),
            )
            .await?;

        // Sheet: listed per client, cascaded per colorist
        manager
            .create_index(
                Index::create()
                    .name("idx_sheet_colorist_client")
                    .table(Sheet::Table)
                    .col(Sheet::ColoristId)
                    .col(Sheet::ClientId)
                    .to_owned(),
            )
            .await?;

        // HairService: listed per sheet, moved per client
        manager
            .create_index(
                Index::create()
                    .name("idx_hair_service_colorist_sheet")
                    .table(HairService::Table)
                    .col(HairService::ColoristId)
                    .col(HairService::SheetId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_hair_service_client")
                    .table(HairService::Table)
                    .col(HairService::ClientId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, table) in [
            ("idx_hair_service_client", HairService::Table.into_iden()),
            ("idx_hair_service_colorist_sheet", HairService::Table.into_iden()),
            ("idx_sheet_colorist_client", Sheet::Table.into_iden()),
            ("idx_client_colorist", Client::Table.into_iden()),
        ] {
            manager
                .drop_index(Index::drop().name(name).table(table).to_owned())
                .await?;
        }
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Client { Table, ColoristId }

#[derive(DeriveIden)]
enum Sheet { Table, ColoristId, ClientId }

#[derive(DeriveIden)]
enum HairService { Table, ColoristId, SheetId, ClientId }
