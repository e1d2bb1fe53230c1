//! Color-formula sheets and the hair services recorded on them.

use sea_orm::{ColumnTrait, Condition};
use tracing::{error, info, instrument};
use uuid::Uuid;

use models::sheet::{self, ChangeClient, NewSheet, SheetUpdate};
use models::{client, hair_service};

use crate::crud::{by_id, finish, Changes, Collections, ParentLink};
use crate::errors::ServiceError;
use crate::pagination::FindOptions;
use crate::views::SheetView;

fn scoped(colorist_id: Uuid, id: Uuid) -> Condition {
    by_id::<sheet::Entity>(id).add(sheet::Column::ColoristId.eq(colorist_id))
}

fn client_of(colorist_id: Uuid, client_id: Uuid) -> Condition {
    by_id::<client::Entity>(client_id).add(client::Column::ColoristId.eq(colorist_id))
}

#[derive(Clone)]
pub struct SheetService {
    docs: Collections,
}

impl SheetService {
    pub fn new(docs: Collections) -> Self { Self { docs } }

    /// Create the sheet under its client together with its hair services.
    #[instrument(skip(self, input), fields(client_id = %input.client_id))]
    pub async fn create_sheet(&self, colorist_id: Uuid, mut input: NewSheet) -> Result<SheetView, ServiceError> {
        input.normalize_and_validate()?;

        let txn = self.docs.sheets.begin().await?;
        let res = async {
            let parent = ParentLink::new(&self.docs.clients, input.client_id, client::Column::Sheets)
                .scoped(Condition::all().add(client::Column::ColoristId.eq(colorist_id)));
            let mut created = self
                .docs
                .sheets
                .create_and_link_parent(input.active_model(colorist_id), parent, Some(&txn))
                .await?;

            let mut hair_services = Vec::with_capacity(input.hair_services.len());
            for body in input.hair_services {
                let am = body.into_active_model(colorist_id, created.client_id, created.id);
                hair_services.push(self.docs.hair_services.create(am, Some(&txn)).await?);
            }

            if !hair_services.is_empty() {
                let ids: Vec<Uuid> = hair_services.iter().map(|h| h.id).collect();
                self.docs
                    .sheets
                    .update_one(
                        by_id::<sheet::Entity>(created.id),
                        Changes::new().push_all(sheet::Column::HairServices, ids.clone()),
                        Some(&txn),
                    )
                    .await?;
                created.hair_services = ids;
                created.version += 1;
            }
            Ok::<_, ServiceError>(SheetView::new(created, hair_services))
        }
        .await;

        let view = finish(txn, res).await.inspect_err(|e| {
            error!(colorist_id = %colorist_id, error = %e, "could not create sheet with its hair services");
        })?;
        info!(sheet_id = %view.id, hair_services = view.hair_services.len(), "sheet_created");
        Ok(view)
    }

    pub async fn find_sheet(&self, colorist_id: Uuid, id: Uuid) -> Result<SheetView, ServiceError> {
        let found = self.docs.sheets.find_one(scoped(colorist_id, id)).await?;
        let mut views = self.docs.populate_sheets(vec![found]).await?;
        views.pop().ok_or_else(|| ServiceError::not_found("Sheet"))
    }

    pub async fn find_sheets_by_client(
        &self,
        colorist_id: Uuid,
        client_id: Uuid,
        options: FindOptions,
    ) -> Result<Vec<SheetView>, ServiceError> {
        let filter = Condition::all()
            .add(sheet::Column::ColoristId.eq(colorist_id))
            .add(sheet::Column::ClientId.eq(client_id));
        let found = self.docs.sheets.find(filter, options).await?;
        self.docs.populate_sheets(found).await
    }

    pub async fn update_sheet(&self, colorist_id: Uuid, id: Uuid, mut input: SheetUpdate) -> Result<(), ServiceError> {
        input.normalize_and_validate()?;
        let changes = Changes::new().set(sheet::Column::Date, input.date);
        self.docs.sheets.update_one(scoped(colorist_id, id), changes, None).await
    }

    /// Move a sheet, and its hair services, from one client to another.
    #[instrument(skip(self))]
    pub async fn change_client(&self, colorist_id: Uuid, sheet_id: Uuid, input: ChangeClient) -> Result<(), ServiceError> {
        let ChangeClient { old_client_id, new_client_id } = input;
        if old_client_id == new_client_id {
            return Err(ServiceError::bad_request("The new client must be different from the old one."));
        }
        self.docs
            .sheets
            .assert_parent_exists(client_of(colorist_id, new_client_id), &self.docs.clients)
            .await?;

        let txn = self.docs.sheets.begin().await?;
        let res = async {
            // the sheet must currently belong to the old client
            self.docs
                .sheets
                .update_one(
                    scoped(colorist_id, sheet_id).add(sheet::Column::ClientId.eq(old_client_id)),
                    Changes::new().set(sheet::Column::ClientId, new_client_id),
                    Some(&txn),
                )
                .await?;
            self.docs
                .clients
                .update_one(
                    client_of(colorist_id, new_client_id),
                    Changes::new().push(client::Column::Sheets, sheet_id),
                    Some(&txn),
                )
                .await?;
            self.docs
                .hair_services
                .update_many(
                    Condition::all()
                        .add(hair_service::Column::ColoristId.eq(colorist_id))
                        .add(hair_service::Column::ClientId.eq(old_client_id))
                        .add(hair_service::Column::SheetId.eq(sheet_id)),
                    Changes::new().set(hair_service::Column::ClientId, new_client_id),
                    Some(&txn),
                )
                .await?;
            // once the new client has the sheet, take it off the old one
            self.docs
                .clients
                .update_one(
                    client_of(colorist_id, old_client_id),
                    Changes::new().pull(client::Column::Sheets, sheet_id),
                    Some(&txn),
                )
                .await
        }
        .await;

        finish(txn, res).await.inspect_err(|e| {
            error!(%old_client_id, %new_client_id, error = %e, "error while changing sheet from client");
        })?;
        info!(%sheet_id, %new_client_id, "sheet_client_changed");
        Ok(())
    }

    /// Delete a sheet with its hair services and unlink it from the client.
    #[instrument(skip(self))]
    pub async fn delete_sheet(&self, colorist_id: Uuid, client_id: Uuid, sheet_id: Uuid) -> Result<(), ServiceError> {
        self.docs
            .sheets
            .assert_parent_exists(client_of(colorist_id, client_id), &self.docs.clients)
            .await?;

        let txn = self.docs.sheets.begin().await?;
        let res = async {
            self.docs.sheets.delete_one(scoped(colorist_id, sheet_id), Some(&txn)).await?;
            self.docs
                .hair_services
                .delete_many(
                    Condition::all()
                        .add(hair_service::Column::ColoristId.eq(colorist_id))
                        .add(hair_service::Column::SheetId.eq(sheet_id)),
                    Some(&txn),
                )
                .await?;
            self.docs
                .clients
                .update_one(
                    client_of(colorist_id, client_id),
                    Changes::new().pull(client::Column::Sheets, sheet_id),
                    Some(&txn),
                )
                .await
        }
        .await;

        finish(txn, res).await?;
        info!(%sheet_id, "sheet_deleted");
        Ok(())
    }
}
