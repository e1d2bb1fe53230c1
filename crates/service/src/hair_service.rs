use sea_orm::{ColumnTrait, Condition};
use tracing::{info, instrument};
use uuid::Uuid;

use models::hair_service::{self, HairServiceUpdate, Ingredients, NewHairService};
use models::sheet;

use crate::crud::{by_id, finish, Changes, Collections, ParentLink};
use crate::errors::ServiceError;
use crate::pagination::FindOptions;

fn scoped(colorist_id: Uuid, id: Uuid) -> Condition {
    by_id::<hair_service::Entity>(id).add(hair_service::Column::ColoristId.eq(colorist_id))
}

#[derive(Clone)]
pub struct HairServiceService {
    docs: Collections,
}

impl HairServiceService {
    pub fn new(docs: Collections) -> Self { Self { docs } }

    /// Create under a sheet the colorist owns for the given client.
    #[instrument(skip(self, input), fields(sheet_id = %input.sheet_id))]
    pub async fn create_hair_service(
        &self,
        colorist_id: Uuid,
        mut input: NewHairService,
    ) -> Result<hair_service::Model, ServiceError> {
        input.body.normalize_and_validate()?;
        let parent = ParentLink::new(&self.docs.sheets, input.sheet_id, sheet::Column::HairServices).scoped(
            Condition::all()
                .add(sheet::Column::ColoristId.eq(colorist_id))
                .add(sheet::Column::ClientId.eq(input.client_id)),
        );
        let am = input.body.into_active_model(colorist_id, input.client_id, input.sheet_id);
        let created = self.docs.hair_services.create_and_link_parent(am, parent, None).await?;
        info!(hair_service_id = %created.id, "hair_service_created");
        Ok(created)
    }

    pub async fn find_by_sheet(&self, colorist_id: Uuid, sheet_id: Uuid) -> Result<Vec<hair_service::Model>, ServiceError> {
        let filter = Condition::all()
            .add(hair_service::Column::ColoristId.eq(colorist_id))
            .add(hair_service::Column::SheetId.eq(sheet_id));
        self.docs.hair_services.find(filter, FindOptions::default()).await
    }

    pub async fn find_hair_service(&self, colorist_id: Uuid, id: Uuid) -> Result<hair_service::Model, ServiceError> {
        self.docs.hair_services.find_one(scoped(colorist_id, id)).await
    }

    pub async fn update_hair_service(
        &self,
        colorist_id: Uuid,
        id: Uuid,
        mut input: HairServiceUpdate,
    ) -> Result<(), ServiceError> {
        input.normalize_and_validate()?;
        if input.is_empty() {
            return Err(ServiceError::bad_request("Nothing to update."));
        }
        let changes = Changes::new()
            .set_opt(hair_service::Column::Name, input.name)
            .set_opt(hair_service::Column::Observations, input.observations)
            .set_opt(hair_service::Column::Ingredients, input.ingredients.map(Ingredients));
        self.docs.hair_services.update_one(scoped(colorist_id, id), changes, None).await
    }

    /// Delete and unlink from `sheet.hair_services` in one transaction.
    #[instrument(skip(self))]
    pub async fn delete_hair_service(&self, colorist_id: Uuid, sheet_id: Uuid, id: Uuid) -> Result<(), ServiceError> {
        let txn = self.docs.hair_services.begin().await?;
        let res = async {
            self.docs
                .hair_services
                .delete_one(scoped(colorist_id, id).add(hair_service::Column::SheetId.eq(sheet_id)), Some(&txn))
                .await?;
            self.docs
                .sheets
                .update_one(
                    by_id::<sheet::Entity>(sheet_id).add(sheet::Column::ColoristId.eq(colorist_id)),
                    Changes::new().pull(sheet::Column::HairServices, id),
                    Some(&txn),
                )
                .await
        }
        .await;

        finish(txn, res).await?;
        info!(hair_service_id = %id, "hair_service_deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{hair_service_row, sheet_row};
    use models::hair_service::{HairServiceBody, Ingredient};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn exec(rows_affected: u64) -> MockExecResult { MockExecResult { last_insert_id: 0, rows_affected } }

    fn svc(db: MockDatabase) -> HairServiceService { HairServiceService::new(Collections::new(db.into_connection())) }

    fn input(client_id: Uuid, sheet_id: Uuid) -> NewHairService {
        NewHairService {
            client_id,
            sheet_id,
            body: HairServiceBody {
                name: "Balayage".into(),
                observations: Some("warm tones".into()),
                ingredients: vec![Ingredient {
                    brand: "Koleston".into(),
                    height: None,
                    oxidizing: "20".into(),
                    quantity: "60g".into(),
                    tone: "7.1".into(),
                }],
            },
        }
    }

    #[tokio::test]
    async fn create_needs_sheet_of_that_client() {
        let svc = svc(MockDatabase::new(DatabaseBackend::Postgres).append_query_results([Vec::<sheet::Model>::new()]));

        let err = svc.create_hair_service(Uuid::new_v4(), input(Uuid::new_v4(), Uuid::new_v4())).await.unwrap_err();
        assert!(matches!(&err, ServiceError::BadRequest(m) if m == "Parent does not exists."));
    }

    #[tokio::test]
    async fn create_links_to_sheet() {
        let (colorist_id, client_id, sheet_id) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let row = hair_service_row(Uuid::new_v4(), colorist_id, client_id, sheet_id);
        let svc = svc(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![sheet_row(sheet_id, colorist_id, client_id)]])
                .append_query_results([vec![row.clone()]])
                .append_exec_results([exec(1)]),
        );

        let created = svc.create_hair_service(colorist_id, input(client_id, sheet_id)).await.unwrap();
        assert_eq!(created.id, row.id);
    }

    #[tokio::test]
    async fn update_requires_a_field() {
        let svc = svc(MockDatabase::new(DatabaseBackend::Postgres));
        let err = svc
            .update_hair_service(Uuid::new_v4(), Uuid::new_v4(), HairServiceUpdate::default())
            .await
            .unwrap_err();
        assert!(matches!(&err, ServiceError::BadRequest(m) if m == "Nothing to update."));
    }

    #[tokio::test]
    async fn delete_missing_hair_service_is_not_found() {
        let svc = svc(MockDatabase::new(DatabaseBackend::Postgres).append_exec_results([exec(0)]));

        let err = svc.delete_hair_service(Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(&err, ServiceError::NotFound(m) if m == "HairService was not found."));
    }
}
