//! Clients of a colorist.

use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{ColumnTrait, Condition};
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use models::client::{self, ClientUpdate, NewClient};
use models::{colorist, hair_service, sheet};

use crate::crud::{by_id, finish, Changes, Collections, ParentLink};
use crate::errors::ServiceError;
use crate::pagination::FindOptions;
use crate::views::ClientView;

/// Query string of `GET /client`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientQuery {
    /// Case-insensitive prefix.
    pub name: Option<String>,
    /// Case-insensitive prefix.
    pub last_name: Option<String>,
    pub limit: Option<u64>,
    pub skip: Option<u64>,
}

impl ClientQuery {
    pub fn options(&self) -> FindOptions { FindOptions { limit: self.limit, skip: self.skip } }

    fn condition(&self, colorist_id: Uuid) -> Condition {
        let mut cond = owned_by(colorist_id);
        if let Some(prefix) = self.name.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
            cond = cond.add(starts_with_ci(client::Column::Name, prefix));
        }
        if let Some(prefix) = self.last_name.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
            cond = cond.add(starts_with_ci(client::Column::LastName, prefix));
        }
        cond
    }
}

fn owned_by(colorist_id: Uuid) -> Condition {
    Condition::all().add(client::Column::ColoristId.eq(colorist_id))
}

fn scoped(colorist_id: Uuid, id: Uuid) -> Condition {
    by_id::<client::Entity>(id).add(client::Column::ColoristId.eq(colorist_id))
}

/// `lower(col) LIKE 'prefix%'`
fn starts_with_ci(col: client::Column, prefix: &str) -> sea_orm::sea_query::SimpleExpr {
    Expr::expr(Func::lower(Expr::col(col))).like(LikeExpr::new(like_prefix(prefix)).escape('\\'))
}

/// Lowercased `prefix%` with the LIKE wildcards in `prefix` escaped.
fn like_prefix(prefix: &str) -> String {
    let mut pattern = String::with_capacity(prefix.len() + 1);
    for ch in prefix.to_lowercase().chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

#[derive(Clone)]
pub struct ClientService {
    docs: Collections,
}

impl ClientService {
    pub fn new(docs: Collections) -> Self { Self { docs } }

    /// Create the client and link it to `colorist.clients`; both or neither.
    #[instrument(skip(self, input))]
    pub async fn create_client(&self, colorist_id: Uuid, mut input: NewClient) -> Result<client::Model, ServiceError> {
        input.normalize_and_validate()?;
        let parent = ParentLink::new(&self.docs.colorists, colorist_id, colorist::Column::Clients);
        let created = self
            .docs
            .clients
            .create_and_link_parent(input.into_active_model(colorist_id), parent, None)
            .await?;
        info!(client_id = %created.id, "client_created");
        Ok(created)
    }

    pub async fn find_clients(&self, colorist_id: Uuid, query: &ClientQuery) -> Result<Vec<ClientView>, ServiceError> {
        let found = self.docs.clients.find(query.condition(colorist_id), query.options()).await?;
        self.docs.populate_clients(found).await
    }

    pub async fn find_client(&self, colorist_id: Uuid, id: Uuid) -> Result<ClientView, ServiceError> {
        let found = self.docs.clients.find_one(scoped(colorist_id, id)).await?;
        let mut views = self.docs.populate_clients(vec![found]).await?;
        views.pop().ok_or_else(|| ServiceError::not_found("Client"))
    }

    pub async fn update_client(&self, colorist_id: Uuid, id: Uuid, mut input: ClientUpdate) -> Result<(), ServiceError> {
        input.normalize_and_validate()?;
        if input.is_empty() {
            return Err(ServiceError::bad_request("Nothing to update."));
        }
        let changes = Changes::new()
            .set_opt(client::Column::Name, input.name)
            .set_opt(client::Column::LastName, input.last_name)
            .set_opt(client::Column::Email, input.email)
            .set_opt(client::Column::PhoneNumber, input.phone_number);
        self.docs.clients.update_one(scoped(colorist_id, id), changes, None).await
    }

    /// Delete the client, its sheets and hair services, and unlink it from the colorist.
    #[instrument(skip(self))]
    pub async fn delete_client(&self, colorist_id: Uuid, id: Uuid) -> Result<(), ServiceError> {
        let txn = self.docs.clients.begin().await?;
        let res = async {
            self.docs.clients.delete_one(scoped(colorist_id, id), Some(&txn)).await?;
            self.docs
                .hair_services
                .delete_many(
                    Condition::all()
                        .add(hair_service::Column::ColoristId.eq(colorist_id))
                        .add(hair_service::Column::ClientId.eq(id)),
                    Some(&txn),
                )
                .await?;
            self.docs
                .sheets
                .delete_many(
                    Condition::all().add(sheet::Column::ColoristId.eq(colorist_id)).add(sheet::Column::ClientId.eq(id)),
                    Some(&txn),
                )
                .await?;
            self.docs
                .colorists
                .update_one(
                    by_id::<colorist::Entity>(colorist_id),
                    Changes::new().pull(colorist::Column::Clients, id),
                    Some(&txn),
                )
                .await
        }
        .await;

        finish(txn, res).await?;
        info!(client_id = %id, "client_deleted");
        Ok(())
    }
}
