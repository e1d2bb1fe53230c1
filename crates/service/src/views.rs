//! Populated read models: a parent with its children id arrays replaced by
//! the referenced documents.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use uuid::Uuid;

use models::{client, colorist, hair_service, sheet};

use crate::crud::Collections;
use crate::errors::ServiceError;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetView {
    pub id: Uuid,
    pub colorist_id: Uuid,
    pub client_id: Uuid,
    pub date: String,
    pub hair_services: Vec<hair_service::Model>,
    pub version: i32,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}

impl SheetView {
    pub fn new(sheet: sheet::Model, hair_services: Vec<hair_service::Model>) -> Self {
        Self {
            id: sheet.id,
            colorist_id: sheet.colorist_id,
            client_id: sheet.client_id,
            date: sheet.date,
            hair_services,
            version: sheet.version,
            created_at: sheet.created_at,
            updated_at: sheet.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientView {
    pub id: Uuid,
    pub colorist_id: Uuid,
    pub name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub sheets: Vec<SheetView>,
    pub version: i32,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}

impl ClientView {
    pub fn new(client: client::Model, sheets: Vec<SheetView>) -> Self {
        Self {
            id: client.id,
            colorist_id: client.colorist_id,
            name: client.name,
            last_name: client.last_name,
            email: client.email,
            phone_number: client.phone_number,
            sheets,
            version: client.version,
            created_at: client.created_at,
            updated_at: client.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColoristView {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub name: String,
    pub last_name: String,
    pub hair_salon_name: Option<String>,
    pub clients: Vec<ClientView>,
    pub version: i32,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}

impl ColoristView {
    pub fn new(colorist: colorist::Model, clients: Vec<ClientView>) -> Self {
        Self {
            id: colorist.id,
            email: colorist.email,
            username: colorist.username,
            name: colorist.name,
            last_name: colorist.last_name,
            hair_salon_name: colorist.hair_salon_name,
            clients,
            version: colorist.version,
            created_at: colorist.created_at,
            updated_at: colorist.updated_at,
        }
    }
}

/// Loads each level with one `id IN (..)` query for the whole batch.
impl Collections {
    pub async fn populate_sheets(&self, sheets: Vec<sheet::Model>) -> Result<Vec<SheetView>, ServiceError> {
        let ids: Vec<Uuid> = sheets.iter().flat_map(|s| s.hair_services.iter().copied()).collect();
        let mut pool = self.hair_services.find_by_ids(&ids).await?;
        Ok(sheets
            .into_iter()
            .map(|sheet| {
                let own = take_matching(&mut pool, &sheet.hair_services, |h| h.id);
                SheetView::new(sheet, own)
            })
            .collect())
    }

    pub async fn populate_clients(&self, clients: Vec<client::Model>) -> Result<Vec<ClientView>, ServiceError> {
        let ids: Vec<Uuid> = clients.iter().flat_map(|c| c.sheets.iter().copied()).collect();
        let sheets = self.sheets.find_by_ids(&ids).await?;
        let mut pool = self.populate_sheets(sheets).await?;
        Ok(clients
            .into_iter()
            .map(|client| {
                let own = take_matching(&mut pool, &client.sheets, |s| s.id);
                ClientView::new(client, own)
            })
            .collect())
    }

    pub async fn populate_colorists(&self, colorists: Vec<colorist::Model>) -> Result<Vec<ColoristView>, ServiceError> {
        let ids: Vec<Uuid> = colorists.iter().flat_map(|c| c.clients.iter().copied()).collect();
        let clients = self.clients.find_by_ids(&ids).await?;
        let mut pool = self.populate_clients(clients).await?;
        Ok(colorists
            .into_iter()
            .map(|colorist| {
                let own = take_matching(&mut pool, &colorist.clients, |c| c.id);
                ColoristView::new(colorist, own)
            })
            .collect())
    }
}

/// Remove from `pool` the items listed in `ids`, keeping the order of `ids`.
fn take_matching<T>(pool: &mut Vec<T>, ids: &[Uuid], id_of: impl Fn(&T) -> Uuid) -> Vec<T> {
    let mut out = Vec::with_capacity(ids.len());
    for id in ids {
        if let Some(pos) = pool.iter().position(|item| id_of(item) == *id) {
            out.push(pool.swap_remove(pos));
        }
    }
    out
}
