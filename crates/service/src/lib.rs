//! Service layer for the colorist backend.
//! - `crud` is the generic document service every collection goes through.
//! - One service per collection owns the cascading workflows.
//! - `auth` signs colorists in and verifies their tokens.

pub mod errors;
pub mod pagination;
pub mod crud;
pub mod views;
pub mod auth;
pub mod colorist;
pub mod client;
pub mod sheet;
pub mod hair_service;
#[cfg(test)]
pub mod test_support;

pub use crud::Collections;
pub use errors::ServiceError;

/// Every domain service over one shared pool.
#[derive(Clone)]
pub struct Services {
    pub colorists: colorist::ColoristService,
    pub clients: client::ClientService,
    pub sheets: sheet::SheetService,
    pub hair_services: hair_service::HairServiceService,
}

impl Services {
    pub fn new(db: impl Into<std::sync::Arc<sea_orm::DatabaseConnection>>) -> Self {
        let docs = Collections::new(db);
        Self {
            colorists: colorist::ColoristService::new(docs.clone()),
            clients: client::ClientService::new(docs.clone()),
            sheets: sheet::SheetService::new(docs.clone()),
            hair_services: hair_service::HairServiceService::new(docs),
        }
    }
}
