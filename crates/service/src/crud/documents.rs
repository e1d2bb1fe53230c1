use std::sync::Arc;

use sea_orm::{ActiveModelBehavior, ActiveModelTrait, DatabaseConnection, EntityTrait};
use uuid::Uuid;

use models::{client, colorist, hair_service, sheet};

use super::CrudService;

/// An entity stored as a document: uuid id, `version` counter and timestamps.
pub trait DocumentEntity: EntityTrait {
    type ActiveModel: ActiveModelTrait<Entity = Self> + ActiveModelBehavior + std::fmt::Debug + Send + Sync;

    /// Display name used in error messages (`"Client was not found."`).
    const NAME: &'static str;

    fn id_column() -> Self::Column;
    fn version_column() -> Self::Column;
    fn created_at_column() -> Self::Column;
    fn updated_at_column() -> Self::Column;
}

pub trait DocumentModel {
    fn id(&self) -> Uuid;
}

macro_rules! document {
    ($module:ident, $name:literal) => {
        impl DocumentEntity for $module::Entity {
            type ActiveModel = $module::ActiveModel;
            const NAME: &'static str = $name;

            fn id_column() -> Self::Column { $module::Column::Id }
            fn version_column() -> Self::Column { $module::Column::Version }
            fn created_at_column() -> Self::Column { $module::Column::CreatedAt }
            fn updated_at_column() -> Self::Column { $module::Column::UpdatedAt }
        }

        impl DocumentModel for $module::Model {
            fn id(&self) -> Uuid { self.id }
        }
    };
}

document!(colorist, "Colorist");
document!(client, "Client");
document!(sheet, "Sheet");
document!(hair_service, "HairService");

/// One `CrudService` per collection, sharing a pool.
#[derive(Clone)]
pub struct Collections {
    pub colorists: CrudService<colorist::Entity>,
    pub clients: CrudService<client::Entity>,
    pub sheets: CrudService<sheet::Entity>,
    pub hair_services: CrudService<hair_service::Entity>,
}

impl Collections {
    pub fn new(db: impl Into<Arc<DatabaseConnection>>) -> Self {
        let db = db.into();
        Self {
            colorists: CrudService::new(db.clone()),
            clients: CrudService::new(db.clone()),
            sheets: CrudService::new(db.clone()),
            hair_services: CrudService::new(db),
        }
    }
}
