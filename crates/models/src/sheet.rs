use sea_orm::{entity::prelude::*, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;
use crate::hair_service::HairServiceBody;
use crate::validation::{self, SHEET_MAX_HAIR_SERVICES};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sheet")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub colorist_id: Uuid,
    pub client_id: Uuid,
    /// `dd/MM/yyyy`
    pub date: String,
    pub hair_services: Vec<Uuid>,
    pub version: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSheet {
    pub client_id: Uuid,
    pub date: String,
    #[serde(default)]
    pub hair_services: Vec<HairServiceBody>,
}

impl NewSheet {
    pub fn normalize_and_validate(&mut self) -> Result<(), ModelError> {
        validation::trim(&mut self.date);
        validation::sheet_date(&self.date)?;
        if self.hair_services.len() > SHEET_MAX_HAIR_SERVICES {
            return Err(ModelError::Validation(format!(
                "hairServices must contain no more than {SHEET_MAX_HAIR_SERVICES} elements"
            )));
        }
        self.hair_services.iter_mut().try_for_each(HairServiceBody::normalize_and_validate)
    }

    /// Row without hair services; their ids are pushed once they exist.
    pub fn active_model(&self, colorist_id: Uuid) -> ActiveModel {
        let now = chrono::Utc::now().into();
        ActiveModel {
            id: Set(Uuid::new_v4()),
            colorist_id: Set(colorist_id),
            client_id: Set(self.client_id),
            date: Set(self.date.clone()),
            hair_services: Set(Vec::new()),
            version: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SheetUpdate {
    pub date: String,
}

impl SheetUpdate {
    pub fn normalize_and_validate(&mut self) -> Result<(), ModelError> {
        validation::trim(&mut self.date);
        validation::sheet_date(&self.date).map(|_| ())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeClient {
    pub old_client_id: Uuid,
    pub new_client_id: Uuid,
}
