use sea_orm::{entity::prelude::*, FromJsonQueryResult, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;
use crate::validation::{
    self, HAIR_SERVICE_NAME_LEN, INGREDIENT_BRAND_LEN, INGREDIENT_HEIGHT_LEN, INGREDIENT_QUANTITY_LEN,
    INGREDIENT_TONE_LEN, OBSERVATIONS_LEN,
};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "hair_service")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub colorist_id: Uuid,
    pub client_id: Uuid,
    pub sheet_id: Uuid,
    pub name: String,
    pub observations: Option<String>,
    #[sea_orm(column_type = "JsonBinary")]
    pub ingredients: Ingredients,
    pub version: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Embedded list, stored as a single `jsonb` value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(transparent)]
pub struct Ingredients(pub Vec<Ingredient>);

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub brand: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    pub oxidizing: String,
    pub quantity: String,
    pub tone: String,
}

impl Ingredient {
    pub fn normalize_and_validate(&mut self) -> Result<(), ModelError> {
        validation::trim(&mut self.brand);
        validation::trim_opt(&mut self.height);
        validation::trim(&mut self.oxidizing);
        validation::trim(&mut self.quantity);
        validation::trim(&mut self.tone);

        validation::length("brand", &self.brand, INGREDIENT_BRAND_LEN)?;
        if let Some(h) = &self.height {
            validation::length("height", h, INGREDIENT_HEIGHT_LEN)?;
        }
        validation::oxidizing(&self.oxidizing)?;
        validation::length("quantity", &self.quantity, INGREDIENT_QUANTITY_LEN)?;
        validation::length("tone", &self.tone, INGREDIENT_TONE_LEN)
    }
}

/// Name, observations and ingredients: the part of a hair service a
/// colorist writes. Used standalone and nested in a new sheet.
#[derive(Debug, Clone, Deserialize)]
pub struct HairServiceBody {
    pub name: String,
    #[serde(default)]
    pub observations: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
}

impl HairServiceBody {
    pub fn normalize_and_validate(&mut self) -> Result<(), ModelError> {
        validation::trim(&mut self.name);
        validation::trim_opt(&mut self.observations);
        validation::length("name", &self.name, HAIR_SERVICE_NAME_LEN)?;
        if let Some(o) = &self.observations {
            validation::length("observations", o, OBSERVATIONS_LEN)?;
        }
        self.ingredients.iter_mut().try_for_each(Ingredient::normalize_and_validate)
    }

    pub fn into_active_model(self, colorist_id: Uuid, client_id: Uuid, sheet_id: Uuid) -> ActiveModel {
        let now = chrono::Utc::now().into();
        ActiveModel {
            id: Set(Uuid::new_v4()),
            colorist_id: Set(colorist_id),
            client_id: Set(client_id),
            sheet_id: Set(sheet_id),
            name: Set(self.name),
            observations: Set(self.observations),
            ingredients: Set(Ingredients(self.ingredients)),
            version: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHairService {
    pub client_id: Uuid,
    pub sheet_id: Uuid,
    #[serde(flatten)]
    pub body: HairServiceBody,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HairServiceUpdate {
    pub name: Option<String>,
    pub observations: Option<String>,
    pub ingredients: Option<Vec<Ingredient>>,
}

impl HairServiceUpdate {
    pub fn normalize_and_validate(&mut self) -> Result<(), ModelError> {
        validation::trim_opt(&mut self.name);
        validation::trim_opt(&mut self.observations);
        if let Some(v) = &self.name {
            validation::length("name", v, HAIR_SERVICE_NAME_LEN)?;
        }
        if let Some(v) = &self.observations {
            validation::length("observations", v, OBSERVATIONS_LEN)?;
        }
        if let Some(list) = self.ingredients.as_mut() {
            list.iter_mut().try_for_each(Ingredient::normalize_and_validate)?;
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.observations.is_none() && self.ingredients.is_none()
    }
}
