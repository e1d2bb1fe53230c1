use sea_orm::{entity::prelude::*, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;
use crate::validation::{self, PERSON_NAME_LEN, PHONE_NUMBER_LEN};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "client")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub colorist_id: Uuid,
    pub name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub sheets: Vec<Uuid>,
    pub version: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewClient {
    pub name: String,
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
}

impl NewClient {
    pub fn normalize_and_validate(&mut self) -> Result<(), ModelError> {
        validation::trim(&mut self.name);
        validation::trim(&mut self.last_name);
        validation::trim_opt(&mut self.email);
        validation::trim_opt(&mut self.phone_number);

        validation::length("name", &self.name, PERSON_NAME_LEN)?;
        validation::length("lastName", &self.last_name, PERSON_NAME_LEN)?;
        if let Some(email) = &self.email {
            validation::email("email", email)?;
        }
        if let Some(phone) = &self.phone_number {
            validation::length("phoneNumber", phone, PHONE_NUMBER_LEN)?;
        }
        Ok(())
    }

    pub fn into_active_model(self, colorist_id: Uuid) -> ActiveModel {
        let now = chrono::Utc::now().into();
        ActiveModel {
            id: Set(Uuid::new_v4()),
            colorist_id: Set(colorist_id),
            name: Set(self.name),
            last_name: Set(self.last_name),
            email: Set(self.email),
            phone_number: Set(self.phone_number),
            sheets: Set(Vec::new()),
            version: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientUpdate {
    pub name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
}

impl ClientUpdate {
    pub fn normalize_and_validate(&mut self) -> Result<(), ModelError> {
        validation::trim_opt(&mut self.name);
        validation::trim_opt(&mut self.last_name);
        validation::trim_opt(&mut self.email);
        validation::trim_opt(&mut self.phone_number);
        if let Some(v) = &self.name {
            validation::length("name", v, PERSON_NAME_LEN)?;
        }
        if let Some(v) = &self.last_name {
            validation::length("lastName", v, PERSON_NAME_LEN)?;
        }
        if let Some(v) = &self.email {
            validation::email("email", v)?;
        }
        if let Some(v) = &self.phone_number {
            validation::length("phoneNumber", v, PHONE_NUMBER_LEN)?;
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.last_name.is_none() && self.email.is_none() && self.phone_number.is_none()
    }
}
