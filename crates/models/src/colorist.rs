use sea_orm::{entity::prelude::*, Condition, ConnectionTrait, Set};
use sea_orm::sea_query::{Expr, Func};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;
use crate::validation::{self, HAIR_SALON_NAME_LEN, PERSON_NAME_LEN};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "colorist")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    #[sea_orm(unique)]
    pub username: String,
    pub name: String,
    pub last_name: String,
    pub hair_salon_name: Option<String>,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub clients: Vec<Uuid>,
    pub version: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewColorist {
    pub email: String,
    pub username: String,
    pub name: String,
    pub last_name: String,
    #[serde(default)]
    pub hair_salon_name: Option<String>,
    pub password: String,
}

impl NewColorist {
    pub fn normalize_and_validate(&mut self) -> Result<(), ModelError> {
        validation::trim(&mut self.email);
        validation::trim(&mut self.username);
        validation::trim(&mut self.name);
        validation::trim(&mut self.last_name);
        validation::trim_opt(&mut self.hair_salon_name);

        validation::email("email", &self.email)?;
        validation::username(&self.username)?;
        validation::length("name", &self.name, PERSON_NAME_LEN)?;
        validation::length("lastName", &self.last_name, PERSON_NAME_LEN)?;
        if let Some(salon) = &self.hair_salon_name {
            validation::length("hairSalonName", salon, HAIR_SALON_NAME_LEN)?;
        }
        validation::password(&self.password)
    }

    /// Fresh row; `password_hash` is produced by the caller.
    pub fn into_active_model(self, password_hash: String) -> ActiveModel {
        let now = chrono::Utc::now().into();
        ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(self.email),
            username: Set(self.username),
            name: Set(self.name),
            last_name: Set(self.last_name),
            hair_salon_name: Set(self.hair_salon_name),
            password_hash: Set(password_hash),
            clients: Set(Vec::new()),
            version: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColoristUpdate {
    pub name: Option<String>,
    pub last_name: Option<String>,
    pub hair_salon_name: Option<String>,
}

impl ColoristUpdate {
    pub fn normalize_and_validate(&mut self) -> Result<(), ModelError> {
        validation::trim_opt(&mut self.name);
        validation::trim_opt(&mut self.last_name);
        validation::trim_opt(&mut self.hair_salon_name);
        if let Some(v) = &self.name {
            validation::length("name", v, PERSON_NAME_LEN)?;
        }
        if let Some(v) = &self.last_name {
            validation::length("lastName", v, PERSON_NAME_LEN)?;
        }
        if let Some(v) = &self.hair_salon_name {
            validation::length("hairSalonName", v, HAIR_SALON_NAME_LEN)?;
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.last_name.is_none() && self.hair_salon_name.is_none()
    }
}

/// Case-insensitive match on username or email.
pub fn login_condition(email_or_username: &str) -> Condition {
    let needle = email_or_username.trim().to_lowercase();
    Condition::any()
        .add(Expr::expr(Func::lower(Expr::col(Column::Username))).eq(needle.clone()))
        .add(Expr::expr(Func::lower(Expr::col(Column::Email))).eq(needle))
}

pub async fn find_by_login<C: ConnectionTrait>(db: &C, email_or_username: &str) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find().filter(login_condition(email_or_username)).one(db).await?)
}

/// Names of the unique fields (`username`, `email`) already taken by another colorist.
pub async fn taken_fields<C: ConnectionTrait>(db: &C, username: &str, email: &str) -> Result<Vec<&'static str>, ModelError> {
    let username = username.to_lowercase();
    let email = email.to_lowercase();
    let rows = Entity::find()
        .filter(
            Condition::any()
                .add(Expr::expr(Func::lower(Expr::col(Column::Username))).eq(username.clone()))
                .add(Expr::expr(Func::lower(Expr::col(Column::Email))).eq(email.clone())),
        )
        .all(db)
        .await?;

    let mut taken = Vec::new();
    if rows.iter().any(|c| c.username.to_lowercase() == username) {
        taken.push("username");
    }
    if rows.iter().any(|c| c.email.to_lowercase() == email) {
        taken.push("email");
    }
    Ok(taken)
}
