//! Colorist accounts: sign-up, profile, password and cascading delete.

use sea_orm::{ColumnTrait, Condition};
use tracing::{error, info, instrument};
use uuid::Uuid;

use models::colorist::{self, ColoristUpdate, NewColorist};
use models::{client, hair_service, sheet, validation};

use crate::auth::password::{hash_password, verify_password};
use crate::crud::{by_id, finish, Changes, Collections};
use crate::errors::ServiceError;
use crate::pagination::FindOptions;
use crate::views::ColoristView;

#[derive(Clone)]
pub struct ColoristService {
    docs: Collections,
}

impl ColoristService {
    pub fn new(docs: Collections) -> Self { Self { docs } }

    /// Validate, reject taken username/email, hash the password and store.
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn create_colorist(&self, mut input: NewColorist) -> Result<colorist::Model, ServiceError> {
        input.normalize_and_validate()?;

        let taken = self.taken_fields(&input.username, &input.email).await?;
        if !taken.is_empty() {
            return Err(already_exists(&taken));
        }

        let (username, email) = (input.username.clone(), input.email.clone());
        let hash = hash_password(&input.password)?;
        let created = match self.docs.colorists.create(input.into_active_model(hash), None).await {
            Ok(created) => created,
            // lost a race with a concurrent sign-up
            Err(ServiceError::Duplicate(_)) => {
                let taken = self.taken_fields(&username, &email).await?;
                let fields: &[&str] = if taken.is_empty() { &["username", "email"] } else { &taken };
                return Err(already_exists(fields));
            }
            Err(e) => return Err(e),
        };
        info!(colorist_id = %created.id, "colorist_created");
        Ok(created)
    }

    async fn taken_fields(&self, username: &str, email: &str) -> Result<Vec<&'static str>, ServiceError> {
        colorist::taken_fields(self.docs.colorists.connection(), username, email).await.map_err(|e| {
            error!(username, error = %e, "taken fields lookup failed");
            ServiceError::internal("Could not check the Colorist credentials")
        })
    }

    pub async fn find_all(&self) -> Result<Vec<ColoristView>, ServiceError> {
        let all = self.docs.colorists.find(Condition::all(), FindOptions::default()).await?;
        self.docs.populate_colorists(all).await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<ColoristView, ServiceError> {
        let found = self.docs.colorists.find_one(by_id::<colorist::Entity>(id)).await?;
        let mut views = self.docs.populate_colorists(vec![found]).await?;
        views.pop().ok_or_else(|| ServiceError::not_found("Colorist"))
    }

    /// Only the profile fields; credentials go through `change_password`.
    pub async fn update_colorist(&self, id: Uuid, mut input: ColoristUpdate) -> Result<(), ServiceError> {
        input.normalize_and_validate()?;
        if input.is_empty() {
            return Err(ServiceError::bad_request("Nothing to update."));
        }
        let changes = Changes::new()
            .set_opt(colorist::Column::Name, input.name)
            .set_opt(colorist::Column::LastName, input.last_name)
            .set_opt(colorist::Column::HairSalonName, input.hair_salon_name);
        self.docs.colorists.update_one(by_id::<colorist::Entity>(id), changes, None).await
    }

    #[instrument(skip(self, old_password, new_password))]
    pub async fn change_password(&self, id: Uuid, old_password: &str, new_password: &str) -> Result<(), ServiceError> {
        let current = self.docs.colorists.find_one(by_id::<colorist::Entity>(id)).await?;
        if !verify_password(old_password, &current.password_hash)? {
            return Err(ServiceError::bad_request("Credentials are invalid."));
        }
        validation::password(new_password)?;

        let hash = hash_password(new_password)?;
        let changes = Changes::new().set(colorist::Column::PasswordHash, hash);
        self.docs.colorists.update_one(by_id::<colorist::Entity>(id), changes, None).await?;
        info!(colorist_id = %id, "password_changed");
        Ok(())
    }

    /// Remove the colorist and everything it owns in one transaction.
    #[instrument(skip(self))]
    pub async fn delete_colorist(&self, id: Uuid) -> Result<(), ServiceError> {
        let txn = self.docs.colorists.begin().await?;
        let res = async {
            self.docs.colorists.delete_one(by_id::<colorist::Entity>(id), Some(&txn)).await?;
            let hair_services = self
                .docs
                .hair_services
                .delete_many(Condition::all().add(hair_service::Column::ColoristId.eq(id)), Some(&txn))
                .await?;
            let sheets = self
                .docs
                .sheets
                .delete_many(Condition::all().add(sheet::Column::ColoristId.eq(id)), Some(&txn))
                .await?;
            let clients = self
                .docs
                .clients
                .delete_many(Condition::all().add(client::Column::ColoristId.eq(id)), Some(&txn))
                .await?;
            Ok::<_, ServiceError>((clients, sheets, hair_services))
        }
        .await;

        let (clients, sheets, hair_services) = finish(txn, res).await?;
        info!(colorist_id = %id, clients, sheets, hair_services, "colorist_deleted");
        Ok(())
    }
}

fn already_exists(taken: &[&str]) -> ServiceError {
    ServiceError::bad_request(format!("Already exists a Colorist using: {}.", taken.join(", ")))
}
