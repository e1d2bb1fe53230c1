use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::auth::domain::ColoristCredentials;
use crate::auth::errors::AuthError;
use crate::auth::repository::AuthRepository;

pub struct SeaOrmAuthRepository {
    pub db: Arc<DatabaseConnection>,
}

#[async_trait::async_trait]
impl AuthRepository for SeaOrmAuthRepository {
    async fn find_credentials(&self, email_or_username: &str) -> Result<Option<ColoristCredentials>, AuthError> {
        let found = models::colorist::find_by_login(&*self.db, email_or_username)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(found.map(|c| ColoristCredentials { colorist_id: c.id, password_hash: c.password_hash }))
    }
}
