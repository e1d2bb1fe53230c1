use std::sync::Arc;

use sea_orm::DatabaseConnection;
use service::auth::repo::seaorm::SeaOrmAuthRepository;
use service::auth::{AuthConfig, AuthService};
use service::Services;

/// Shared by every handler; cloning is cheap.
#[derive(Clone)]
pub struct ServerState {
    pub services: Services,
    pub auth: Arc<AuthService<SeaOrmAuthRepository>>,
}

impl ServerState {
    pub fn new(db: DatabaseConnection, auth: AuthConfig) -> Self {
        let db = Arc::new(db);
        let repo = Arc::new(SeaOrmAuthRepository { db: db.clone() });
        Self { services: Services::new(db), auth: Arc::new(AuthService::new(repo, auth)) }
    }
}
