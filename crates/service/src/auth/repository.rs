use async_trait::async_trait;

use super::domain::ColoristCredentials;
use super::errors::AuthError;

/// Repository abstraction for auth-related persistence.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    /// Case-insensitive exact match on username or email.
    async fn find_credentials(&self, email_or_username: &str) -> Result<Option<ColoristCredentials>, AuthError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use uuid::Uuid;

    use crate::auth::password::hash_password;

    #[derive(Default)]
    pub struct MockAuthRepository {
        // key: lowercased username or email
        logins: Mutex<HashMap<String, ColoristCredentials>>,
    }

    impl MockAuthRepository {
        /// Register a colorist reachable by both `username` and `email`.
        pub fn insert(&self, username: &str, email: &str, password: &str) -> Result<Uuid, AuthError> {
            let creds = ColoristCredentials { colorist_id: Uuid::new_v4(), password_hash: hash_password(password)? };
            let id = creds.colorist_id;
            let mut logins = self.logins.lock().unwrap();
            logins.insert(username.to_lowercase(), creds.clone());
            logins.insert(email.to_lowercase(), creds);
            Ok(id)
        }
    }

    #[async_trait]
    impl AuthRepository for MockAuthRepository {
        async fn find_credentials(&self, email_or_username: &str) -> Result<Option<ColoristCredentials>, AuthError> {
            let logins = self.logins.lock().unwrap();
            Ok(logins.get(&email_or_username.trim().to_lowercase()).cloned())
        }
    }
}
