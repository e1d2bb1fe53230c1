use thiserror::Error;

use crate::auth::errors::AuthError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Internal(String),
    /// A unique constraint rejected the write.
    #[error("{0} already exists.")]
    Duplicate(&'static str),
    #[error(transparent)]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} was not found.", entity)) }

    pub fn internal(msg: impl Into<String>) -> Self { Self::Internal(msg.into()) }

    pub fn bad_request(msg: impl Into<String>) -> Self { Self::BadRequest(msg.into()) }

    /// True for errors caused by the caller's input.
    pub fn is_client_error(&self) -> bool {
        match self {
            ServiceError::BadRequest(_) | ServiceError::NotFound(_) | ServiceError::Duplicate(_) => true,
            ServiceError::Model(models::errors::ModelError::Validation(_)) => true,
            _ => false,
        }
    }
}

impl From<AuthError> for ServiceError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::InvalidCredentials => Self::BadRequest(e.to_string()),
            other => Self::Internal(other.to_string()),
        }
    }
}
