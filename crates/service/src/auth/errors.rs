use thiserror::Error;

/// Failures of sign-in and token checks
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown login or wrong password; callers cannot tell which.
    #[error("Credentials are invalid.")]
    InvalidCredentials,
    #[error("invalid or expired token")]
    Unauthorized,
    #[error("hashing error: {0}")]
    HashError(String),
    #[error("token error: {0}")]
    TokenError(String),
    #[error("repository error: {0}")]
    Repository(String),
}

impl AuthError {
    /// Stable numeric code for logs
    pub fn code(&self) -> u16 {
        match self {
            AuthError::InvalidCredentials => 1002,
            AuthError::Unauthorized => 1004,
            AuthError::HashError(_) => 1101,
            AuthError::TokenError(_) => 1102,
            AuthError::Repository(_) => 1200,
        }
    }
}
