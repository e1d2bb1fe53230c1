use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Sign-in input
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInInput {
    pub email_or_username: String,
    pub password: String,
}

/// What sign-in needs to know about a colorist
#[derive(Debug, Clone)]
pub struct ColoristCredentials {
    pub colorist_id: Uuid,
    pub password_hash: String,
}

/// Sign-in result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignInResponse {
    pub access_token: String,
}

/// JWT payload; `sub` is the colorist id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub iat: i64,
    pub exp: i64,
}
