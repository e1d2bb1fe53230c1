use axum::{extract::State, Json};
use service::auth::domain::{SignInInput, SignInResponse};

use crate::errors::JsonApiError;
use crate::state::ServerState;

pub async fn sign_in(
    State(state): State<ServerState>,
    Json(input): Json<SignInInput>,
) -> Result<Json<SignInResponse>, JsonApiError> {
    Ok(Json(state.auth.sign_in(input).await?))
}
