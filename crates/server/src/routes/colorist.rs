use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use common::types::ApiResult;
use models::colorist::{self, ColoristUpdate, NewColorist};
use serde::Deserialize;
use service::views::ColoristView;
use uuid::Uuid;

use crate::auth::ColoristId;
use crate::errors::JsonApiError;
use crate::state::ServerState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePassword {
    pub old_password: String,
    pub new_password: String,
}

/// A colorist may only change or delete its own account.
fn ensure_self(me: ColoristId, id: Uuid) -> Result<(), JsonApiError> {
    if me.0 == id {
        Ok(())
    } else {
        Err(JsonApiError::forbidden())
    }
}

pub async fn create(
    State(state): State<ServerState>,
    Json(input): Json<NewColorist>,
) -> Result<(StatusCode, Json<colorist::Model>), JsonApiError> {
    let created = state.services.colorists.create_colorist(input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<ColoristView>>, JsonApiError> {
    Ok(Json(state.services.colorists.find_all().await?))
}

pub async fn get_one(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ColoristView>, JsonApiError> {
    Ok(Json(state.services.colorists.find_by_id(id).await?))
}

pub async fn update(
    State(state): State<ServerState>,
    Extension(me): Extension<ColoristId>,
    Path(id): Path<Uuid>,
    Json(input): Json<ColoristUpdate>,
) -> Result<Json<ApiResult>, JsonApiError> {
    ensure_self(me, id)?;
    state.services.colorists.update_colorist(id, input).await?;
    Ok(Json(ApiResult::ok()))
}

pub async fn change_password(
    State(state): State<ServerState>,
    Extension(me): Extension<ColoristId>,
    Path(id): Path<Uuid>,
    Json(input): Json<ChangePassword>,
) -> Result<Json<ApiResult>, JsonApiError> {
    ensure_self(me, id)?;
    state.services.colorists.change_password(id, &input.old_password, &input.new_password).await?;
    Ok(Json(ApiResult::ok()))
}

pub async fn remove(
    State(state): State<ServerState>,
    Extension(me): Extension<ColoristId>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResult>, JsonApiError> {
    ensure_self(me, id)?;
    state.services.colorists.delete_colorist(id).await?;
    Ok(Json(ApiResult::ok()))
}
