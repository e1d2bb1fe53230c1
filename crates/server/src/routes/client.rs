use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use common::types::ApiResult;
use models::client::{self, ClientUpdate, NewClient};
use service::client::ClientQuery;
use service::views::ClientView;
use uuid::Uuid;

use crate::auth::ColoristId;
use crate::errors::JsonApiError;
use crate::state::ServerState;

pub async fn create(
    State(state): State<ServerState>,
    Extension(ColoristId(colorist_id)): Extension<ColoristId>,
    Json(input): Json<NewClient>,
) -> Result<(StatusCode, Json<client::Model>), JsonApiError> {
    let created = state.services.clients.create_client(colorist_id, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list(
    State(state): State<ServerState>,
    Extension(ColoristId(colorist_id)): Extension<ColoristId>,
    Query(query): Query<ClientQuery>,
) -> Result<Json<Vec<ClientView>>, JsonApiError> {
    Ok(Json(state.services.clients.find_clients(colorist_id, &query).await?))
}

pub async fn get_one(
    State(state): State<ServerState>,
    Extension(ColoristId(colorist_id)): Extension<ColoristId>,
    Path(id): Path<Uuid>,
) -> Result<Json<ClientView>, JsonApiError> {
    Ok(Json(state.services.clients.find_client(colorist_id, id).await?))
}

pub async fn update(
    State(state): State<ServerState>,
    Extension(ColoristId(colorist_id)): Extension<ColoristId>,
    Path(id): Path<Uuid>,
    Json(input): Json<ClientUpdate>,
) -> Result<Json<ApiResult>, JsonApiError> {
    state.services.clients.update_client(colorist_id, id, input).await?;
    Ok(Json(ApiResult::ok()))
}

pub async fn remove(
    State(state): State<ServerState>,
    Extension(ColoristId(colorist_id)): Extension<ColoristId>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResult>, JsonApiError> {
    state.services.clients.delete_client(colorist_id, id).await?;
    Ok(Json(ApiResult::ok()))
}
