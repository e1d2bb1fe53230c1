use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use common::types::ApiResult;
use models::sheet::{ChangeClient, NewSheet, SheetUpdate};
use serde::Deserialize;
use service::pagination::FindOptions;
use service::views::SheetView;
use uuid::Uuid;

use crate::auth::ColoristId;
use crate::errors::JsonApiError;
use crate::state::ServerState;

/// `?clientId=` on delete: the client the sheet is unlinked from.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRef {
    pub client_id: Uuid,
}

pub async fn create(
    State(state): State<ServerState>,
    Extension(ColoristId(colorist_id)): Extension<ColoristId>,
    Json(input): Json<NewSheet>,
) -> Result<(StatusCode, Json<SheetView>), JsonApiError> {
    let created = state.services.sheets.create_sheet(colorist_id, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_one(
    State(state): State<ServerState>,
    Extension(ColoristId(colorist_id)): Extension<ColoristId>,
    Path(id): Path<Uuid>,
) -> Result<Json<SheetView>, JsonApiError> {
    Ok(Json(state.services.sheets.find_sheet(colorist_id, id).await?))
}

pub async fn by_client(
    State(state): State<ServerState>,
    Extension(ColoristId(colorist_id)): Extension<ColoristId>,
    Path(client_id): Path<Uuid>,
    Query(options): Query<FindOptions>,
) -> Result<Json<Vec<SheetView>>, JsonApiError> {
    Ok(Json(state.services.sheets.find_sheets_by_client(colorist_id, client_id, options).await?))
}

pub async fn update(
    State(state): State<ServerState>,
    Extension(ColoristId(colorist_id)): Extension<ColoristId>,
    Path(id): Path<Uuid>,
    Json(input): Json<SheetUpdate>,
) -> Result<Json<ApiResult>, JsonApiError> {
    state.services.sheets.update_sheet(colorist_id, id, input).await?;
    Ok(Json(ApiResult::ok()))
}

pub async fn change_client(
    State(state): State<ServerState>,
    Extension(ColoristId(colorist_id)): Extension<ColoristId>,
    Path(id): Path<Uuid>,
    Json(input): Json<ChangeClient>,
) -> Result<Json<ApiResult>, JsonApiError> {
    state.services.sheets.change_client(colorist_id, id, input).await?;
    Ok(Json(ApiResult::ok()))
}

pub async fn remove(
    State(state): State<ServerState>,
    Extension(ColoristId(colorist_id)): Extension<ColoristId>,
    Path(id): Path<Uuid>,
    Query(ClientRef { client_id }): Query<ClientRef>,
) -> Result<Json<ApiResult>, JsonApiError> {
    state.services.sheets.delete_sheet(colorist_id, client_id, id).await?;
    Ok(Json(ApiResult::ok()))
}
