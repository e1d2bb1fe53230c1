use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use common::types::ApiResult;
use models::hair_service::{self, HairServiceUpdate, NewHairService};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::ColoristId;
use crate::errors::JsonApiError;
use crate::state::ServerState;

/// `?sheetId=` on delete.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetRef {
    pub sheet_id: Uuid,
}

pub async fn create(
    State(state): State<ServerState>,
    Extension(ColoristId(colorist_id)): Extension<ColoristId>,
    Json(input): Json<NewHairService>,
) -> Result<(StatusCode, Json<hair_service::Model>), JsonApiError> {
    let created = state.services.hair_services.create_hair_service(colorist_id, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn by_sheet(
    State(state): State<ServerState>,
    Extension(ColoristId(colorist_id)): Extension<ColoristId>,
    Path(sheet_id): Path<Uuid>,
) -> Result<Json<Vec<hair_service::Model>>, JsonApiError> {
    Ok(Json(state.services.hair_services.find_by_sheet(colorist_id, sheet_id).await?))
}

pub async fn get_one(
    State(state): State<ServerState>,
    Extension(ColoristId(colorist_id)): Extension<ColoristId>,
    Path(id): Path<Uuid>,
) -> Result<Json<hair_service::Model>, JsonApiError> {
    Ok(Json(state.services.hair_services.find_hair_service(colorist_id, id).await?))
}

pub async fn update(
    State(state): State<ServerState>,
    Extension(ColoristId(colorist_id)): Extension<ColoristId>,
    Path(id): Path<Uuid>,
    Json(input): Json<HairServiceUpdate>,
) -> Result<Json<ApiResult>, JsonApiError> {
    state.services.hair_services.update_hair_service(colorist_id, id, input).await?;
    Ok(Json(ApiResult::ok()))
}

pub async fn remove(
    State(state): State<ServerState>,
    Extension(ColoristId(colorist_id)): Extension<ColoristId>,
    Path(id): Path<Uuid>,
    Query(SheetRef { sheet_id }): Query<SheetRef>,
) -> Result<Json<ApiResult>, JsonApiError> {
    state.services.hair_services.delete_hair_service(colorist_id, sheet_id, id).await?;
    Ok(Json(ApiResult::ok()))
}
