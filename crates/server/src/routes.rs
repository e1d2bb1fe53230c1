use axum::{
    middleware,
    routing::{get, patch, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::{types::Health, APP_GLOBAL_PREFIX};

use crate::auth::require_bearer_token;
use crate::state::ServerState;

pub mod auth;
pub mod client;
pub mod colorist;
pub mod hair_service;
pub mod sheet;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Every REST route under `/api`, behind the bearer-token guard.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let api = Router::new()
        .route("/health", get(health))
        .route("/auth/sign-in", post(auth::sign_in))
        .route("/colorist", post(colorist::create).get(colorist::list))
        .route("/colorist/:id", get(colorist::get_one).patch(colorist::update).delete(colorist::remove))
        .route("/colorist/:id/password", patch(colorist::change_password))
        .route("/client", post(client::create).get(client::list))
        .route("/client/:id", get(client::get_one).patch(client::update).delete(client::remove))
        .route("/sheet", post(sheet::create))
        .route("/sheet/:id", get(sheet::get_one).patch(sheet::update).delete(sheet::remove))
        .route("/sheet/client/:client_id", get(sheet::by_client))
        .route("/sheet/change-client/:id", patch(sheet::change_client))
        .route("/hair-service", post(hair_service::create))
        .route("/hair-service/sheet/:sheet_id", get(hair_service::by_sheet))
        .route(
            "/hair-service/:id",
            get(hair_service::get_one).patch(hair_service::update).delete(hair_service::remove),
        );

    Router::new()
        .nest(&format!("/{APP_GLOBAL_PREFIX}"), api)
        .layer(middleware::from_fn_with_state(state.clone(), require_bearer_token))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // status and latency
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
