//! Bearer-token guard for every private route.

use axum::extract::{Request, State};
use axum::http::{header, Method};
use axum::middleware::Next;
use axum::response::Response;
use uuid::Uuid;

use crate::errors::JsonApiError;
use crate::state::ServerState;

/// Id of the signed-in colorist, taken from the token's `sub`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColoristId(pub Uuid);

/// Routes reachable without a token: health, sign-in and sign-up.
fn is_public(method: &Method, path: &str) -> bool {
    let prefix = format!("/{}", common::APP_GLOBAL_PREFIX);
    let Some(rest) = path.strip_prefix(prefix.as_str()) else {
        return false;
    };
    match rest.trim_end_matches('/') {
        "/health" => true,
        "/auth/sign-in" | "/colorist" => method == Method::POST,
        _ => false,
    }
}

fn bearer(req: &Request) -> Option<&str> {
    let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    value.strip_prefix("Bearer ").map(str::trim).filter(|t| !t.is_empty())
}

/// Verify `Authorization: Bearer <token>` and expose the colorist id to handlers.
pub async fn require_bearer_token(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, JsonApiError> {
    if req.method() == Method::OPTIONS || is_public(req.method(), req.uri().path()) {
        return Ok(next.run(req).await);
    }

    let Some(token) = bearer(&req) else {
        tracing::warn!(path = %req.uri().path(), "missing bearer token");
        return Err(JsonApiError::unauthorized("Unauthorized"));
    };
    let colorist_id = state.auth.verify_token(token)?;

    req.extensions_mut().insert(ColoristId(colorist_id));
    Ok(next.run(req).await)
}
