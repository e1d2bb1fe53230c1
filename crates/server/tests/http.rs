//! Router-level tests over sea-orm's mock connection; no live database needed.

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use models::client;
use server::routes;
use server::state::ServerState;
use service::auth::AuthConfig;

const SECRET: &str = "test-secret";

fn auth_config() -> AuthConfig {
    AuthConfig { jwt_secret: SECRET.into(), expires_in_secs: 3600 }
}

fn state(db: MockDatabase) -> ServerState {
    ServerState::new(db.into_connection(), auth_config())
}

fn app(state: ServerState) -> Router {
    routes::build_router(state, tower_http::cors::CorsLayer::very_permissive())
}

fn empty() -> MockDatabase {
    MockDatabase::new(DatabaseBackend::Postgres)
}

fn request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(t) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {t}"));
    }
    match body {
        Some(v) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn client_row(id: Uuid, colorist_id: Uuid) -> client::Model {
    let now = chrono::Utc::now().into();
    client::Model {
        id,
        colorist_id,
        name: "Lu".into(),
        last_name: "Paz".into(),
        email: None,
        phone_number: None,
        sheets: vec![],
        version: 0,
        created_at: now,
        updated_at: now,
    }
}

#[tokio::test]
async fn health_is_public() {
    let (status, body) = send(app(state(empty())), request(Method::GET, "/api/health", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn private_route_without_token_is_unauthorized() {
    let (status, body) = send(app(state(empty())), request(Method::GET, "/api/client", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["statusCode"], 401);
}

#[tokio::test]
async fn forged_token_is_unauthorized() {
    let other = service::auth::AuthService::new(
        std::sync::Arc::new(service::auth::repository::mock::MockAuthRepository::default()),
        AuthConfig { jwt_secret: "someone-else".into(), expires_in_secs: 3600 },
    );
    let token = other.issue_token(Uuid::new_v4()).unwrap();

    let (status, _) = send(app(state(empty())), request(Method::GET, "/api/client", Some(&token), None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn colorist_cannot_delete_another_account() {
    let st = state(empty());
    let token = st.auth.issue_token(Uuid::new_v4()).unwrap();
    let uri = format!("/api/colorist/{}", Uuid::new_v4());

    let (status, body) = send(app(st), request(Method::DELETE, &uri, Some(&token), None)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Forbidden resource");
}

#[tokio::test]
async fn unknown_login_is_bad_request() {
    let st = state(empty().append_query_results([Vec::<models::colorist::Model>::new()]));
    let body = json!({ "emailOrUsername": "ghost", "password": "secret" });

    let (status, body) = send(app(st), request(Method::POST, "/api/auth/sign-in", None, Some(body))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Credentials are invalid.");
}

#[tokio::test]
async fn sign_up_validates_fields() {
    let body = json!({
        "email": "not-an-email",
        "username": "ana90",
        "name": "Ana",
        "lastName": "Diaz",
        "password": "secret"
    });

    let (status, body) = send(app(state(empty())), request(Method::POST, "/api/colorist", None, Some(body))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation Error");
}

#[tokio::test]
async fn deleting_missing_client_is_not_found() {
    let st = state(empty().append_exec_results([MockExecResult { last_insert_id: 0, rows_affected: 0 }]));
    let token = st.auth.issue_token(Uuid::new_v4()).unwrap();
    let uri = format!("/api/client/{}", Uuid::new_v4());

    let (status, body) = send(app(st), request(Method::DELETE, &uri, Some(&token), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Client was not found.");
}

#[tokio::test]
async fn lists_only_the_callers_clients() {
    let colorist_id = Uuid::new_v4();
    let rows = vec![client_row(Uuid::new_v4(), colorist_id), client_row(Uuid::new_v4(), colorist_id)];
    let st = state(empty().append_query_results([rows]));
    let token = st.auth.issue_token(colorist_id).unwrap();

    let (status, body) = send(app(st), request(Method::GET, "/api/client?name=l&limit=5", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["coloristId"], json!(colorist_id));
    assert_eq!(list[0]["sheets"], json!([]));
}

#[tokio::test]
async fn sheet_delete_requires_client_id() {
    let st = state(empty());
    let token = st.auth.issue_token(Uuid::new_v4()).unwrap();
    let uri = format!("/api/sheet/{}", Uuid::new_v4());

    let (status, _) = send(app(st), request(Method::DELETE, &uri, Some(&token), None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn empty_update_is_rejected() {
    let st = state(empty());
    let token = st.auth.issue_token(Uuid::new_v4()).unwrap();
    let uri = format!("/api/client/{}", Uuid::new_v4());

    let (status, body) = send(app(st), request(Method::PATCH, &uri, Some(&token), Some(json!({})))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Nothing to update.");
}
