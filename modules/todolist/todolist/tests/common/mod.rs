#![allow(clippy::unwrap_used, clippy::expect_used, dead_code)]

//! Shared fixtures: a full gateway + todo list stack with static tokens.

use api_gateway::{ApiGateway, ApiGatewayConfig};
use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
    response::Response,
};
use serde_json::{Value, json};
use static_authn_plugin::{AuthNMode, StaticAuthNPlugin, StaticAuthNPluginConfig, TokenMapping};
use todolist::{TodoListConfig, TodoListModule};
use tower::ServiceExt;

pub const ALICE: &str = "00000000-0000-0000-0000-00000000a11c";
pub const BOB: &str = "00000000-0000-0000-0000-000000000b0b";

fn token(token: &str, claims: Value) -> TokenMapping {
    TokenMapping {
        token: token.to_owned(),
        claims,
    }
}

/// Tokens:
/// - `alice`: user with read/write, `bob`: user with read only
/// - `daemon`: application with read/write, `auditor`: application with read only
/// - `stranger`: user without any todo list permission
/// - `mystery`: carries neither `idtyp`, `scp` nor `roles`
/// - `no-oid`: permitted user token missing `oid`
pub fn authn_config() -> StaticAuthNPluginConfig {
    StaticAuthNPluginConfig {
        mode: AuthNMode::StaticTokens,
        tokens: vec![
            token(
                "alice",
                json!({ "idtyp": "user", "scp": "Todolist.Read Todolist.ReadWrite", "oid": ALICE }),
            ),
            token(
                "bob",
                json!({ "idtyp": "user", "scp": "Todolist.Read", "oid": BOB }),
            ),
            token(
                "daemon",
                json!({ "idtyp": "app", "roles": ["Todolist.ReadWrite.All"] }),
            ),
            token(
                "auditor",
                json!({ "idtyp": "app", "roles": ["todolist.read.all"] }),
            ),
            token(
                "stranger",
                json!({ "idtyp": "user", "scp": "User.Read", "oid": BOB }),
            ),
            token("mystery", json!({ "oid": ALICE })),
            token("no-oid", json!({ "idtyp": "user", "scp": "Todolist.Read" })),
        ],
        ..StaticAuthNPluginConfig::default()
    }
}

/// Build the served router for `todolist_cfg`.
pub fn app(todolist_cfg: &TodoListConfig) -> Router {
    let gateway_cfg = ApiGatewayConfig {
        enable_docs: true,
        ..ApiGatewayConfig::default()
    };

    let authn = StaticAuthNPlugin::init(&authn_config()).unwrap();
    let module = TodoListModule::init(todolist_cfg).unwrap();

    let mut gateway = ApiGateway::new(gateway_cfg, authn.client());
    let router = module.register_rest(&mut gateway, Router::new());
    gateway
        .build_router(router, Some(module.openapi()))
        .unwrap()
}

pub async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    router
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap()
}

pub async fn send_raw(
    router: &Router,
    method: Method,
    uri: &str,
    token: &str,
    body: &str,
) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_owned()))
        .unwrap();

    router.clone().oneshot(request).await.unwrap()
}

pub async fn json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// Create a todo and return its JSON representation.
pub async fn create(router: &Router, token: &str, body: Value) -> Value {
    let response = send(router, Method::POST, "/api/todolist", Some(token), Some(body)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response).await
}
