use axum::Json;
use serde_json::{Value, json};

/// Liveness probe.
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Serve a prebuilt `OpenAPI` document as pretty JSON.
#[must_use]
pub fn openapi_json(doc: &utoipa::openapi::OpenApi) -> axum::response::Response {
    use axum::{http::header, response::IntoResponse};

    match serde_json::to_string_pretty(doc) {
        Ok(json) => (
            [
                (header::CONTENT_TYPE, "application/json"),
                (header::CACHE_CONTROL, "no-store"),
            ],
            json,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to serialize OpenAPI doc: {e}");
            crate::problem::Problem::internal().into_response()
        }
    }
}
