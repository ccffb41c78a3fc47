use std::sync::Arc;

use api_gateway::Problem;
use axum::http::Method;
use axum::routing::get;
use axum::{Extension, Router};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::rest::{dto, handlers};
use crate::domain::service::Service;

/// Base path the handler annotations are written against.
const DOCUMENTED_ENDPOINT: &str = "/api/todolist";

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(utoipa::openapi::Components::new);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::list_todos,
        handlers::get_todo,
        handlers::create_todo,
        handlers::update_todo,
        handlers::delete_todo,
    ),
    components(schemas(dto::TodoDto, dto::CreateTodoReq, dto::UpdateTodoReq, Problem)),
    modifiers(&BearerAuth),
    tags((name = "Todo List", description = "Owner-scoped todo items"))
)]
struct TodoListApi;

/// Routes of the todo list mounted at `endpoint`.
#[must_use]
pub fn register_routes(router: Router, endpoint: &str, service: Arc<Service>) -> Router {
    let item = format!("{endpoint}/{{id}}");

    router
        .route(
            endpoint,
            get(handlers::list_todos).post(handlers::create_todo),
        )
        .route(
            &item,
            get(handlers::get_todo)
                .put(handlers::update_todo)
                .delete(handlers::delete_todo),
        )
        .layer(Extension(service))
}

/// `(method, path)` pairs the gateway must authenticate.
#[must_use]
pub fn authenticated_routes(endpoint: &str) -> Vec<(Method, String)> {
    let item = format!("{endpoint}/{{id}}");
    vec![
        (Method::GET, endpoint.to_owned()),
        (Method::POST, endpoint.to_owned()),
        (Method::GET, item.clone()),
        (Method::PUT, item.clone()),
        (Method::DELETE, item),
    ]
}

/// `OpenAPI` document for the todo list routes mounted at `endpoint`.
#[must_use]
pub fn openapi(endpoint: &str) -> utoipa::openapi::OpenApi {
    let mut doc = TodoListApi::openapi();
    if endpoint != DOCUMENTED_ENDPOINT {
        doc.paths.paths = std::mem::take(&mut doc.paths.paths)
            .into_iter()
            .map(|(path, item)| (path.replacen(DOCUMENTED_ENDPOINT, endpoint, 1), item))
            .collect();
    }
    doc
}
