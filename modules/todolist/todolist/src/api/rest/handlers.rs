use std::sync::Arc;

use api_gateway::{ApiResult, Problem};
use axum::extract::rejection::JsonRejection;
use axum::extract::Path;
use axum::http::{StatusCode, Uri};
use axum::response::IntoResponse;
use axum::{Extension, Json};
use claims_security::SecurityContext;

use crate::api::rest::dto::{CreateTodoReq, TodoDto, UpdateTodoReq};
use crate::api::rest::error::{domain_error_to_problem, json_rejection_to_problem};
use crate::domain::service::Service;

/// List the caller's todos (every todo for application tokens)
#[utoipa::path(
    get,
    path = "/api/todolist",
    tag = "Todo List",
    responses(
        (status = 200, description = "Todos visible to the caller", body = [TodoDto]),
        (status = 401, description = "Missing, unclassifiable or malformed token", body = Problem, content_type = "application/problem+json"),
        (status = 403, description = "Missing read permission", body = Problem, content_type = "application/problem+json"),
        (status = 500, description = "Storage failure", body = Problem, content_type = "application/problem+json"),
    ),
    security(("bearer" = []))
)]
#[tracing::instrument(skip(svc, ctx, uri))]
pub async fn list_todos(
    uri: Uri,
    Extension(ctx): Extension<SecurityContext>,
    Extension(svc): Extension<Arc<Service>>,
) -> ApiResult<Json<Vec<TodoDto>>> {
    let todos = svc
        .list_todos(&ctx)
        .await
        .map_err(|e| domain_error_to_problem(&e, uri.path()))?;

    Ok(Json(todos.into_iter().map(TodoDto::from).collect()))
}

/// Get a todo by id
#[utoipa::path(
    get,
    path = "/api/todolist/{id}",
    tag = "Todo List",
    params(("id" = String, Path, description = "Todo id")),
    responses(
        (status = 200, description = "The todo", body = TodoDto),
        (status = 401, description = "Missing, unclassifiable or malformed token", body = Problem, content_type = "application/problem+json"),
        (status = 403, description = "Missing read permission", body = Problem, content_type = "application/problem+json"),
        (status = 404, description = "No such todo for this caller", body = Problem, content_type = "application/problem+json"),
    ),
    security(("bearer" = []))
)]
#[tracing::instrument(skip(svc, ctx, uri, id), fields(todo.id = %id))]
pub async fn get_todo(
    uri: Uri,
    Extension(ctx): Extension<SecurityContext>,
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<String>,
) -> ApiResult<Json<TodoDto>> {
    let todo = svc
        .get_todo(&ctx, &id)
        .await
        .map_err(|e| domain_error_to_problem(&e, uri.path()))?;

    Ok(Json(todo.into()))
}

/// Create a todo
#[utoipa::path(
    post,
    path = "/api/todolist",
    tag = "Todo List",
    request_body = CreateTodoReq,
    responses(
        (status = 201, description = "Created", body = TodoDto),
        (status = 400, description = "Malformed JSON body", body = Problem, content_type = "application/problem+json"),
        (status = 401, description = "Missing, unclassifiable or malformed token", body = Problem, content_type = "application/problem+json"),
        (status = 403, description = "Neither delegated nor application write permission", body = Problem, content_type = "application/problem+json"),
        (status = 409, description = "Id already taken", body = Problem, content_type = "application/problem+json"),
        (status = 422, description = "Invalid todo", body = Problem, content_type = "application/problem+json"),
    ),
    security(("bearer" = []))
)]
#[tracing::instrument(skip(svc, ctx, uri, payload))]
pub async fn create_todo(
    uri: Uri,
    Extension(ctx): Extension<SecurityContext>,
    Extension(svc): Extension<Arc<Service>>,
    payload: Result<Json<CreateTodoReq>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(req) = payload.map_err(|r| json_rejection_to_problem(&r, uri.path()))?;

    let todo = svc
        .create_todo(&ctx, req.into())
        .await
        .map_err(|e| domain_error_to_problem(&e, uri.path()))?;

    Ok((StatusCode::CREATED, Json(TodoDto::from(todo))))
}

/// Update a todo's description
#[utoipa::path(
    put,
    path = "/api/todolist/{id}",
    tag = "Todo List",
    params(("id" = String, Path, description = "Todo id")),
    request_body = UpdateTodoReq,
    responses(
        (status = 200, description = "Updated todo", body = TodoDto),
        (status = 400, description = "Malformed JSON body", body = Problem, content_type = "application/problem+json"),
        (status = 401, description = "Missing, unclassifiable or malformed token", body = Problem, content_type = "application/problem+json"),
        (status = 403, description = "Missing write permission", body = Problem, content_type = "application/problem+json"),
        (status = 404, description = "No such todo for this caller", body = Problem, content_type = "application/problem+json"),
        (status = 422, description = "Invalid description", body = Problem, content_type = "application/problem+json"),
    ),
    security(("bearer" = []))
)]
#[tracing::instrument(skip(svc, ctx, uri, id, payload), fields(todo.id = %id))]
pub async fn update_todo(
    uri: Uri,
    Extension(ctx): Extension<SecurityContext>,
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateTodoReq>, JsonRejection>,
) -> ApiResult<Json<TodoDto>> {
    let Json(req) = payload.map_err(|r| json_rejection_to_problem(&r, uri.path()))?;

    let todo = svc
        .update_todo(&ctx, &id, req.into())
        .await
        .map_err(|e| domain_error_to_problem(&e, uri.path()))?;

    Ok(Json(todo.into()))
}

/// Delete a todo
#[utoipa::path(
    delete,
    path = "/api/todolist/{id}",
    tag = "Todo List",
    params(("id" = String, Path, description = "Todo id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 401, description = "Missing, unclassifiable or malformed token", body = Problem, content_type = "application/problem+json"),
        (status = 403, description = "Missing write permission", body = Problem, content_type = "application/problem+json"),
        (status = 404, description = "No such todo for this caller", body = Problem, content_type = "application/problem+json"),
    ),
    security(("bearer" = []))
)]
#[tracing::instrument(skip(svc, ctx, uri, id), fields(todo.id = %id))]
pub async fn delete_todo(
    uri: Uri,
    Extension(ctx): Extension<SecurityContext>,
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    svc.delete_todo(&ctx, &id)
        .await
        .map_err(|e| domain_error_to_problem(&e, uri.path()))?;

    Ok(StatusCode::NO_CONTENT)
}
