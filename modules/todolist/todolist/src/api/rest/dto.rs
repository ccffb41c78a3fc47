use serde::{Deserialize, Serialize};
use todolist_sdk::{NewTodo, Todo, TodoPatch};
use utoipa::ToSchema;

/// REST DTO for a stored todo
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TodoDto {
    pub id: String,
    /// Object id (`oid`) of the owning user.
    pub owner: String,
    pub description: String,
}

/// REST DTO for creating a todo
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateTodoReq {
    /// Generated when omitted.
    #[serde(default)]
    pub id: Option<String>,
    /// Ignored for user tokens; required for application tokens.
    #[serde(default)]
    pub owner: Option<String>,
    pub description: String,
}

/// REST DTO for updating a todo
///
/// `id` and `owner` may be sent back unchanged; they are never modified.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateTodoReq {
    #[serde(default)]
    pub description: Option<String>,
}

impl From<Todo> for TodoDto {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.id,
            owner: todo.owner,
            description: todo.description,
        }
    }
}

impl From<CreateTodoReq> for NewTodo {
    fn from(req: CreateTodoReq) -> Self {
        Self {
            id: req.id,
            owner: req.owner,
            description: req.description,
        }
    }
}

impl From<UpdateTodoReq> for TodoPatch {
    fn from(req: UpdateTodoReq) -> Self {
        Self {
            description: req.description,
        }
    }
}
