use async_trait::async_trait;
use claims_security::SecurityContext;

use crate::errors::TodoListError;
use crate::models::{NewTodo, Todo, TodoPatch};

/// In-process client for the todo list.
///
/// Every call is authorized against the caller's [`SecurityContext`]: user
/// tokens only ever see their own todos, application tokens see all of them.
///
/// # Errors
///
/// All methods share the same failure modes:
/// - `Unclassifiable` if the token is neither a user nor an application token
/// - `Unauthorized` if a claim needed for scoping is missing or malformed
/// - `Forbidden` if the token lacks the permission for the operation
/// - `Internal` if the store fails
#[async_trait]
pub trait TodoListClientV1: Send + Sync {
    /// List the todos visible to the caller.
    ///
    /// # Errors
    /// See the trait documentation.
    async fn list_todos(&self, ctx: &SecurityContext) -> Result<Vec<Todo>, TodoListError>;

    /// Get a todo by id.
    ///
    /// # Errors
    /// `NotFound` if the todo does not exist or belongs to another owner.
    async fn get_todo(&self, ctx: &SecurityContext, id: &str) -> Result<Todo, TodoListError>;

    /// Create a todo.
    ///
    /// # Errors
    /// `Validation` for bad input, `Conflict` if the id is taken.
    async fn create_todo(
        &self,
        ctx: &SecurityContext,
        new_todo: NewTodo,
    ) -> Result<Todo, TodoListError>;

    /// Update a todo's description.
    ///
    /// # Errors
    /// `NotFound` if the todo is not visible, `Validation` for bad input.
    async fn update_todo(
        &self,
        ctx: &SecurityContext,
        id: &str,
        patch: TodoPatch,
    ) -> Result<Todo, TodoListError>;

    /// Delete a todo.
    ///
    /// # Errors
    /// `NotFound` if the todo is not visible.
    async fn delete_todo(&self, ctx: &SecurityContext, id: &str) -> Result<(), TodoListError>;
}
