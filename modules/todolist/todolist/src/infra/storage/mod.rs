//! Todo repositories.
//!
//! Both stores keep a plain `Vec<Todo>` and share the scoped table operations
//! below, so they agree on visibility and conflict rules.

pub mod json_file;
pub mod memory;

use claims_security::AccessScope;
use todolist_sdk::{Todo, TodoPatch};

use crate::domain::error::DomainError;

pub use json_file::JsonFileTodoRepository;
pub use memory::InMemoryTodoRepository;

fn list_scoped(todos: &[Todo], scope: &AccessScope) -> Vec<Todo> {
    todos
        .iter()
        .filter(|t| scope.permits_owner(&t.owner))
        .cloned()
        .collect()
}

fn position_scoped(todos: &[Todo], scope: &AccessScope, id: &str) -> Option<usize> {
    todos
        .iter()
        .position(|t| t.id == id && scope.permits_owner(&t.owner))
}

fn find_scoped(todos: &[Todo], scope: &AccessScope, id: &str) -> Option<Todo> {
    todos
        .iter()
        .find(|t| t.id == id && scope.permits_owner(&t.owner))
        .cloned()
}

fn insert_unique(todos: &mut Vec<Todo>, todo: Todo) -> Result<Todo, DomainError> {
    // Ids are unique across owners, not per owner.
    if todos.iter().any(|t| t.id == todo.id) {
        return Err(DomainError::id_already_exists(todo.id));
    }
    todos.push(todo.clone());
    Ok(todo)
}

fn update_scoped(
    todos: &mut [Todo],
    scope: &AccessScope,
    id: &str,
    patch: TodoPatch,
) -> Option<Todo> {
    let todo = todos
        .iter_mut()
        .find(|t| t.id == id && scope.permits_owner(&t.owner))?;
    patch.apply(todo);
    Some(todo.clone())
}

fn delete_scoped(todos: &mut Vec<Todo>, scope: &AccessScope, id: &str) -> bool {
    let Some(idx) = position_scoped(todos, scope, id) else {
        return false;
    };
    todos.remove(idx);
    true
}
