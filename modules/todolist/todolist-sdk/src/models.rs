//! Transport-agnostic todo models.

use serde::{Deserialize, Serialize};

/// A stored todo item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: String,
    /// `oid` of the user the item belongs to.
    pub owner: String,
    pub description: String,
}

/// Data for creating a new todo.
///
/// `id` is generated when absent. `owner` is ignored for user tokens (the
/// caller's own `oid` is used) and required for application tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTodo {
    pub id: Option<String>,
    pub owner: Option<String>,
    pub description: String,
}

/// Partial update data for a todo. Identifier and owner are immutable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoPatch {
    pub description: Option<String>,
}

impl TodoPatch {
    /// Apply the patch in place.
    pub fn apply(self, todo: &mut Todo) {
        if let Some(description) = self.description {
            todo.description = description;
        }
    }
}
