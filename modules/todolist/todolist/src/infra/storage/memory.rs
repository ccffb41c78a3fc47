use async_trait::async_trait;
use claims_security::AccessScope;
use parking_lot::RwLock;
use todolist_sdk::{Todo, TodoPatch};

use crate::domain::error::DomainError;
use crate::domain::repo::TodoRepository;

/// Process-local store; contents are lost on restart.
#[derive(Default)]
pub struct InMemoryTodoRepository {
    todos: RwLock<Vec<Todo>>,
}

impl InMemoryTodoRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `todos`.
    #[must_use]
    pub fn with_todos(todos: Vec<Todo>) -> Self {
        Self {
            todos: RwLock::new(todos),
        }
    }
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
    async fn list(&self, scope: &AccessScope) -> Result<Vec<Todo>, DomainError> {
        Ok(super::list_scoped(&self.todos.read(), scope))
    }

    async fn find(&self, scope: &AccessScope, id: &str) -> Result<Option<Todo>, DomainError> {
        Ok(super::find_scoped(&self.todos.read(), scope, id))
    }

    async fn insert(&self, todo: Todo) -> Result<Todo, DomainError> {
        super::insert_unique(&mut self.todos.write(), todo)
    }

    async fn update(
        &self,
        scope: &AccessScope,
        id: &str,
        patch: TodoPatch,
    ) -> Result<Option<Todo>, DomainError> {
        Ok(super::update_scoped(&mut self.todos.write(), scope, id, patch))
    }

    async fn delete(&self, scope: &AccessScope, id: &str) -> Result<bool, DomainError> {
        Ok(super::delete_scoped(&mut self.todos.write(), scope, id))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn todo(id: &str, owner: &str) -> Todo {
        Todo {
            id: id.to_owned(),
            owner: owner.to_owned(),
            description: format!("{owner}'s {id}"),
        }
    }

    fn seeded() -> InMemoryTodoRepository {
        InMemoryTodoRepository::with_todos(vec![
            todo("1", "alice"),
            todo("2", "bob"),
            todo("3", "alice"),
        ])
    }

    #[tokio::test]
    async fn owner_scope_filters_list() {
        let repo = seeded();

        let alice = repo.list(&AccessScope::for_owner("alice")).await.unwrap();
        assert_eq!(
            alice.iter().map(|t| t.id.as_str()).collect::<Vec<_>>(),
            ["1", "3"]
        );

        let all = repo.list(&AccessScope::allow_all()).await.unwrap();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn other_owners_records_look_missing() {
        let repo = seeded();
        let alice = AccessScope::for_owner("alice");

        assert!(repo.find(&alice, "2").await.unwrap().is_none());
        assert!(
            repo.update(
                &alice,
                "2",
                TodoPatch {
                    description: Some("hijacked".to_owned())
                }
            )
            .await
            .unwrap()
            .is_none()
        );
        assert!(!repo.delete(&alice, "2").await.unwrap());

        let bobs = repo.find(&AccessScope::allow_all(), "2").await.unwrap();
        assert_eq!(bobs.unwrap().description, "bob's 2");
    }

    #[tokio::test]
    async fn duplicate_id_conflicts_across_owners() {
        let repo = seeded();

        let err = repo.insert(todo("2", "alice")).await.unwrap_err();
        assert_eq!(err, DomainError::id_already_exists("2"));
    }

    #[tokio::test]
    async fn delete_removes_only_the_target() {
        let repo = seeded();

        assert!(repo.delete(&AccessScope::allow_all(), "1").await.unwrap());
        let left = repo.list(&AccessScope::allow_all()).await.unwrap();
        assert_eq!(
            left.iter().map(|t| t.id.as_str()).collect::<Vec<_>>(),
            ["2", "3"]
        );
    }
}
