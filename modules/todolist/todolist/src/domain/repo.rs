use async_trait::async_trait;
use claims_security::AccessScope;
use todolist_sdk::{Todo, TodoPatch};

use super::error::DomainError;

/// Todo persistence.
///
/// Every read and mutation by id is filtered through an [`AccessScope`]: a
/// record outside the scope behaves exactly like a missing one.
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// All records visible in `scope`, in insertion order.
    async fn list(&self, scope: &AccessScope) -> Result<Vec<Todo>, DomainError>;

    async fn find(&self, scope: &AccessScope, id: &str) -> Result<Option<Todo>, DomainError>;

    /// Store a new record. Fails with `IdAlreadyExists` if the id is taken by any owner.
    async fn insert(&self, todo: Todo) -> Result<Todo, DomainError>;

    /// Apply `patch` to the record; `None` if it is not visible in `scope`.
    async fn update(
        &self,
        scope: &AccessScope,
        id: &str,
        patch: TodoPatch,
    ) -> Result<Option<Todo>, DomainError>;

    /// Remove the record; `false` if it is not visible in `scope`.
    async fn delete(&self, scope: &AccessScope, id: &str) -> Result<bool, DomainError>;
}
