use std::sync::Arc;

use async_trait::async_trait;
use claims_security::SecurityContext;
use todolist_sdk::{NewTodo, Todo, TodoListClientV1, TodoListError, TodoPatch};

use super::service::Service;

/// In-process [`TodoListClientV1`] backed by the domain service.
pub struct LocalClient {
    service: Arc<Service>,
}

impl LocalClient {
    #[must_use]
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl TodoListClientV1 for LocalClient {
    async fn list_todos(&self, ctx: &SecurityContext) -> Result<Vec<Todo>, TodoListError> {
        self.service.list_todos(ctx).await.map_err(Into::into)
    }

    async fn get_todo(&self, ctx: &SecurityContext, id: &str) -> Result<Todo, TodoListError> {
        self.service.get_todo(ctx, id).await.map_err(Into::into)
    }

    async fn create_todo(
        &self,
        ctx: &SecurityContext,
        new_todo: NewTodo,
    ) -> Result<Todo, TodoListError> {
        self.service
            .create_todo(ctx, new_todo)
            .await
            .map_err(Into::into)
    }

    async fn update_todo(
        &self,
        ctx: &SecurityContext,
        id: &str,
        patch: TodoPatch,
    ) -> Result<Todo, TodoListError> {
        self.service
            .update_todo(ctx, id, patch)
            .await
            .map_err(Into::into)
    }

    async fn delete_todo(&self, ctx: &SecurityContext, id: &str) -> Result<(), TodoListError> {
        self.service.delete_todo(ctx, id).await.map_err(Into::into)
    }
}
