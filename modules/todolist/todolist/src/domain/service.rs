use std::sync::Arc;

use authz_resolver_sdk::{Action, PolicyEnforcer};
use claims_security::{AccessScope, SecurityContext};
use todolist_sdk::{NewTodo, Todo, TodoPatch};
use tracing::instrument;

use super::error::DomainError;
use super::repo::TodoRepository;

// ============================================================================
// Service Configuration
// ============================================================================

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub max_description_length: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            max_description_length: 1024,
        }
    }
}

// ============================================================================
// Service Implementation
// ============================================================================

/// Todo list service.
///
/// Every operation asks the [`PolicyEnforcer`] for an [`AccessScope`] first
/// and hands that scope to the repository; nothing reaches storage on denial.
pub struct Service {
    repo: Arc<dyn TodoRepository>,
    policy_enforcer: PolicyEnforcer,
    config: ServiceConfig,
}

impl Service {
    #[must_use]
    pub fn new(
        repo: Arc<dyn TodoRepository>,
        policy_enforcer: PolicyEnforcer,
        config: ServiceConfig,
    ) -> Self {
        Self {
            repo,
            policy_enforcer,
            config,
        }
    }

    /// # Errors
    /// Authorization or storage failures.
    #[instrument(skip(self, ctx))]
    pub async fn list_todos(&self, ctx: &SecurityContext) -> Result<Vec<Todo>, DomainError> {
        let scope = self.policy_enforcer.access_scope(ctx, Action::List)?;

        let todos = self.repo.list(&scope).await?;
        tracing::debug!(scope = %scope, count = todos.len(), "Listed todos");
        Ok(todos)
    }

    /// # Errors
    /// `NotFound` when the todo is missing or outside the caller's scope.
    #[instrument(skip(self, ctx, id), fields(todo.id = %id))]
    pub async fn get_todo(&self, ctx: &SecurityContext, id: &str) -> Result<Todo, DomainError> {
        let scope = self.policy_enforcer.access_scope(ctx, Action::Get)?;

        self.repo
            .find(&scope, id)
            .await?
            .ok_or_else(|| DomainError::not_found(id))
    }

    /// # Errors
    /// Authorization, validation, conflict or storage failures.
    #[instrument(skip(self, ctx, new_todo))]
    pub async fn create_todo(
        &self,
        ctx: &SecurityContext,
        new_todo: NewTodo,
    ) -> Result<Todo, DomainError> {
        let scope = self.policy_enforcer.access_scope(ctx, Action::Create)?;

        let NewTodo {
            id,
            owner,
            description,
        } = new_todo;

        let owner = match scope {
            AccessScope::Owner(oid) => oid,
            AccessScope::All => owner
                .filter(|o| !o.trim().is_empty())
                .ok_or_else(|| {
                    DomainError::validation("owner", "is required for application tokens")
                })?,
        };
        self.validate_description(&description)?;

        let id = match id {
            Some(id) if id.trim().is_empty() => return Err(DomainError::EmptyId),
            Some(id) => id,
            None => uuid::Uuid::new_v4().to_string(),
        };

        let todo = self
            .repo
            .insert(Todo {
                id,
                owner,
                description,
            })
            .await?;

        tracing::info!(todo.id = %todo.id, "Created todo");
        Ok(todo)
    }

    /// # Errors
    /// `NotFound` when the todo is missing or outside the caller's scope.
    #[instrument(skip(self, ctx, id, patch), fields(todo.id = %id))]
    pub async fn update_todo(
        &self,
        ctx: &SecurityContext,
        id: &str,
        patch: TodoPatch,
    ) -> Result<Todo, DomainError> {
        let scope = self.policy_enforcer.access_scope(ctx, Action::Update)?;

        if let Some(description) = &patch.description {
            self.validate_description(description)?;
        }

        let todo = self
            .repo
            .update(&scope, id, patch)
            .await?
            .ok_or_else(|| DomainError::not_found(id))?;

        tracing::info!("Updated todo");
        Ok(todo)
    }

    /// # Errors
    /// `NotFound` when the todo is missing or outside the caller's scope.
    #[instrument(skip(self, ctx, id), fields(todo.id = %id))]
    pub async fn delete_todo(&self, ctx: &SecurityContext, id: &str) -> Result<(), DomainError> {
        let scope = self.policy_enforcer.access_scope(ctx, Action::Delete)?;

        if !self.repo.delete(&scope, id).await? {
            return Err(DomainError::not_found(id));
        }

        tracing::info!("Deleted todo");
        Ok(())
    }

    fn validate_description(&self, description: &str) -> Result<(), DomainError> {
        if description.trim().is_empty() {
            return Err(DomainError::EmptyDescription);
        }
        let len = description.chars().count();
        if len > self.config.max_description_length {
            return Err(DomainError::description_too_long(
                len,
                self.config.max_description_length,
            ));
        }
        Ok(())
    }
}
