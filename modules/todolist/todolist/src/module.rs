use std::sync::Arc;

use api_gateway::ApiGateway;
use authz_resolver_sdk::PolicyEnforcer;
use axum::Router;
use todolist_sdk::TodoListClientV1;
use tracing::info;

use crate::api::rest::routes;
use crate::config::{StorageConfig, TodoListConfig};
use crate::domain::local_client::LocalClient;
use crate::domain::repo::TodoRepository;
use crate::domain::service::{Service, ServiceConfig};
use crate::infra::storage::{InMemoryTodoRepository, JsonFileTodoRepository};

/// Todo list module: service, in-process client and REST routes.
pub struct TodoListModule {
    service: Arc<Service>,
    endpoint: String,
}

impl TodoListModule {
    /// Build the module with the repository selected by `cfg.storage`.
    ///
    /// # Errors
    /// Returns an error if the configured endpoint is not an absolute path.
    pub fn init(cfg: &TodoListConfig) -> anyhow::Result<Self> {
        let repo: Arc<dyn TodoRepository> = match &cfg.storage {
            StorageConfig::Memory => {
                info!("Todo list storage: in-memory");
                Arc::new(InMemoryTodoRepository::new())
            }
            StorageConfig::JsonFile { path } => {
                info!(path = %path.display(), "Todo list storage: JSON file");
                Arc::new(JsonFileTodoRepository::new(path))
            }
        };
        Self::with_repository(cfg, repo)
    }

    /// Build the module around an existing repository.
    ///
    /// # Errors
    /// Returns an error if the configured endpoint is not an absolute path.
    pub fn with_repository(
        cfg: &TodoListConfig,
        repo: Arc<dyn TodoRepository>,
    ) -> anyhow::Result<Self> {
        let endpoint = cfg.protected_route.endpoint.trim_end_matches('/');
        if !endpoint.starts_with('/') {
            anyhow::bail!(
                "todolist endpoint must be an absolute path, got '{}'",
                cfg.protected_route.endpoint
            );
        }

        let policy_enforcer = PolicyEnforcer::new(cfg.protected_route.clone());
        let service_config = ServiceConfig {
            max_description_length: cfg.max_description_length,
        };
        let service = Arc::new(Service::new(repo, policy_enforcer, service_config));

        info!(endpoint, "Todo list module initialized");
        Ok(Self {
            service,
            endpoint: endpoint.to_owned(),
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    #[must_use]
    pub fn service(&self) -> Arc<Service> {
        Arc::clone(&self.service)
    }

    /// In-process client for other modules.
    #[must_use]
    pub fn client(&self) -> Arc<dyn TodoListClientV1> {
        Arc::new(LocalClient::new(self.service()))
    }

    /// Mount the REST routes on `router` and mark them authenticated on `gateway`.
    #[must_use]
    pub fn register_rest(&self, gateway: &mut ApiGateway, router: Router) -> Router {
        for (method, path) in routes::authenticated_routes(&self.endpoint) {
            gateway.register_authenticated(method, path);
        }
        let router = routes::register_routes(router, &self.endpoint, self.service());
        info!("Todo list REST routes registered");
        router
    }

    /// `OpenAPI` document of the mounted routes.
    #[must_use]
    pub fn openapi(&self) -> utoipa::openapi::OpenApi {
        routes::openapi(&self.endpoint)
    }
}
