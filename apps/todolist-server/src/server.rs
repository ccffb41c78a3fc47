//! Wires configuration into the gateway, the authn plugin and the todo list module.

use anyhow::Context;
use api_gateway::ApiGateway;
use axum::Router;
use static_authn_plugin::StaticAuthNPlugin;
use todolist::TodoListModule;
use tokio_util::sync::CancellationToken;

use crate::config::AppConfig;

pub struct Server {
    gateway: ApiGateway,
    router: Router,
}

impl Server {
    /// # Errors
    /// Returns an error if any section of `cfg` is rejected by its component.
    pub fn build(cfg: &AppConfig) -> anyhow::Result<Self> {
        let authn = StaticAuthNPlugin::init(&cfg.authn).context("invalid authn configuration")?;
        let todolist = TodoListModule::init(&cfg.todolist)?;

        let mut gateway = ApiGateway::new(cfg.server.clone(), authn.client());
        let router = todolist.register_rest(&mut gateway, Router::new());
        let router = gateway.build_router(router, Some(todolist.openapi()))?;

        Ok(Self { gateway, router })
    }

    #[cfg(test)]
    fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve until `cancel` fires.
    ///
    /// # Errors
    /// Returns an error if the listener cannot be bound or the server fails.
    pub async fn run(self, cancel: CancellationToken) -> anyhow::Result<()> {
        self.gateway.serve(self.router, cancel).await
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    use super::*;

    async fn get(server: &Server, uri: &str, token: Option<&str>) -> StatusCode {
        let mut request = Request::builder().uri(uri);
        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        server
            .router()
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn default_config_serves_todolist_with_dev_identity() {
        let server = Server::build(&AppConfig::default()).unwrap();

        assert_eq!(get(&server, "/health", None).await, StatusCode::OK);
        assert_eq!(get(&server, "/api/todolist", None).await, StatusCode::UNAUTHORIZED);
        assert_eq!(
            get(&server, "/api/todolist", Some("anything")).await,
            StatusCode::OK
        );
        assert_eq!(
            get(&server, "/openapi.json", Some("anything")).await,
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn malformed_authn_claims_fail_startup() {
        let mut cfg = AppConfig::default();
        cfg.authn.default_claims = serde_json::json!(["not", "an", "object"]);

        assert!(Server::build(&cfg).is_err());
    }
}
