//! API Gateway definition
//!
//! Owns the HTTP server: wraps the application router with the shared
//! middleware stack and serves it until cancelled.

use std::collections::HashSet;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::http::{HeaderName, Method};
use axum::middleware::from_fn_with_state;
use axum::{Router, extract::DefaultBodyLimit, routing::get};
use tokio_util::sync::CancellationToken;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
};

use authn_resolver_sdk::AuthNResolverClient;

use crate::auth;
use crate::config::ApiGatewayConfig;
use crate::web;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// HTTP host for the todo list API.
pub struct ApiGateway {
    config: ApiGatewayConfig,
    authn_client: Arc<dyn AuthNResolverClient>,
    authenticated_routes: HashSet<(Method, String)>,
    public_routes: HashSet<(Method, String)>,
}

impl ApiGateway {
    #[must_use]
    pub fn new(config: ApiGatewayConfig, authn_client: Arc<dyn AuthNResolverClient>) -> Self {
        let enable_docs = config.enable_docs;
        let mut gateway = Self {
            config,
            authn_client,
            authenticated_routes: HashSet::new(),
            public_routes: HashSet::new(),
        };

        // Built-in routes are always public
        gateway.register_public(Method::GET, "/health");
        if enable_docs {
            gateway.register_public(Method::GET, "/openapi.json");
        }
        gateway
    }

    #[must_use]
    pub fn config(&self) -> &ApiGatewayConfig {
        &self.config
    }

    /// Mark `(method, path)` as requiring a bearer token regardless of the default.
    pub fn register_authenticated(&mut self, method: Method, path: impl Into<String>) {
        let path = path.into();
        tracing::debug!(method = %method, path = %path, "Registered authenticated route");
        self.authenticated_routes.insert((method, path));
    }

    /// Mark `(method, path)` as reachable without a bearer token.
    fn register_public(&mut self, method: Method, path: impl Into<String>) {
        let path = path.into();
        tracing::debug!(method = %method, path = %path, "Registered public route");
        self.public_routes.insert((method, path));
    }

    /// Apply all middleware layers to a router.
    fn apply_middleware_stack(&self, mut router: Router) -> Result<Router> {
        let route_policy = auth::RoutePolicy::build(
            self.authenticated_routes.clone(),
            self.public_routes.clone(),
            self.config.require_auth_by_default,
        )?;

        // The last layer added runs first. Request order, outermost first:
        // SetRequestId, PropagateRequestId, Trace, Timeout, BodyLimit, CORS, Auth, Router.

        // 5) Auth
        let auth_state = auth::AuthState {
            authn_client: Arc::clone(&self.authn_client),
            route_policy,
        };
        router = router.layer(from_fn_with_state(auth_state, auth::authn_middleware));

        // 4) CORS (must be outer to auth so OPTIONS preflight short-circuits)
        if self.config.cors_enabled {
            router = router.layer(crate::cors::build_cors_layer(&self.config)?);
        }

        // 3) Body limit
        let body_limit = self.config.defaults.body_limit_bytes;
        router = router.layer(RequestBodyLimitLayer::new(body_limit));
        router = router.layer(DefaultBodyLimit::max(body_limit));

        // 2) Timeout
        router = router.layer(TimeoutLayer::with_status_code(
            axum::http::StatusCode::GATEWAY_TIMEOUT,
            Duration::from_secs(self.config.defaults.request_timeout_secs),
        ));

        // 1) Trace
        router = router.layer({
            use tower_http::trace::TraceLayer;
            use tracing::field::Empty;

            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<axum::body::Body>| {
                    let rid = req
                        .headers()
                        .get(REQUEST_ID_HEADER)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("n/a");

                    tracing::info_span!(
                        "http_request",
                        method = %req.method(),
                        uri = %req.uri().path(),
                        version = ?req.version(),
                        request_id = %rid,
                        status = Empty,
                        latency_ms = Empty,
                    )
                })
                .on_response(
                    |res: &axum::http::Response<axum::body::Body>,
                     latency: Duration,
                     span: &tracing::Span| {
                        span.record("status", res.status().as_u16());
                        span.record("latency_ms", latency.as_millis());
                    },
                )
        });

        // 0) Request ID handling: generate x-request-id if missing, then echo it on the response.
        let x_request_id = HeaderName::from_static(REQUEST_ID_HEADER);
        router = router.layer(PropagateRequestIdLayer::new(x_request_id.clone()));
        router = router.layer(SetRequestIdLayer::new(x_request_id, MakeRequestUuid));

        Ok(router)
    }

    /// Build the served router: built-in routes, `app` and the middleware stack.
    ///
    /// `openapi` is served at `/openapi.json` when docs are enabled.
    ///
    /// # Errors
    /// Returns an error if the registered route patterns conflict.
    pub fn build_router(
        &self,
        app: Router,
        openapi: Option<utoipa::openapi::OpenApi>,
    ) -> Result<Router> {
        let mut router = Router::new()
            .route("/health", get(web::health_check))
            .merge(app);

        if let Some(mut doc) = openapi.filter(|_| self.config.enable_docs) {
            doc.info.title.clone_from(&self.config.openapi.title);
            doc.info.version.clone_from(&self.config.openapi.version);
            doc.info
                .description
                .clone_from(&self.config.openapi.description);
            let doc = Arc::new(doc);
            tracing::info!(
                paths = doc.paths.paths.len(),
                "Serving OpenAPI document at /openapi.json"
            );
            router = router.route(
                "/openapi.json",
                get(move || {
                    let doc = Arc::clone(&doc);
                    async move { web::openapi_json(&doc) }
                }),
            );
        }

        self.apply_middleware_stack(router)
    }

    /// Parse bind address from configuration string.
    fn parse_bind_address(bind_addr: &str) -> Result<SocketAddr> {
        bind_addr
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid bind address '{bind_addr}': {e}"))
    }

    /// Bind the configured address and serve `router` until `cancel` fires.
    ///
    /// # Errors
    /// Returns an error if the address is invalid, cannot be bound, or the server fails.
    pub async fn serve(&self, router: Router, cancel: CancellationToken) -> Result<()> {
        let addr = Self::parse_bind_address(&self.config.bind_addr)?;

        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("HTTP server bound on {}", listener.local_addr()?);

        // Graceful shutdown on cancel
        let shutdown = async move {
            cancel.cancelled().await;
            tracing::info!("HTTP server shutting down gracefully (cancellation)");
        };

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| anyhow::anyhow!(e))
    }
}
