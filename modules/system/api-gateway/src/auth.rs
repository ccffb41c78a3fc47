//! Bearer authentication in front of the application router.
//!
//! Each request is classified by [`RoutePolicy`] as public or bearer-protected.
//! Protected requests must carry `Authorization: Bearer <token>`; the token is
//! handed to the [`AuthNResolverClient`] and the resulting [`SecurityContext`]
//! is stored in the request extensions for handlers to extract.

use std::collections::{HashMap, HashSet};
use std::hash::BuildHasher;
use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{HeaderMap, Method, StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use authn_resolver_sdk::{AuthNResolverClient, AuthNResolverError};
use claims_security::SecurityContext;

use crate::problem::Problem;

const BEARER_PREFIX: &str = "Bearer ";

/// Route patterns (axum `{param}` syntax) grouped by method.
#[derive(Clone, Default)]
struct RouteTable {
    by_method: HashMap<Method, matchit::Router<()>>,
}

impl RouteTable {
    fn from_routes<S: BuildHasher>(
        routes: HashSet<(Method, String), S>,
        kind: &str,
    ) -> anyhow::Result<Self> {
        let mut table = Self::default();
        for (method, pattern) in routes {
            table
                .by_method
                .entry(method)
                .or_insert_with(matchit::Router::new)
                .insert(pattern.as_str(), ())
                .map_err(|e| anyhow::anyhow!("{kind} route '{pattern}' conflicts: {e}"))?;
        }
        Ok(table)
    }

    fn contains(&self, method: &Method, path: &str) -> bool {
        self.by_method
            .get(method)
            .is_some_and(|router| router.at(path).is_ok())
    }
}

/// What the middleware demands from a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRequirement {
    /// Served with an anonymous context.
    Public,
    /// Needs a valid bearer token.
    Bearer,
}

/// Decides which requests need a bearer token.
///
/// Explicitly authenticated routes always do. Other routes do when
/// `require_auth_by_default` is set, unless registered as public.
#[derive(Clone)]
pub struct RoutePolicy {
    authenticated: Arc<RouteTable>,
    public: Arc<RouteTable>,
    require_auth_by_default: bool,
}

impl RoutePolicy {
    /// # Errors
    ///
    /// Returns an error if two patterns registered for the same method conflict.
    pub fn build<S: BuildHasher>(
        authenticated: HashSet<(Method, String), S>,
        public: HashSet<(Method, String), S>,
        require_auth_by_default: bool,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            authenticated: Arc::new(RouteTable::from_routes(authenticated, "authenticated")?),
            public: Arc::new(RouteTable::from_routes(public, "public")?),
            require_auth_by_default,
        })
    }

    #[must_use]
    pub fn requirement(&self, method: &Method, path: &str) -> AuthRequirement {
        if self.authenticated.contains(method, path) {
            return AuthRequirement::Bearer;
        }
        if self.require_auth_by_default && !self.public.contains(method, path) {
            return AuthRequirement::Bearer;
        }
        AuthRequirement::Public
    }
}

/// State of [`authn_middleware`].
#[derive(Clone)]
pub struct AuthState {
    pub authn_client: Arc<dyn AuthNResolverClient>,
    pub route_policy: RoutePolicy,
}

/// Resolve the caller's [`SecurityContext`] or answer with a problem document.
///
/// CORS preflight requests pass through untouched.
pub async fn authn_middleware(
    State(state): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Response {
    if is_preflight_request(req.method(), req.headers()) {
        return next.run(req).await;
    }

    if state.route_policy.requirement(req.method(), req.uri().path()) == AuthRequirement::Public {
        req.extensions_mut().insert(SecurityContext::anonymous());
        return next.run(req).await;
    }

    let path = req.uri().path().to_owned();
    let Some(token) = extract_bearer_token(req.headers()) else {
        tracing::debug!(path = %path, "Request without bearer token");
        return Problem::unauthorized("Missing or invalid Authorization header")
            .with_instance(path)
            .into_response();
    };

    match state.authn_client.authenticate(token).await {
        Ok(result) => {
            req.extensions_mut().insert(result.security_context);
            next.run(req).await
        }
        Err(err) => authn_rejection(&err).with_instance(path).into_response(),
    }
}

/// Problem for a failed token resolution. Resolver details stay in the logs.
fn authn_rejection(err: &AuthNResolverError) -> Problem {
    match err {
        AuthNResolverError::Unauthorized(reason) => {
            tracing::debug!(reason = %reason, "Bearer token rejected");
            Problem::unauthorized("Authentication failed")
        }
        AuthNResolverError::NoPluginAvailable | AuthNResolverError::ServiceUnavailable(_) => {
            tracing::error!(error = %err, "Authentication service unavailable");
            Problem::new(
                StatusCode::SERVICE_UNAVAILABLE,
                "Service Unavailable",
                "Authentication service unavailable",
            )
        }
        AuthNResolverError::Internal(_) => {
            tracing::error!(error = %err, "Authentication failed internally");
            Problem::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error",
                "Internal authentication error",
            )
        }
    }
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix(BEARER_PREFIX)?.trim();
    (!token.is_empty()).then_some(token)
}

fn is_preflight_request(method: &Method, headers: &HeaderMap) -> bool {
    *method == Method::OPTIONS
        && headers.contains_key(header::ORIGIN)
        && headers.contains_key(header::ACCESS_CONTROL_REQUEST_METHOD)
}
