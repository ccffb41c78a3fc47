use std::time::Duration;

use anyhow::{Context, Result, bail};
use axum::http::{HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer};

use crate::config::{ApiGatewayConfig, CorsConfig};

/// Build the CORS layer from config; a missing `cors` section means permissive defaults.
///
/// # Errors
///
/// Returns an error if an origin, method or header does not parse, or if
/// credentials are combined with a `*` entry.
pub fn build_cors_layer(cfg: &ApiGatewayConfig) -> Result<CorsLayer> {
    let cors = cfg.cors.clone().unwrap_or_default();
    from_cors_config(&cors)
}

fn is_wildcard(values: &[String]) -> bool {
    values.iter().any(|v| v == "*")
}

fn parse_all<T>(
    kind: &str,
    values: &[String],
    parse: impl Fn(&str) -> Option<T>,
) -> Result<Vec<T>> {
    values
        .iter()
        .map(|v| parse(v).with_context(|| format!("invalid CORS {kind} '{v}'")))
        .collect()
}

fn from_cors_config(cors: &CorsConfig) -> Result<CorsLayer> {
    if cors.allow_credentials {
        for (kind, values) in [
            ("allowed_origins", &cors.allowed_origins),
            ("allowed_methods", &cors.allowed_methods),
            ("allowed_headers", &cors.allowed_headers),
        ] {
            if is_wildcard(values) {
                bail!("CORS allow_credentials cannot be combined with '*' in {kind}");
            }
        }
    }

    let origins = if is_wildcard(&cors.allowed_origins) {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(parse_all("origin", &cors.allowed_origins, |o| {
            HeaderValue::from_str(o).ok()
        })?)
    };

    let methods = if is_wildcard(&cors.allowed_methods) {
        AllowMethods::from(Any)
    } else {
        AllowMethods::list(parse_all("method", &cors.allowed_methods, |m| {
            Method::from_bytes(m.as_bytes()).ok()
        })?)
    };

    let headers = if is_wildcard(&cors.allowed_headers) {
        AllowHeaders::from(Any)
    } else {
        AllowHeaders::list(parse_all("header", &cors.allowed_headers, |h| {
            HeaderName::from_bytes(h.as_bytes()).ok()
        })?)
    };

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(methods)
        .allow_headers(headers)
        .allow_credentials(cors.allow_credentials)
        .max_age(Duration::from_secs(cors.max_age_seconds)))
}
