#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! API Gateway
//!
//! HTTP host for the todo list service: resolves bearer tokens into a
//! [`claims_security::SecurityContext`], renders errors as RFC 9457
//! [`Problem`] documents and applies the request-id, tracing, timeout,
//! body-limit and CORS layers.

pub mod auth;
pub mod config;
pub mod cors;
pub mod module;
pub mod problem;
pub mod web;

pub use config::{ApiGatewayConfig, CorsConfig, Defaults, OpenApiConfig};
pub use module::ApiGateway;
pub use problem::{APPLICATION_PROBLEM_JSON, ApiResult, Problem};
