//! `AuthN` Resolver SDK
//!
//! This crate provides the public API of the authentication collaborator:
//!
//! - [`AuthNResolverClient`] - trait the HTTP layer calls with a bearer token
//! - [`AuthenticationResult`] - authentication result model
//! - [`AuthNResolverError`] - error types
//!
//! ## Usage
//!
//! ```ignore
//! use authn_resolver_sdk::AuthNResolverClient;
//!
//! let result = authn.authenticate("eyJ0eXAi...").await?;
//! let security_context = result.security_context;
//! ```

pub mod api;
pub mod error;
pub mod models;

// Re-export main types at crate root
pub use api::AuthNResolverClient;
pub use error::AuthNResolverError;
pub use models::AuthenticationResult;
