#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! `AuthZ` Resolver SDK
//!
//! Authorization for the todo list routes:
//!
//! - [`ProtectedRouteConfig`], [`PermissionSet`] - immutable per-route permission lists
//! - [`Action`], [`Access`] - CRUD operations and the `read` / `write` list they consult
//! - [`pep`] - PEP helpers ([`PolicyEnforcer`], [`EnforcerError`])
//!
//! ## Usage
//!
//! ```ignore
//! use authz_resolver_sdk::{Action, PolicyEnforcer, ProtectedRouteConfig};
//!
//! // Create an enforcer (once, during init)
//! let enforcer = PolicyEnforcer::new(ProtectedRouteConfig::default());
//!
//! // list / get / update / delete: exclusive by token kind
//! let scope = enforcer.authorize_exclusive(&ctx, Action::Get)?;
//!
//! // create: delegated OR application write permission
//! let scope = enforcer.authorize_any_family(&ctx, Action::Create)?;
//! ```

pub mod models;
pub mod pep;

// Re-export main types at crate root
pub use models::{Access, Action, PermissionSet, ProtectedRouteConfig, Strategy};
pub use pep::{DenyReason, EnforcerError, PolicyEnforcer};
