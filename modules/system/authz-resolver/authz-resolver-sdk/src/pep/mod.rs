//! PEP (Policy Enforcement Point) helpers.
//!
//! - [`PolicyEnforcer`] - classify the token, pick the permission lists, match
//! - [`EnforcerError`] - denial, unclassifiable token or malformed claims

pub mod enforcer;

pub use enforcer::{DenyReason, EnforcerError, PolicyEnforcer};
