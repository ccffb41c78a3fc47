#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Claims Security
//!
//! Pure authorization primitives shared by every layer of the todo list API:
//!
//! - [`ClaimSet`] - validated, strongly typed view of a verified token's claims
//! - [`classify`] / [`TokenKind`] - user token vs. application token
//! - [`satisfies`] / [`PermissionRequirement`] - "any-of" permission matching
//!   for the delegated (`scp`) and application (`roles`) families
//! - [`SecurityContext`] - per-request identity carried through the stack
//! - [`AccessScope`] - data-access restriction handed to storage
//!
//! Nothing in this crate performs I/O or holds shared state.

pub mod access_scope;
pub mod claims;
pub mod constants;
pub mod context;
pub mod permissions;
pub mod token_kind;

pub use access_scope::AccessScope;
pub use claims::{ClaimSet, ClaimSetBuilder, ClaimsError, claim_names};
pub use context::SecurityContext;
pub use permissions::{PermissionFamily, PermissionRequirement, satisfies};
pub use token_kind::{ClassificationError, TokenKind, classify};
