#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Static `AuthN` Resolver Plugin
//!
//! This plugin provides static token-to-claims mapping for development and testing.
//! It stands in for a real identity provider: tokens are opaque strings, never
//! verified, and the claims they map to are taken from configuration.
//!
//! ## Modes
//!
//! - **`accept_all`** (default): Accepts any non-empty token, returns the configured
//!   default claims.
//!
//! - **`static_tokens`**: Maps specific tokens to specific claim sets. Useful for E2E tests
//!   with distinct users and applications.
//!
//! ## Configuration
//!
//! ```yaml
//! authn:
//!   mode: static_tokens
//!   tokens:
//!     - token: "alice"
//!       claims:
//!         scp: "Todolist.Read Todolist.ReadWrite"
//!         oid: "00000000-0000-0000-66f3-3332eca7ea81"
//!     - token: "daemon"
//!       claims:
//!         idtyp: "app"
//!         roles: ["Todolist.ReadWrite.All"]
//! ```

pub mod config;
pub mod domain;
pub mod module;

pub use config::{AuthNMode, StaticAuthNPluginConfig, TokenMapping};
pub use domain::ConfigError;
pub use module::StaticAuthNPlugin;
