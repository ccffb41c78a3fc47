//! Configuration for the static `AuthN` resolver plugin.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use claims_security::constants::DEFAULT_OBJECT_ID;

/// Plugin configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StaticAuthNPluginConfig {
    /// Authentication mode.
    pub mode: AuthNMode,

    /// Claims returned in `accept_all` mode. Raw JSON, validated at startup.
    pub default_claims: Value,

    /// Static token-to-claims mappings for `static_tokens` mode.
    pub tokens: Vec<TokenMapping>,
}

impl Default for StaticAuthNPluginConfig {
    fn default() -> Self {
        Self {
            mode: AuthNMode::AcceptAll,
            default_claims: default_claims(),
            tokens: Vec::new(),
        }
    }
}

/// Authentication mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AuthNMode {
    /// Accept any non-empty token and return the default claims.
    #[default]
    AcceptAll,
    /// Map specific tokens to specific claim sets.
    StaticTokens,
}

/// Maps a static token to the claims it carries.
#[derive(Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TokenMapping {
    /// The bearer token value to match.
    pub token: String,
    /// Raw claims returned when this token is presented.
    pub claims: Value,
}

impl std::fmt::Debug for TokenMapping {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenMapping")
            .field("token", &"[REDACTED]")
            .field("claims", &self.claims)
            .finish()
    }
}

/// Development identity: a signed-in user holding every delegated permission.
fn default_claims() -> Value {
    json!({
        "idtyp": "user",
        "scp": "Todolist.Read Todolist.ReadWrite",
        "oid": DEFAULT_OBJECT_ID,
    })
}
