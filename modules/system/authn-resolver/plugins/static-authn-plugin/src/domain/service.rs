//! Service implementation for the static `AuthN` resolver plugin.

use std::collections::HashMap;

use authn_resolver_sdk::AuthenticationResult;
use claims_security::{ClaimSet, SecurityContext};

use super::error::ConfigError;
use crate::config::{AuthNMode, StaticAuthNPluginConfig};

/// Static `AuthN` resolver service.
///
/// Provides token-to-claims mapping based on configuration mode:
/// - `accept_all`: Any non-empty token maps to the default claims
/// - `static_tokens`: Specific tokens map to specific claims
#[derive(Debug)]
pub struct Service {
    mode: AuthNMode,
    default_claims: ClaimSet,
    token_map: HashMap<String, ClaimSet>,
}

impl Service {
    /// Create a service from plugin configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a configured claim set is malformed, a token is
    /// empty, or the same token is mapped twice.
    pub fn from_config(cfg: &StaticAuthNPluginConfig) -> Result<Self, ConfigError> {
        let default_claims =
            ClaimSet::from_json(cfg.default_claims.clone()).map_err(ConfigError::DefaultClaims)?;

        let mut token_map = HashMap::with_capacity(cfg.tokens.len());
        let mut positions: HashMap<&str, usize> = HashMap::with_capacity(cfg.tokens.len());
        for (index, mapping) in cfg.tokens.iter().enumerate() {
            if mapping.token.is_empty() {
                return Err(ConfigError::EmptyToken { index });
            }
            if let Some(&first) = positions.get(mapping.token.as_str()) {
                return Err(ConfigError::DuplicateToken { index, first });
            }
            let claims = ClaimSet::from_json(mapping.claims.clone())
                .map_err(|source| ConfigError::TokenClaims { index, source })?;

            positions.insert(&mapping.token, index);
            token_map.insert(mapping.token.clone(), claims);
        }

        Ok(Self {
            mode: cfg.mode,
            default_claims,
            token_map,
        })
    }

    #[must_use]
    pub fn mode(&self) -> AuthNMode {
        self.mode
    }

    #[must_use]
    pub fn token_count(&self) -> usize {
        self.token_map.len()
    }

    /// Authenticate a bearer token and return its claims.
    ///
    /// Returns `None` if the token is not recognized (in `static_tokens` mode)
    /// or empty.
    #[must_use]
    pub fn authenticate(&self, bearer_token: &str) -> Option<AuthenticationResult> {
        if bearer_token.is_empty() {
            return None;
        }

        let claims = match self.mode {
            AuthNMode::AcceptAll => &self.default_claims,
            AuthNMode::StaticTokens => self.token_map.get(bearer_token)?,
        };

        Some(build_result(claims, bearer_token))
    }
}

fn build_result(claims: &ClaimSet, bearer_token: &str) -> AuthenticationResult {
    let ctx = SecurityContext::builder()
        .claims(claims.clone())
        .bearer_token(bearer_token.to_owned())
        .build();

    AuthenticationResult {
        security_context: ctx,
    }
}
