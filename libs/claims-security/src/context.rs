use secrecy::SecretString;

use crate::claims::ClaimSet;
use crate::token_kind::{ClassificationError, TokenKind, classify};

/// `SecurityContext` encapsulates the security-related information for a request or operation.
///
/// Built by the `AuthN` Resolver from the verified token and passed through the request
/// lifecycle. Modules hand it to the policy enforcer to obtain an access scope.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SecurityContext {
    /// Validated claims of the presented token. Empty for anonymous requests.
    #[serde(default)]
    claims: ClaimSet,
    /// Original bearer token. Never serialized/persisted.
    /// Wrapped in `SecretString` so `Debug` redacts the value automatically.
    #[serde(skip)]
    bearer_token: Option<SecretString>,
}

impl SecurityContext {
    /// Create a new `SecurityContext` builder
    #[must_use]
    pub fn builder() -> SecurityContextBuilder {
        SecurityContextBuilder::default()
    }

    /// Create an anonymous `SecurityContext` with no claims.
    #[must_use]
    pub fn anonymous() -> Self {
        SecurityContextBuilder::default().build()
    }

    /// The validated token claims.
    #[must_use]
    pub fn claims(&self) -> &ClaimSet {
        &self.claims
    }

    /// Classify the token this context was built from.
    ///
    /// # Errors
    ///
    /// See [`classify`].
    pub fn token_kind(&self) -> Result<TokenKind, ClassificationError> {
        classify(&self.claims)
    }

    /// Get the original bearer token.
    #[must_use]
    pub fn bearer_token(&self) -> Option<&SecretString> {
        self.bearer_token.as_ref()
    }
}

#[derive(Default)]
pub struct SecurityContextBuilder {
    claims: ClaimSet,
    bearer_token: Option<SecretString>,
}

impl SecurityContextBuilder {
    #[must_use]
    pub fn claims(mut self, claims: ClaimSet) -> Self {
        self.claims = claims;
        self
    }

    #[must_use]
    pub fn bearer_token(mut self, token: impl Into<SecretString>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    #[must_use]
    pub fn build(self) -> SecurityContext {
        SecurityContext {
            claims: self.claims,
            bearer_token: self.bearer_token,
        }
    }
}
