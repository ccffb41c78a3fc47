//! Public API trait for the `AuthN` resolver.
//!
//! Consumers (primarily the API gateway) authenticate bearer tokens through
//! this trait. Implementations verify the token and return its claims.

use async_trait::async_trait;

use crate::error::AuthNResolverError;
use crate::models::AuthenticationResult;

/// Public API trait for the `AuthN` resolver.
///
/// ```ignore
/// let authn: Arc<dyn AuthNResolverClient> = StaticAuthNPlugin::init(&cfg)?.client();
///
/// let result = authn.authenticate("xyz...").await?;
/// let ctx = result.security_context;
/// ```
///
/// # Security
///
/// The returned `SecurityContext` keeps the original bearer token as a
/// `SecretString`; it is never logged.
#[async_trait]
pub trait AuthNResolverClient: Send + Sync {
    /// Authenticate a bearer token and return the validated identity.
    ///
    /// # Arguments
    ///
    /// * `bearer_token` - The raw bearer token string (without "Bearer " prefix)
    ///
    /// # Errors
    ///
    /// - `Unauthorized` if the token is invalid, expired, or malformed
    /// - `NoPluginAvailable` if no `AuthN` backend is configured
    /// - `ServiceUnavailable` if the backend is not ready
    /// - `Internal` for unexpected errors
    async fn authenticate(
        &self,
        bearer_token: &str,
    ) -> Result<AuthenticationResult, AuthNResolverError>;
}
