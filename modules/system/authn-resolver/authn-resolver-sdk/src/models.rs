//! Domain models for the `AuthN` resolver.

use claims_security::SecurityContext;

/// Result of a successful authentication.
#[derive(Debug, Clone)]
pub struct AuthenticationResult {
    /// The validated security context.
    ///
    /// Contains:
    /// - `claims` - the verified token's claims, already validated into a `ClaimSet`
    /// - `bearer_token` - original token, redacted in `Debug` and never serialized
    pub security_context: SecurityContext,
}
