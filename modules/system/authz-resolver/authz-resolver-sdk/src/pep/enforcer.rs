//! Policy Enforcement Point (`PEP`) object.
//!
//! [`PolicyEnforcer`] encapsulates the full PEP flow:
//! classify the token → select the route's permission lists → match →
//! yield an `AccessScope` for storage.
//!
//! Constructed once during service initialisation with the route's
//! [`ProtectedRouteConfig`]. Pure: no I/O, no shared mutable state.

use std::fmt;
use std::sync::Arc;

use claims_security::{
    AccessScope, ClaimsError, ClassificationError, PermissionFamily, SecurityContext, TokenKind,
    satisfies,
};
use tracing::debug;

use crate::models::{Action, ProtectedRouteConfig, Strategy};

/// Why the matcher refused an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// Exclusive strategy: the family matching the token kind was not satisfied.
    MissingPermission(TokenKind),
    /// Any-family strategy: neither family was satisfied.
    NoFamilySatisfied,
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingPermission(TokenKind::User) => {
                f.write_str("user does not have the required permissions")
            }
            Self::MissingPermission(TokenKind::Application) => {
                f.write_str("application does not have the required permissions")
            }
            Self::NoFamilySatisfied => {
                f.write_str("user or application does not have the required permissions")
            }
        }
    }
}

/// Error from the PEP enforcement flow.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnforcerError {
    /// The claims do not grant the operation.
    #[error("{action}: {reason}")]
    Denied { action: Action, reason: DenyReason },

    /// The token carries none of the claims that tell a user from an application.
    #[error(transparent)]
    Unclassifiable(#[from] ClassificationError),

    /// A claim required for scoping is missing.
    #[error(transparent)]
    MalformedClaims(#[from] ClaimsError),
}

/// Policy Enforcement Point.
///
/// Holds the immutable permission configuration of one protected route.
/// Cloneable and cheap to pass around (`Arc` inside).
///
/// # Example
///
/// ```ignore
/// use authz_resolver_sdk::{Action, PolicyEnforcer, ProtectedRouteConfig};
///
/// let enforcer = PolicyEnforcer::new(ProtectedRouteConfig::default());
///
/// let scope = enforcer.access_scope(&ctx, Action::List)?;
/// ```
#[derive(Clone)]
pub struct PolicyEnforcer {
    route: Arc<ProtectedRouteConfig>,
}

impl PolicyEnforcer {
    /// Create a new enforcer.
    #[must_use]
    pub fn new(route: ProtectedRouteConfig) -> Self {
        Self {
            route: Arc::new(route),
        }
    }

    /// Authorize `action` with the strategy it is bound to.
    ///
    /// # Errors
    ///
    /// See [`Self::authorize_exclusive`] and [`Self::authorize_any_family`].
    pub fn access_scope(
        &self,
        ctx: &SecurityContext,
        action: Action,
    ) -> Result<AccessScope, EnforcerError> {
        match action.strategy() {
            Strategy::ExclusiveByKind => self.authorize_exclusive(ctx, action),
            Strategy::AnyFamily => self.authorize_any_family(ctx, action),
        }
    }

    /// Exclusive-by-kind strategy (list, get, update, delete).
    ///
    /// A user token is checked against the delegated list only and is scoped
    /// to records it owns; an application token is checked against the
    /// application list only and is unrestricted.
    ///
    /// # Errors
    ///
    /// - [`EnforcerError::Unclassifiable`] if the token kind cannot be determined
    /// - [`EnforcerError::Denied`] if the matching family is not satisfied
    /// - [`EnforcerError::MalformedClaims`] if a permitted user token has no `oid`
    pub fn authorize_exclusive(
        &self,
        ctx: &SecurityContext,
        action: Action,
    ) -> Result<AccessScope, EnforcerError> {
        let kind = ctx.token_kind().inspect_err(|_| {
            debug!(action = %action, "authorization rejected: token kind is ambiguous");
        })?;

        let family = match kind {
            TokenKind::User => PermissionFamily::Delegated,
            TokenKind::Application => PermissionFamily::Application,
        };
        let required = self.route.requirement(family, action.access());
        let granted = satisfies(ctx.claims(), required, family);

        debug!(
            token_kind = %kind,
            action = %action,
            family = %family,
            granted,
            "authorization decision"
        );

        if !granted {
            return Err(EnforcerError::Denied {
                action,
                reason: DenyReason::MissingPermission(kind),
            });
        }

        scope_for(ctx, kind)
    }

    /// Any-family strategy (create).
    ///
    /// Granted when the delegated **or** the application write list is
    /// satisfied, whatever the token kind. The returned scope tells the caller
    /// whose records it may create: a user token only its own.
    ///
    /// # Errors
    ///
    /// - [`EnforcerError::Denied`] if neither family is satisfied
    /// - [`EnforcerError::MalformedClaims`] if a permitted user token has no `oid`
    pub fn authorize_any_family(
        &self,
        ctx: &SecurityContext,
        action: Action,
    ) -> Result<AccessScope, EnforcerError> {
        let access = action.access();
        let granted_by = [PermissionFamily::Delegated, PermissionFamily::Application]
            .into_iter()
            .find(|&family| {
                satisfies(
                    ctx.claims(),
                    self.route.requirement(family, access),
                    family,
                )
            });

        let Some(family) = granted_by else {
            debug!(action = %action, granted = false, "authorization decision");
            return Err(EnforcerError::Denied {
                action,
                reason: DenyReason::NoFamilySatisfied,
            });
        };

        // A satisfied family implies `scp` or `roles` is present, so this succeeds.
        let kind = ctx.token_kind()?;
        debug!(
            token_kind = %kind,
            action = %action,
            family = %family,
            granted = true,
            "authorization decision"
        );

        scope_for(ctx, kind)
    }
}

fn scope_for(ctx: &SecurityContext, kind: TokenKind) -> Result<AccessScope, EnforcerError> {
    match kind {
        TokenKind::User => Ok(AccessScope::for_owner(ctx.claims().require_oid()?)),
        TokenKind::Application => Ok(AccessScope::allow_all()),
    }
}

impl fmt::Debug for PolicyEnforcer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolicyEnforcer")
            .field("endpoint", &self.route.endpoint)
            .finish_non_exhaustive()
    }
}
