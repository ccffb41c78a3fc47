//! User-token vs. application-token classification.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::claims::ClaimSet;
use crate::constants::APP_ID_TYPE;

/// Who a token was issued to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Issued to a signed-in user (delegated permissions in `scp`).
    User,
    /// Issued to an unattended application (application permissions in `roles`).
    Application,
}

impl TokenKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Application => "application",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The claim set does not say who the token was issued to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ClassificationError {
    /// None of `idtyp`, `scp` or `roles` is present.
    #[error("token carries none of `idtyp`, `scp`, `roles`: cannot tell user from application")]
    Ambiguous,
}

/// Decide whether `claims` belong to a user token or an application token.
///
/// First match wins:
/// 1. `idtyp` present: `Application` iff it equals `"app"`, otherwise `User`.
/// 2. `scp` present: `User`. A token with both `scp` and `roles` is a user
///    token whose `roles` are directory roles.
/// 3. `roles` present: `Application`.
///
/// # Errors
///
/// Returns [`ClassificationError::Ambiguous`] when none of the three claims is
/// present. There is no default kind.
pub fn classify(claims: &ClaimSet) -> Result<TokenKind, ClassificationError> {
    if claims.is_unclassifiable() {
        return Err(ClassificationError::Ambiguous);
    }

    if let Some(idtyp) = claims.idtyp() {
        return Ok(if idtyp == APP_ID_TYPE {
            TokenKind::Application
        } else {
            TokenKind::User
        });
    }

    if claims.scp().is_some() {
        return Ok(TokenKind::User);
    }

    // Only `roles` is left.
    Ok(TokenKind::Application)
}
