use std::fmt;

/// Data-access restriction produced by the policy enforcer.
///
/// Storage applies it to every lookup and mutation: an owner-scoped request
/// can only see and touch records whose owner equals the scope's owner id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AccessScope {
    /// No row-level restriction (application tokens).
    All,
    /// Only records owned by this object id (user tokens).
    Owner(String),
}

impl AccessScope {
    /// Unrestricted scope.
    #[must_use]
    pub fn allow_all() -> Self {
        Self::All
    }

    /// Scope restricted to a single owner.
    #[must_use]
    pub fn for_owner(owner: impl Into<String>) -> Self {
        Self::Owner(owner.into())
    }

    /// The owner this scope is restricted to, if any.
    #[must_use]
    pub fn owner(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Owner(owner) => Some(owner),
        }
    }

    /// Whether a record owned by `owner` is visible under this scope.
    #[must_use]
    pub fn permits_owner(&self, owner: &str) -> bool {
        match self {
            Self::All => true,
            Self::Owner(scoped) => scoped == owner,
        }
    }
}

impl fmt::Display for AccessScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Owner(owner) => write!(f, "owner={owner}"),
        }
    }
}
