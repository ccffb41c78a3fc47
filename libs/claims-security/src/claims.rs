//! Boundary validation of token claims.
//!
//! Claims arrive from the authentication collaborator as a loosely typed JSON
//! object. [`ClaimSet`] checks the shape of the claims the authorization
//! engine relies on (`idtyp`, `scp`, `roles`, `oid`) once, at the boundary,
//! and keeps every other claim as opaque JSON.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Well-known claim names.
pub mod claim_names {
    /// Optional token type claim. `"app"` marks an application-only token.
    pub const IDTYP: &str = "idtyp";

    /// Space-separated delegated permissions.
    pub const SCP: &str = "scp";

    /// Application permissions (or, on a user token, directory roles).
    pub const ROLES: &str = "roles";

    /// Stable object identifier of the signed-in user.
    pub const OID: &str = "oid";
}

/// Claim set validation failure (`MalformedClaims`).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClaimsError {
    /// The claims payload is not a JSON object.
    #[error("malformed claims: expected a JSON object, got {found}")]
    NotAnObject { found: &'static str },

    /// A well-known claim has the wrong JSON type.
    #[error("malformed claims: `{claim}` must be {expected}, got {found}")]
    InvalidShape {
        claim: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    /// A claim required by the caller is absent.
    #[error("malformed claims: `{claim}` is required")]
    Missing { claim: &'static str },
}

/// A verified token's claims, validated into a typed structure.
///
/// Constructed with [`ClaimSet::from_json`], through `serde`, or with
/// [`ClaimSet::builder`]. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct ClaimSet {
    idtyp: Option<String>,
    scp: Option<String>,
    roles: Option<Vec<String>>,
    oid: Option<String>,
    other: BTreeMap<String, Value>,
}

impl ClaimSet {
    /// Create a new `ClaimSet` builder.
    #[must_use]
    pub fn builder() -> ClaimSetBuilder {
        ClaimSetBuilder::default()
    }

    /// Validate a raw JSON payload.
    ///
    /// # Errors
    ///
    /// - [`ClaimsError::NotAnObject`] if `value` is not a JSON object
    /// - [`ClaimsError::InvalidShape`] if `idtyp`, `scp` or `oid` is present but
    ///   not a string, or `roles` is present but not an array of strings
    pub fn from_json(value: Value) -> Result<Self, ClaimsError> {
        match value {
            Value::Object(map) => Self::try_from(map),
            other => Err(ClaimsError::NotAnObject {
                found: json_type_name(&other),
            }),
        }
    }

    /// The `idtyp` claim, if present.
    #[must_use]
    pub fn idtyp(&self) -> Option<&str> {
        self.idtyp.as_deref()
    }

    /// The raw `scp` claim, if present.
    #[must_use]
    pub fn scp(&self) -> Option<&str> {
        self.scp.as_deref()
    }

    /// The `roles` claim, if present.
    #[must_use]
    pub fn roles(&self) -> Option<&[String]> {
        self.roles.as_deref()
    }

    /// The `oid` claim, if present.
    #[must_use]
    pub fn oid(&self) -> Option<&str> {
        self.oid.as_deref()
    }

    /// The `oid` claim, failing when absent.
    ///
    /// # Errors
    ///
    /// Returns [`ClaimsError::Missing`] if the token carries no `oid` or a blank one.
    pub fn require_oid(&self) -> Result<&str, ClaimsError> {
        self.oid()
            .filter(|oid| !oid.trim().is_empty())
            .ok_or(ClaimsError::Missing {
                claim: claim_names::OID,
            })
    }

    /// Any other claim, untouched.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.other.get(name)
    }

    /// Whether the claim set carries none of the claims the classifier reads.
    #[must_use]
    pub fn is_unclassifiable(&self) -> bool {
        self.idtyp.is_none() && self.scp.is_none() && self.roles.is_none()
    }
}

impl TryFrom<Map<String, Value>> for ClaimSet {
    type Error = ClaimsError;

    fn try_from(mut map: Map<String, Value>) -> Result<Self, Self::Error> {
        let idtyp = take_string(&mut map, claim_names::IDTYP)?;
        let scp = take_string(&mut map, claim_names::SCP)?;
        let roles = take_string_list(&mut map, claim_names::ROLES)?;
        let oid = take_string(&mut map, claim_names::OID)?;

        Ok(Self {
            idtyp,
            scp,
            roles,
            oid,
            other: map.into_iter().collect(),
        })
    }
}

impl From<ClaimSet> for Map<String, Value> {
    fn from(claims: ClaimSet) -> Self {
        let mut map: Map<String, Value> = claims.other.into_iter().collect();
        if let Some(idtyp) = claims.idtyp {
            map.insert(claim_names::IDTYP.to_owned(), Value::String(idtyp));
        }
        if let Some(scp) = claims.scp {
            map.insert(claim_names::SCP.to_owned(), Value::String(scp));
        }
        if let Some(roles) = claims.roles {
            map.insert(
                claim_names::ROLES.to_owned(),
                Value::Array(roles.into_iter().map(Value::String).collect()),
            );
        }
        if let Some(oid) = claims.oid {
            map.insert(claim_names::OID.to_owned(), Value::String(oid));
        }
        map
    }
}

fn take_string(
    map: &mut Map<String, Value>,
    claim: &'static str,
) -> Result<Option<String>, ClaimsError> {
    match map.remove(claim) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(other) => Err(ClaimsError::InvalidShape {
            claim,
            expected: "a string",
            found: json_type_name(&other),
        }),
    }
}

fn take_string_list(
    map: &mut Map<String, Value>,
    claim: &'static str,
) -> Result<Option<Vec<String>>, ClaimsError> {
    let invalid = |found: &Value| ClaimsError::InvalidShape {
        claim,
        expected: "an array of strings",
        found: json_type_name(found),
    };

    match map.remove(claim) {
        None => Ok(None),
        Some(Value::Array(items)) => items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => Ok(s),
                other => Err(invalid(&other)),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some),
        Some(other) => Err(invalid(&other)),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Builder for [`ClaimSet`]. Produces already-valid claim sets.
#[derive(Default)]
pub struct ClaimSetBuilder {
    idtyp: Option<String>,
    scp: Option<String>,
    roles: Option<Vec<String>>,
    oid: Option<String>,
    other: BTreeMap<String, Value>,
}

impl ClaimSetBuilder {
    #[must_use]
    pub fn idtyp(mut self, idtyp: &str) -> Self {
        self.idtyp = Some(idtyp.to_owned());
        self
    }

    #[must_use]
    pub fn scp(mut self, scp: &str) -> Self {
        self.scp = Some(scp.to_owned());
        self
    }

    #[must_use]
    pub fn roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roles = Some(roles.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn oid(mut self, oid: &str) -> Self {
        self.oid = Some(oid.to_owned());
        self
    }

    /// Attach an opaque claim. Well-known claim names are ignored here; use
    /// the dedicated setters for those.
    #[must_use]
    pub fn claim(mut self, name: &str, value: Value) -> Self {
        if ![
            claim_names::IDTYP,
            claim_names::SCP,
            claim_names::ROLES,
            claim_names::OID,
        ]
        .contains(&name)
        {
            self.other.insert(name.to_owned(), value);
        }
        self
    }

    #[must_use]
    pub fn build(self) -> ClaimSet {
        ClaimSet {
            idtyp: self.idtyp,
            scp: self.scp,
            roles: self.roles,
            oid: self.oid,
            other: self.other,
        }
    }
}
