//! Permission matching for the delegated and application families.
//!
//! Both evaluators share one rule: normalize the asserted permissions and the
//! required ones to upper case and succeed iff the two sets intersect. They
//! differ only in which claim they read and how it is decoded:
//!
//! | Family        | Claim   | Decoding                       |
//! |---------------|---------|--------------------------------|
//! | `Delegated`   | `scp`   | one string, split on whitespace |
//! | `Application` | `roles` | list of strings                |
//!
//! A missing claim is a plain `false`, not an error.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::claims::ClaimSet;

/// Which claim carries the permissions being checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionFamily {
    /// Permissions granted to an app acting for a signed-in user (`scp`).
    Delegated,
    /// Permissions granted directly to an application (`roles`).
    Application,
}

impl fmt::Display for PermissionFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Delegated => "delegated",
            Self::Application => "application",
        })
    }
}

/// An "any-of" list of permission names. Empty means unsatisfiable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionRequirement(Vec<String>);

impl PermissionRequirement {
    /// Build a requirement satisfied by any one of `permissions`.
    #[must_use]
    pub fn any_of<I, S>(permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(permissions.into_iter().map(Into::into).collect())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    fn normalized(&self) -> HashSet<String> {
        self.0.iter().map(|p| p.to_uppercase()).collect()
    }
}

impl<S: Into<String>> FromIterator<S> for PermissionRequirement {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self::any_of(iter)
    }
}

/// Whether `claims` assert at least one permission of `required` in `family`.
#[must_use]
pub fn satisfies(
    claims: &ClaimSet,
    required: &PermissionRequirement,
    family: PermissionFamily,
) -> bool {
    let required = required.normalized();
    if required.is_empty() {
        return false;
    }

    let Some(asserted) = asserted_permissions(claims, family) else {
        return false;
    };

    asserted
        .iter()
        .any(|claim| required.contains(&claim.to_uppercase()))
}

fn asserted_permissions(claims: &ClaimSet, family: PermissionFamily) -> Option<Vec<&str>> {
    match family {
        PermissionFamily::Delegated => claims.scp().map(|scp| scp.split_whitespace().collect()),
        PermissionFamily::Application => claims
            .roles()
            .map(|roles| roles.iter().map(String::as_str).collect()),
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn req(perms: &[&str]) -> PermissionRequirement {
        PermissionRequirement::any_of(perms.iter().copied())
    }

    #[test]
    fn delegated_match_is_case_insensitive() {
        let claims = ClaimSet::builder().scp("TODOLIST.READ").build();
        assert!(satisfies(
            &claims,
            &req(&["Todolist.Read"]),
            PermissionFamily::Delegated
        ));
    }

    #[test]
    fn application_match_is_case_insensitive() {
        let claims = ClaimSet::builder().roles(["todolist.read.all"]).build();
        assert!(satisfies(
            &claims,
            &req(&["Todolist.Read.All"]),
            PermissionFamily::Application
        ));
    }

    #[test]
    fn delegated_without_overlap_is_denied() {
        let claims = ClaimSet::builder()
            .scp("Todolist.Read Todolist.Write")
            .build();
        assert!(!satisfies(
            &claims,
            &req(&["Todolist.ReadWrite"]),
            PermissionFamily::Delegated
        ));
    }

    #[test]
    fn any_single_required_permission_suffices() {
        let claims = ClaimSet::builder().scp("Todolist.ReadWrite").build();
        assert!(satisfies(
            &claims,
            &req(&["Todolist.Read", "Todolist.ReadWrite"]),
            PermissionFamily::Delegated
        ));
    }

    #[test]
    fn scp_tolerates_repeated_whitespace() {
        let claims = ClaimSet::builder()
            .scp("  openid\tTodolist.Read  profile ")
            .build();
        assert!(satisfies(
            &claims,
            &req(&["Todolist.Read"]),
            PermissionFamily::Delegated
        ));
    }

    #[test]
    fn empty_requirement_is_never_satisfied() {
        let claims = ClaimSet::builder()
            .scp("Todolist.Read")
            .roles(["Todolist.Read.All"])
            .build();

        assert!(!satisfies(&claims, &req(&[]), PermissionFamily::Delegated));
        assert!(!satisfies(&claims, &req(&[]), PermissionFamily::Application));
    }

    #[test]
    fn empty_scp_never_matches_an_empty_name() {
        let claims = ClaimSet::builder().scp("").build();
        assert!(!satisfies(&claims, &req(&[""]), PermissionFamily::Delegated));
    }

    #[test]
    fn delegated_ignores_roles() {
        let claims = ClaimSet::builder().roles(["Todolist.Read"]).build();
        assert!(!satisfies(
            &claims,
            &req(&["Todolist.Read"]),
            PermissionFamily::Delegated
        ));
    }

    #[test]
    fn application_ignores_scp() {
        let claims = ClaimSet::builder().scp("Todolist.Read.All").build();
        assert!(!satisfies(
            &claims,
            &req(&["Todolist.Read.All"]),
            PermissionFamily::Application
        ));
    }

    #[test]
    fn application_without_overlap_is_denied() {
        let claims = ClaimSet::builder().roles(["Todolist.Read.All"]).build();
        assert!(!satisfies(
            &claims,
            &req(&["Todolist.ReadWrite.All"]),
            PermissionFamily::Application
        ));
    }

    #[test]
    fn requirement_deserializes_from_plain_list() {
        let parsed: PermissionRequirement =
            serde_json::from_str(r#"["Todolist.Read", "Todolist.ReadWrite"]"#).unwrap();
        assert_eq!(parsed, req(&["Todolist.Read", "Todolist.ReadWrite"]));
    }
}
