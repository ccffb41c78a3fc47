//! Authorization models: operations and the per-route permission lists.

use std::fmt;

use claims_security::{PermissionFamily, PermissionRequirement};
use serde::{Deserialize, Serialize};

/// Which permission list an operation consults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Access {
    Read,
    Write,
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Read => "read",
            Self::Write => "write",
        })
    }
}

/// How the enforcer decides an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Classify the token and check only the matching family.
    ExclusiveByKind,
    /// Grant when either family is satisfied.
    AnyFamily,
}

/// A CRUD operation on the todo list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    List,
    Get,
    Create,
    Update,
    Delete,
}

impl Action {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Get => "get",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }

    #[must_use]
    pub fn access(self) -> Access {
        match self {
            Self::List | Self::Get => Access::Read,
            Self::Create | Self::Update | Self::Delete => Access::Write,
        }
    }

    #[must_use]
    pub fn strategy(self) -> Strategy {
        match self {
            Self::Create => Strategy::AnyFamily,
            Self::List | Self::Get | Self::Update | Self::Delete => Strategy::ExclusiveByKind,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Independent `read` and `write` requirement lists for one permission family.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PermissionSet {
    #[serde(default)]
    pub read: PermissionRequirement,
    #[serde(default)]
    pub write: PermissionRequirement,
}

impl PermissionSet {
    #[must_use]
    pub fn for_access(&self, access: Access) -> &PermissionRequirement {
        match access {
            Access::Read => &self.read,
            Access::Write => &self.write,
        }
    }
}

/// Permission configuration of one protected route.
///
/// Built once at startup and handed to the enforcer; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProtectedRouteConfig {
    /// Base path of the protected resource.
    pub endpoint: String,
    /// Lists checked against `scp` for user tokens.
    pub delegated_permissions: PermissionSet,
    /// Lists checked against `roles` for application tokens.
    pub application_permissions: PermissionSet,
}

impl ProtectedRouteConfig {
    #[must_use]
    pub fn requirement(&self, family: PermissionFamily, access: Access) -> &PermissionRequirement {
        match family {
            PermissionFamily::Delegated => self.delegated_permissions.for_access(access),
            PermissionFamily::Application => self.application_permissions.for_access(access),
        }
    }
}

impl Default for ProtectedRouteConfig {
    fn default() -> Self {
        Self {
            endpoint: "/api/todolist".to_owned(),
            delegated_permissions: PermissionSet {
                read: PermissionRequirement::any_of(["Todolist.Read", "Todolist.ReadWrite"]),
                write: PermissionRequirement::any_of(["Todolist.ReadWrite"]),
            },
            application_permissions: PermissionSet {
                read: PermissionRequirement::any_of([
                    "Todolist.Read.All",
                    "Todolist.ReadWrite.All",
                ]),
                write: PermissionRequirement::any_of(["Todolist.ReadWrite.All"]),
            },
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn only_create_uses_any_family() {
        for action in [Action::List, Action::Get, Action::Update, Action::Delete] {
            assert_eq!(action.strategy(), Strategy::ExclusiveByKind, "{action}");
        }
        assert_eq!(Action::Create.strategy(), Strategy::AnyFamily);
    }

    #[test]
    fn reads_and_writes_use_their_own_lists() {
        let cfg = ProtectedRouteConfig::default();

        assert_eq!(
            cfg.requirement(PermissionFamily::Delegated, Action::Get.access())
                .as_slice(),
            ["Todolist.Read", "Todolist.ReadWrite"]
        );
        assert_eq!(
            cfg.requirement(PermissionFamily::Application, Action::Delete.access())
                .as_slice(),
            ["Todolist.ReadWrite.All"]
        );
    }

    #[test]
    fn route_config_deserializes_with_unknown_fields_rejected() {
        let cfg: ProtectedRouteConfig = serde_json::from_value(serde_json::json!({
            "endpoint": "/api/todos",
            "delegated_permissions": { "read": ["A"], "write": ["B"] },
        }))
        .unwrap();

        assert_eq!(cfg.endpoint, "/api/todos");
        assert_eq!(cfg.delegated_permissions.write.as_slice(), ["B"]);
        assert_eq!(
            cfg.application_permissions,
            ProtectedRouteConfig::default().application_permissions
        );

        let err = serde_json::from_value::<ProtectedRouteConfig>(serde_json::json!({
            "delegatedPermissions": {},
        }));
        assert!(err.is_err());
    }
}
