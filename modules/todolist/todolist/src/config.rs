use std::path::PathBuf;

use authz_resolver_sdk::ProtectedRouteConfig;
use serde::{Deserialize, Serialize};

/// Configuration for the todo list module
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct TodoListConfig {
    pub storage: StorageConfig,
    /// Permission lists of the `/api/todolist` route.
    pub protected_route: ProtectedRouteConfig,
    /// Upper bound on a todo description, in characters.
    pub max_description_length: usize,
}

impl Default for TodoListConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig::default(),
            protected_route: ProtectedRouteConfig::default(),
            max_description_length: 1024,
        }
    }
}

/// Where todos are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StorageConfig {
    /// Process memory; lost on restart.
    #[default]
    Memory,
    /// A `{"todos": [...]}` JSON document on disk.
    JsonFile { path: PathBuf },
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_memory_store_and_default_route() {
        let cfg: TodoListConfig = serde_json::from_value(serde_json::json!({})).unwrap();

        assert_eq!(cfg.storage, StorageConfig::Memory);
        assert_eq!(cfg.protected_route, ProtectedRouteConfig::default());
        assert_eq!(cfg.max_description_length, 1024);
    }

    #[test]
    fn json_file_storage_takes_a_path() {
        let cfg: TodoListConfig = serde_json::from_value(serde_json::json!({
            "storage": { "kind": "json_file", "path": "data/db.json" },
        }))
        .unwrap();

        assert_eq!(
            cfg.storage,
            StorageConfig::JsonFile {
                path: PathBuf::from("data/db.json")
            }
        );
    }

    #[test]
    fn unknown_storage_kind_is_rejected() {
        let err = serde_json::from_value::<TodoListConfig>(serde_json::json!({
            "storage": { "kind": "sqlite" },
        }));
        assert!(err.is_err());
    }
}
