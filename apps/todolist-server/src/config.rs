//! Server configuration: one YAML file overlaid with `TODOLIST__*` environment variables.

use std::path::Path;

use anyhow::Context;
use api_gateway::ApiGatewayConfig;
use figment::Figment;
use figment::providers::{Env, Format, Yaml};
use serde::{Deserialize, Serialize};
use static_authn_plugin::StaticAuthNPluginConfig;
use todolist::TodoListConfig;

use crate::logging::LoggingConfig;

/// Prefix of environment overrides; `__` separates nested keys.
pub const ENV_PREFIX: &str = "TODOLIST__";

/// Root configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub server: ApiGatewayConfig,
    pub logging: LoggingConfig,
    pub authn: StaticAuthNPluginConfig,
    pub todolist: TodoListConfig,
}

impl AppConfig {
    /// Load configuration from `path` (if any) and the environment.
    ///
    /// With no file every section falls back to its defaults.
    ///
    /// # Errors
    /// Returns an error if `path` does not exist or the merged configuration
    /// does not match the expected shape.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut figment = Figment::new();
        if let Some(path) = path {
            anyhow::ensure!(
                path.is_file(),
                "config file '{}' does not exist",
                path.display()
            );
            figment = figment.merge(Yaml::file_exact(path));
        }
        Self::extract(figment)
    }

    fn extract(figment: Figment) -> anyhow::Result<Self> {
        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("invalid configuration")
    }
}
