//! Static `AuthN` resolver plugin wiring.

use std::sync::Arc;

use authn_resolver_sdk::AuthNResolverClient;
use tracing::{info, warn};

use crate::config::{AuthNMode, StaticAuthNPluginConfig};
use crate::domain::{ConfigError, Service};

/// Static `AuthN` resolver plugin.
///
/// Validates every configured claim set once at startup and then serves
/// lookups from memory.
pub struct StaticAuthNPlugin {
    service: Arc<Service>,
}

impl StaticAuthNPlugin {
    /// Build the plugin from its configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the configuration contains a malformed
    /// claim set or an invalid token entry.
    pub fn init(cfg: &StaticAuthNPluginConfig) -> Result<Self, ConfigError> {
        info!("Initializing static_authn_plugin");

        let service = Service::from_config(cfg)?;
        if service.mode() == AuthNMode::AcceptAll {
            warn!(
                "Static AuthN plugin is running in `accept_all` mode: \
                 every bearer token is accepted with the configured default claims. \
                 Do NOT use this mode in production."
            );
        }

        info!(
            mode = ?service.mode(),
            token_count = service.token_count(),
            "Static authn plugin initialized"
        );

        Ok(Self {
            service: Arc::new(service),
        })
    }

    /// The client consumed by the API gateway.
    #[must_use]
    pub fn client(&self) -> Arc<dyn AuthNResolverClient> {
        self.service.clone()
    }
}
