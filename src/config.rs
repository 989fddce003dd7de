//! Forwarder configuration: endpoint url, auth token, active flag.

use std::env;

/// Delivery endpoint configuration as persisted by the host.
#[derive(Debug, Clone, Default)]
pub struct ForwarderConfig {
    /// Endpoint server url events are POSTed to.
    pub url: String,
    /// Bearer token sent with every delivery.
    pub token: String,
    /// Master switch; `false` short-circuits all processing.
    pub active: bool,
}

impl ForwarderConfig {
    /// A configuration is usable only with a non-empty endpoint url.
    pub fn is_valid(&self) -> bool {
        !self.url.is_empty()
    }
}

/// Read accessor for the externally persisted configuration.
///
/// Implementations are queried on every hook invocation, never cached, so
/// configuration changes take effect on the next push without a restart.
pub trait ConfigurationStore: Send + Sync {
    fn get(&self) -> ForwarderConfig;
}

/// Environment-backed store reading `PUSHEVENT_URL`, `PUSHEVENT_TOKEN` and
/// `PUSHEVENT_ACTIVE` on every read.
///
/// Hosts loading settings from a `.env` file (dotenvy) should do so before
/// installing the forwarder.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvConfigurationStore;

impl ConfigurationStore for EnvConfigurationStore {
    fn get(&self) -> ForwarderConfig {
        ForwarderConfig {
            url: env::var("PUSHEVENT_URL").unwrap_or_default(),
            token: env::var("PUSHEVENT_TOKEN").unwrap_or_default(),
            active: env::var("PUSHEVENT_ACTIVE")
                .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
        }
    }
}
