//! Server configuration.
//!
//! Loaded from environment variables with defaults:
//!
//! | Variable | Default |
//! |----------|---------|
//! | `PAYPAL_PLUS_BIND_ADDR` | `0.0.0.0:3000` |
//! | `PAYPAL_PLUS_REVERSED_STATUS` | `paypal_reversed` |
//! | `RUST_LOG` | `info` |

use paypal_plus_plugin::PluginConfig;
use std::env;
use std::net::SocketAddr;
use thiserror::Error;

/// Default listen address.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A variable is set but cannot be parsed.
    #[error("invalid value for {name}: {value}")]
    Invalid {
        /// Variable name
        name: &'static str,
        /// Offending value
        value: String,
    },
}

/// HTTP server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to listen on
    pub bind_addr: SocketAddr,
    /// `tracing_subscriber::EnvFilter` directive
    pub log_filter: String,
    /// Webhook plugin settings
    pub plugin: PluginConfig,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `PAYPAL_PLUS_BIND_ADDR` is not a
    /// socket address.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through `lookup`, which returns a variable's value
    /// if set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the bind address does not parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_addr = lookup("PAYPAL_PLUS_BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr.parse().map_err(|_| ConfigError::Invalid {
            name: "PAYPAL_PLUS_BIND_ADDR",
            value: bind_addr.clone(),
        })?;

        let mut plugin = PluginConfig::default();
        if let Some(status) = lookup("PAYPAL_PLUS_REVERSED_STATUS").filter(|s| !s.is_empty()) {
            plugin = plugin.with_reversed_status(status);
        }

        Ok(Self {
            bind_addr,
            log_filter: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            plugin,
        })
    }
}
