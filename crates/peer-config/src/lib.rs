//! # peer-config
//!
//! Layered configuration loading for peerlist using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`PEERLIST_*` prefix, `__` as separator)
//! 2. Project-level `.peerlist/config.toml`
//! 3. User-level `~/.config/peerlist/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `PEERLIST_LOOKUP__BASE_URL` -> `lookup.base_url`,
//! `PEERLIST_NOTIFICATIONS__LIFETIME_MS` -> `notifications.lifetime_ms`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use peer_config::PeerConfig;
//!
//! let config = PeerConfig::load_with_dotenv().expect("config");
//! println!("lookup endpoint: {}", config.lookup.search_url());
//! ```

mod error;
mod form;
mod lookup;
mod notifications;

pub use error::ConfigError;
pub use form::FormConfig;
pub use lookup::LookupConfig;
pub use notifications::NotificationConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Empty and one-character queries never reach the lookup endpoint.
const MIN_LOOKUP_QUERY_LEN: usize = 2;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PeerConfig {
    #[serde(default)]
    pub lookup: LookupConfig,
    #[serde(default)]
    pub notifications: NotificationConfig,
    #[serde(default)]
    pub form: FormConfig,
}

impl PeerConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source fails to parse or a value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        // Missing .env is fine.
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".peerlist/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("PEERLIST_").split("__"))
    }

    /// Reject values that would make a component misbehave.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a zero debounce delay, a
    /// minimum lookup query shorter than two characters, or a zero
    /// notification lifetime.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lookup.debounce_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "lookup.debounce_ms".into(),
                reason: "must be greater than zero".into(),
            });
        }
        if self.lookup.min_query_len < MIN_LOOKUP_QUERY_LEN {
            return Err(ConfigError::InvalidValue {
                field: "lookup.min_query_len".into(),
                reason: format!("must be at least {MIN_LOOKUP_QUERY_LEN}"),
            });
        }
        if self.notifications.lifetime_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "notifications.lifetime_ms".into(),
                reason: "must be greater than zero".into(),
            });
        }
        Ok(())
    }

    /// Fail early when the lookup endpoint cannot be addressed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] for the `lookup` section.
    pub fn require_lookup(&self) -> Result<&LookupConfig, ConfigError> {
        if self.lookup.is_configured() {
            Ok(&self.lookup)
        } else {
            Err(ConfigError::NotConfigured {
                section: "lookup".into(),
            })
        }
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("peerlist").join("config.toml"))
    }
}
