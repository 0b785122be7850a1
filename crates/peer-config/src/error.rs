//! Configuration error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A TOML file or environment variable could not be merged or extracted.
    #[error("config error: {0}")]
    Figment(#[from] figment::Error),

    /// A section needed by the current command has no usable values.
    #[error("the [{section}] section is not configured")]
    NotConfigured { section: String },

    #[error("{field} is invalid: {reason}")]
    InvalidValue { field: String, reason: String },
}
