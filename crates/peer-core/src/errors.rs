//! Cross-cutting error types for peerlist.
//!
//! Domain-specific errors (`LookupError`, `PageError`, `ConfigError`) live in
//! their respective crates. The binary converges them through `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any peerlist crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A value read from the page or a fixture failed to parse.
    #[error("Invalid {field}: {value:?}")]
    InvalidValue { field: String, value: String },

    /// Data failed validation (schema, format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),
}
