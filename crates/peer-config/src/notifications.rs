//! Notification banner settings.

use serde::{Deserialize, Serialize};

const fn default_lifetime_ms() -> u64 {
    5000
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NotificationConfig {
    /// How long a banner stays up unless dismissed earlier.
    #[serde(default = "default_lifetime_ms")]
    pub lifetime_ms: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            lifetime_ms: default_lifetime_ms(),
        }
    }
}
