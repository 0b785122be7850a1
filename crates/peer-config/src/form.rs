//! Review form gate settings.

use serde::{Deserialize, Serialize};

const fn default_min_comment_len() -> usize {
    10
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FormConfig {
    /// Minimum comment length, counted in characters.
    #[serde(default = "default_min_comment_len")]
    pub min_comment_len: usize,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            min_comment_len: default_min_comment_len(),
        }
    }
}
