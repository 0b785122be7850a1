//! User lookup endpoint and autocomplete timing.

use serde::{Deserialize, Serialize};

fn default_base_url() -> String {
    String::from("http://127.0.0.1:5000")
}

fn default_search_path() -> String {
    String::from("/api/users/search")
}

const fn default_timeout_secs() -> u64 {
    10
}

const fn default_debounce_ms() -> u64 {
    300
}

const fn default_min_query_len() -> usize {
    2
}

fn default_user_agent() -> String {
    String::from("peerlist/0.1")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LookupConfig {
    /// Scheme + host (+ port) of the review server.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path of the JSON search endpoint, appended to `base_url`.
    #[serde(default = "default_search_path")]
    pub search_path: String,

    /// HTTP request timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Quiet period after the last keystroke before a query is sent.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Queries shorter than this (after trimming) never hit the network.
    #[serde(default = "default_min_query_len")]
    pub min_query_len: usize,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            search_path: default_search_path(),
            timeout_secs: default_timeout_secs(),
            debounce_ms: default_debounce_ms(),
            min_query_len: default_min_query_len(),
            user_agent: default_user_agent(),
        }
    }
}

impl LookupConfig {
    /// Check if the endpoint can be addressed at all.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        let base = self.base_url.trim();
        base.strip_prefix("https://")
            .or_else(|| base.strip_prefix("http://"))
            .is_some_and(|host| !host.is_empty())
    }

    /// Full endpoint URL without the query string.
    #[must_use]
    pub fn search_url(&self) -> String {
        let base = self.base_url.trim().trim_end_matches('/');
        let path = self.search_path.trim();
        if path.starts_with('/') {
            format!("{base}{path}")
        } else {
            format!("{base}/{path}")
        }
    }
}
