//! # peer-lookup
//!
//! HTTP client for the review server's user lookup endpoint.
//!
//! `GET {base_url}/api/users/search?q=<query>` returns a JSON array of
//! [`Candidate`]s; an empty array means "no results", not an error.
//! Components consume lookups through [`CandidateSource`] and get a
//! [`LookupOutcome`] back, never a raw transport error.

mod error;
mod http;

pub use error::LookupError;

use std::future::Future;
use std::time::Duration;

use peer_config::LookupConfig;
use peer_core::candidate::Candidate;

use crate::http::check_response;

// ── Outcome ────────────────────────────────────────────────────────

/// Result of one lookup as seen by the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// The endpoint answered; the list may be empty.
    Found(Vec<Candidate>),
    /// The lookup could not be completed.
    Failed { reason: String },
}

impl From<Result<Vec<Candidate>, LookupError>> for LookupOutcome {
    fn from(result: Result<Vec<Candidate>, LookupError>) -> Self {
        match result {
            Ok(candidates) => Self::Found(candidates),
            Err(e) => Self::Failed {
                reason: e.to_string(),
            },
        }
    }
}

/// Anything that can answer a person lookup.
pub trait CandidateSource: Send + Sync + 'static {
    fn search(&self, query: &str) -> impl Future<Output = LookupOutcome> + Send;
}

// ── Client ─────────────────────────────────────────────────────────

/// HTTP client for the user lookup endpoint.
#[derive(Clone)]
pub struct LookupClient {
    http: reqwest::Client,
    search_url: String,
}

impl LookupClient {
    /// Build a client from the `lookup` config section.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Http`] if the underlying `reqwest::Client`
    /// fails to build.
    pub fn from_config(config: &LookupConfig) -> Result<Self, LookupError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            search_url: config.search_url(),
        })
    }

    /// Endpoint URL this client queries, without the query string.
    #[must_use]
    pub fn search_url(&self) -> &str {
        &self.search_url
    }

    /// Query the endpoint for people matching `query` by name or email.
    ///
    /// The query is sent as-is (URL-encoded, not trimmed). Candidates with a
    /// blank email are dropped because they cannot be selected.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] if the HTTP request fails, the endpoint
    /// returns a non-success status, or the body is not a candidate array.
    pub async fn search_users(&self, query: &str) -> Result<Vec<Candidate>, LookupError> {
        let url = format!("{}?q={}", self.search_url, urlencoding::encode(query));
        let resp = check_response(self.http.get(&url).send().await?).await?;

        let body = resp.text().await?;
        let candidates: Vec<Candidate> = serde_json::from_str(&body)?;
        Ok(keep_selectable(candidates))
    }
}

impl CandidateSource for LookupClient {
    fn search(&self, query: &str) -> impl Future<Output = LookupOutcome> + Send {
        async move {
            let result = self.search_users(query).await;
            if let Err(e) = &result {
                tracing::warn!(%e, url = %self.search_url, "user lookup failed");
            }
            LookupOutcome::from(result)
        }
    }
}

fn keep_selectable(candidates: Vec<Candidate>) -> Vec<Candidate> {
    candidates
        .into_iter()
        .filter(|candidate| match candidate.validate() {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(%e, "dropping unselectable candidate");
                false
            }
        })
        .collect()
}
