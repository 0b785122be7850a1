//! Status handling for lookup responses.
//!
//! The review server answers failures with an HTML error page, so only a
//! short, whitespace-collapsed excerpt of the body is kept in the error.

use crate::error::LookupError;

/// Longest body excerpt carried by [`LookupError::Api`], in chars.
const BODY_EXCERPT_CHARS: usize = 200;
/// Wait assumed when a 429 carries no usable `Retry-After`.
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Pass a successful response through; map 429 and other failures to errors.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, LookupError> {
    let status = resp.status();
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(LookupError::RateLimited {
            retry_after_secs: parse_retry_after(&resp),
        });
    }
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    Err(LookupError::Api {
        status: status.as_u16(),
        message: excerpt(&body),
    })
}

/// `Retry-After` in delta-seconds form. HTTP dates are not honored.
fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}

fn excerpt(body: &str) -> String {
    let collapsed = body.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= BODY_EXCERPT_CHARS {
        return collapsed;
    }
    let mut cut: String = collapsed.chars().take(BODY_EXCERPT_CHARS).collect();
    cut.push('…');
    cut
}
