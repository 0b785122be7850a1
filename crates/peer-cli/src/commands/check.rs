use anyhow::Context;
use peer_config::PeerConfig;
use peer_page::gate::{ReviewForm, check_review_form};
use serde::Serialize;

use crate::cli::{CheckArgs, OutputFormat};
use crate::output::output;

#[derive(Debug, Serialize)]
struct CheckResponse {
    allowed: bool,
    min_comment_len: usize,
}

/// Handle `peerlist check`.
///
/// A blocked form is an error so the exit status reflects the verdict.
pub fn handle(args: &CheckArgs, config: &PeerConfig, format: OutputFormat) -> anyhow::Result<()> {
    let min_comment_len = config.form.min_comment_len;
    check_review_form(&form_from_args(args), min_comment_len)
        .context("review form would be blocked")?;

    output(
        &CheckResponse {
            allowed: true,
            min_comment_len,
        },
        format,
    )
}

fn form_from_args(args: &CheckArgs) -> ReviewForm {
    ReviewForm {
        email: args.email.clone(),
        ratings_checked: usize::from(args.rating.is_some()),
        comment: args.comment.clone(),
    }
}
