use anyhow::{Context, bail};
use peer_config::PeerConfig;
use peer_lookup::LookupClient;

use crate::cli::{LookupArgs, OutputFormat};
use crate::output::output;

/// Handle `peerlist lookup`.
pub async fn handle(
    args: &LookupArgs,
    config: &PeerConfig,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let lookup = config.require_lookup()?;
    if args.query.trim().chars().count() < lookup.min_query_len {
        bail!(
            "query '{}' is shorter than {} characters",
            args.query,
            lookup.min_query_len
        );
    }

    let client = LookupClient::from_config(lookup).context("failed to build lookup client")?;
    let candidates = client
        .search_users(&args.query)
        .await
        .with_context(|| format!("user lookup against {} failed", client.search_url()))?;

    output(&candidates, format)
}
