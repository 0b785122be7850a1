use anyhow::Context;
use peer_core::entry::Entry;
use peer_page::predicate::{FilterCriteria, visible_entries};

use crate::cli::{FilterArgs, OutputFormat};
use crate::output::output;

/// Handle `peerlist filter`.
pub fn handle(args: &FilterArgs, format: OutputFormat) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(&args.entries)
        .with_context(|| format!("failed to read entries from '{}'", args.entries))?;
    let entries = parse_entries(&raw)
        .with_context(|| format!("'{}' is not a JSON array of entries", args.entries))?;

    let criteria = FilterCriteria::from_widgets(
        args.rating.as_deref().unwrap_or_default(),
        args.project.as_deref().unwrap_or_default(),
        args.user.as_deref().unwrap_or_default(),
    );
    let visible: Vec<&Entry> = visible_entries(&entries, &criteria).collect();
    tracing::debug!(
        total = entries.len(),
        visible = visible.len(),
        "entries filtered"
    );

    output(&visible, format)
}

fn parse_entries(raw: &str) -> serde_json::Result<Vec<Entry>> {
    serde_json::from_str(raw)
}
