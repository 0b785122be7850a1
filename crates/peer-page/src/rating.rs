//! Star display next to the rating radio group of the review form.

use peer_core::entry::parse_ordinal;

use crate::dom::{Document, Event, EventKind, NodeId, SharedDocument};
use crate::selectors::PageSelectors;

/// Class toggled on the stars of every label up to the selected rating.
pub const ACTIVE_CLASS: &str = "text-warning";
/// Class of the star span inside a rating label.
pub const STARS_CLASS: &str = "rating-stars";

pub struct RatingDisplay {
    doc: SharedDocument,
    inputs: Vec<NodeId>,
    /// `(ordinal, node whose class is toggled)` per label.
    stars: Vec<(u32, NodeId)>,
}

impl RatingDisplay {
    /// Collect the radio group and its labels, then mirror any pre-selected value.
    ///
    /// Labels are matched by their `for` attribute (`rating3` → ordinal 3);
    /// labels whose suffix is not a number are ignored.
    #[must_use]
    pub fn init(doc: SharedDocument, selectors: &PageSelectors) -> Self {
        let (inputs, stars, preselected) = doc.with(|d| {
            let inputs: Vec<NodeId> = d
                .by_attr("name", &selectors.rating_group)
                .into_iter()
                .filter(|node| d.get(*node).is_some_and(|el| el.tag() == "input"))
                .collect();

            let stars: Vec<(u32, NodeId)> = d
                .by_tag("label")
                .into_iter()
                .filter_map(|label| {
                    let suffix = d
                        .attr(label, "for")?
                        .strip_prefix(&selectors.rating_label_prefix)?;
                    let ordinal = parse_ordinal("rating label", suffix).ok()?;
                    let target = d.find_within(label, STARS_CLASS).unwrap_or(label);
                    Some((ordinal, target))
                })
                .collect();

            let preselected = inputs
                .iter()
                .find(|node| d.is_checked(**node))
                .and_then(|node| d.value(*node))
                .map(str::to_string);

            (inputs, stars, preselected)
        });

        let display = Self { doc, inputs, stars };
        if let Some(value) = preselected {
            display.sync(&value);
        }
        display
    }

    #[must_use]
    pub fn listens_to(&self, event: &Event) -> bool {
        event.kind == EventKind::Change && self.inputs.contains(&event.target)
    }

    /// React to a change on one of the group's inputs.
    pub fn on_change(&self, input: NodeId) -> usize {
        let value = self
            .doc
            .with(|d| d.value(input).unwrap_or_default().to_string());
        self.sync(&value)
    }

    /// Mark every label with ordinal ≤ `selected` active, the rest inactive.
    ///
    /// A non-numeric selection clears all stars. Returns the number of
    /// active labels.
    pub fn sync(&self, selected: &str) -> usize {
        let selected = parse_ordinal("rating", selected).unwrap_or(0);
        self.doc.with(|d| self.apply(d, selected))
    }

    fn apply(&self, doc: &mut Document, selected: u32) -> usize {
        let mut active = 0;
        for (ordinal, node) in &self.stars {
            let result = if *ordinal <= selected {
                active += 1;
                doc.add_class(*node, ACTIVE_CLASS)
            } else {
                doc.remove_class(*node, ACTIVE_CLASS)
            };
            if let Err(e) = result {
                tracing::debug!(%e, ordinal, "rating label vanished");
            }
        }
        active
    }
}
