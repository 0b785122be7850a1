//! Listing filter: re-evaluates every review row whenever a filter widget changes.

use peer_core::entry::Entry;

use crate::dom::{Document, Event, EventKind, NodeId, SharedDocument};
use crate::predicate::FilterCriteria;
use crate::selectors::PageSelectors;

/// Handles of the three filter widgets; any of them may be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterWidgets {
    pub rating: Option<NodeId>,
    pub project: Option<NodeId>,
    pub user_search: Option<NodeId>,
}

impl FilterWidgets {
    #[must_use]
    pub fn resolve(doc: &Document, selectors: &PageSelectors) -> Self {
        Self {
            rating: doc.get_by_id(&selectors.rating_filter),
            project: doc.get_by_id(&selectors.project_filter),
            user_search: doc.get_by_id(&selectors.user_filter),
        }
    }
}

/// Outcome of one full pass over the rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterSummary {
    pub visible: usize,
    pub hidden: usize,
}

/// Attribute names a review row exposes its filterable values under.
#[derive(Debug, Clone)]
struct EntrySchema {
    class: String,
    rating_attr: String,
    project_attr: String,
    user_attr: String,
}

pub struct FilterEngine {
    doc: SharedDocument,
    widgets: FilterWidgets,
    schema: EntrySchema,
}

impl FilterEngine {
    /// Attach to whichever widgets exist.
    ///
    /// Rating and project selectors react to `Change`, the user search box
    /// to `Input`. A missing widget only disables its own listener.
    #[must_use]
    pub fn init(doc: SharedDocument, widgets: FilterWidgets, selectors: &PageSelectors) -> Self {
        tracing::debug!(
            rating = widgets.rating.is_some(),
            project = widgets.project.is_some(),
            user_search = widgets.user_search.is_some(),
            "filter listeners attached"
        );
        Self {
            doc,
            widgets,
            schema: EntrySchema {
                class: selectors.entry_class.clone(),
                rating_attr: selectors.entry_rating_attr.clone(),
                project_attr: selectors.entry_project_attr.clone(),
                user_attr: selectors.entry_user_attr.clone(),
            },
        }
    }

    #[must_use]
    pub fn listens_to(&self, event: &Event) -> bool {
        let target = Some(event.target);
        match event.kind {
            EventKind::Change => target == self.widgets.rating || target == self.widgets.project,
            EventKind::Input => target == self.widgets.user_search,
            EventKind::Click | EventKind::Submit => false,
        }
    }

    /// Current criteria, read fresh from the widgets.
    #[must_use]
    pub fn criteria(&self, doc: &Document) -> FilterCriteria {
        let read = |widget: Option<NodeId>| {
            widget
                .and_then(|node| doc.value(node))
                .unwrap_or_default()
                .to_string()
        };
        FilterCriteria::from_widgets(
            &read(self.widgets.rating),
            &read(self.widgets.project),
            &read(self.widgets.user_search),
        )
    }

    /// Recompute visibility of every row from the current widget values.
    pub fn reevaluate(&self) -> FilterSummary {
        let summary = self.doc.with(|doc| {
            let criteria = self.criteria(doc);
            let mut summary = FilterSummary::default();

            for row in doc.by_class(&self.schema.class) {
                let entry = self.read_entry(doc, row);
                let show = criteria.matches(&entry);
                if let Err(e) = doc.set_hidden(row, !show) {
                    tracing::debug!(%e, "review row vanished during filtering");
                    continue;
                }
                if show {
                    summary.visible += 1;
                } else {
                    summary.hidden += 1;
                }
            }
            summary
        });

        tracing::debug!(
            visible = summary.visible,
            hidden = summary.hidden,
            "review list filtered"
        );
        summary
    }

    fn read_entry(&self, doc: &Document, row: NodeId) -> Entry {
        Entry::from_attributes(
            doc.attr(row, &self.schema.rating_attr),
            doc.attr(row, &self.schema.project_attr),
            doc.attr(row, &self.schema.user_attr),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Element;
    use pretty_assertions::assert_eq;

    struct Listing {
        doc: SharedDocument,
        rating: NodeId,
        project: NodeId,
        user: NodeId,
        rows: Vec<NodeId>,
    }

    fn listing(rows: &[(&str, &str, &str)]) -> Listing {
        let mut doc = Document::new();
        let root = doc.root();
        let rating = doc
            .append(root, Element::new("select").with_id("filter_rating"))
            .unwrap();
        let project = doc
            .append(root, Element::new("select").with_id("filter_project"))
            .unwrap();
        let user = doc
            .append(root, Element::new("input").with_id("search_user"))
            .unwrap();
        let rows = rows
            .iter()
            .map(|(rating, project, user)| {
                doc.append(
                    root,
                    Element::new("div")
                        .with_class("review-card")
                        .with_attr("data-rating", rating)
                        .with_attr("data-project", project)
                        .with_attr("data-user", user),
                )
                .unwrap()
            })
            .collect();
        Listing {
            doc: SharedDocument::new(doc),
            rating,
            project,
            user,
            rows,
        }
    }

    fn engine(listing: &Listing) -> FilterEngine {
        let widgets = listing
            .doc
            .with(|doc| FilterWidgets::resolve(doc, &PageSelectors::default()));
        FilterEngine::init(listing.doc.clone(), widgets, &PageSelectors::default())
    }

    fn visible(listing: &Listing) -> Vec<bool> {
        listing.doc.with(|doc| {
            listing
                .rows
                .iter()
                .map(|row| !doc.is_hidden(*row))
                .collect()
        })
    }

    #[test]
    fn rating_threshold_hides_lower_rows() {
        let l = listing(&[("1", "", "a"), ("3", "", "b"), ("5", "", "c")]);
        let engine = engine(&l);
        l.doc.with(|doc| doc.set_value(l.rating, "3")).unwrap();

        let summary = engine.reevaluate();
        assert_eq!(summary, FilterSummary { visible: 2, hidden: 1 });
        assert_eq!(visible(&l), vec![false, true, true]);
    }

    #[test]
    fn each_change_recomputes_from_scratch() {
        let l = listing(&[("4", "Thesis", "Ana Marić"), ("4", "Homework", "Ana Horvat")]);
        let engine = engine(&l);

        l.doc.with(|doc| doc.set_value(l.project, "Thesis")).unwrap();
        engine.reevaluate();
        assert_eq!(visible(&l), vec![true, false]);

        l.doc.with(|doc| doc.set_value(l.project, "")).unwrap();
        engine.reevaluate();
        assert_eq!(visible(&l), vec![true, true]);
    }

    #[test]
    fn listens_only_to_its_widgets() {
        let l = listing(&[]);
        let engine = engine(&l);

        assert!(engine.listens_to(&Event::new(EventKind::Change, l.rating)));
        assert!(engine.listens_to(&Event::new(EventKind::Change, l.project)));
        assert!(engine.listens_to(&Event::new(EventKind::Input, l.user)));
        assert!(!engine.listens_to(&Event::new(EventKind::Change, l.user)));
        assert!(!engine.listens_to(&Event::new(EventKind::Input, l.rating)));
    }

    #[test]
    fn missing_widgets_read_as_unset() {
        let mut doc = Document::new();
        let row = doc
            .append(
                doc.root(),
                Element::new("div")
                    .with_class("review-card")
                    .with_attr("data-rating", "1"),
            )
            .unwrap();
        let doc = SharedDocument::new(doc);
        let engine = FilterEngine::init(
            doc.clone(),
            FilterWidgets::default(),
            &PageSelectors::default(),
        );

        assert_eq!(engine.reevaluate(), FilterSummary { visible: 1, hidden: 0 });
        assert!(!doc.with(|doc| doc.is_hidden(row)));
    }

    #[test]
    fn empty_listing_is_a_no_op() {
        let l = listing(&[]);
        assert_eq!(engine(&l).reevaluate(), FilterSummary::default());
    }
}
