//! Pre-submit checks on the review form.

use peer_core::severity::Severity;
use thiserror::Error;

use crate::dom::{Document, Event, EventKind, NodeId, SharedDocument};
use crate::notify::Notifier;
use crate::selectors::PageSelectors;

/// Snapshot of the fields the gate looks at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewForm {
    pub email: String,
    /// How many rating choices are checked.
    pub ratings_checked: usize,
    pub comment: String,
}

/// First check a review form failed; the message is shown to the user.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GateFailure {
    #[error("Please enter your colleague's email address.")]
    MissingEmail,

    #[error("Please choose a rating.")]
    MissingRating,

    #[error("The comment must be at least {min} characters long.")]
    CommentTooShort { min: usize, actual: usize },
}

/// Run the three checks in order, stopping at the first failure.
///
/// # Errors
///
/// Returns the [`GateFailure`] of the first failing check.
pub fn check_review_form(form: &ReviewForm, min_comment_len: usize) -> Result<(), GateFailure> {
    if form.email.is_empty() {
        return Err(GateFailure::MissingEmail);
    }
    if form.ratings_checked != 1 {
        return Err(GateFailure::MissingRating);
    }
    let actual = form.comment.chars().count();
    if actual < min_comment_len {
        return Err(GateFailure::CommentTooShort {
            min: min_comment_len,
            actual,
        });
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GateWidgets {
    pub form: Option<NodeId>,
    pub email: Option<NodeId>,
    pub comment: Option<NodeId>,
}

impl GateWidgets {
    #[must_use]
    pub fn resolve(doc: &Document, selectors: &PageSelectors) -> Self {
        Self {
            form: doc.get_by_id(&selectors.review_form),
            email: doc.get_by_id(&selectors.selection_field),
            comment: doc.get_by_id(&selectors.comment_field),
        }
    }
}

pub struct FormGate {
    doc: SharedDocument,
    widgets: GateWidgets,
    rating_group: String,
    min_comment_len: usize,
    notifier: Notifier,
}

impl FormGate {
    #[must_use]
    pub fn init(
        doc: SharedDocument,
        widgets: GateWidgets,
        selectors: &PageSelectors,
        min_comment_len: usize,
        notifier: Notifier,
    ) -> Self {
        Self {
            doc,
            widgets,
            rating_group: selectors.rating_group.clone(),
            min_comment_len,
            notifier,
        }
    }

    #[must_use]
    pub fn listens_to(&self, event: &Event) -> bool {
        event.kind == EventKind::Submit && Some(event.target) == self.widgets.form
    }

    /// Read the current field values. Missing fields read as empty.
    #[must_use]
    pub fn read_form(&self, doc: &Document) -> ReviewForm {
        let read = |field: Option<NodeId>| {
            field
                .and_then(|node| doc.value(node))
                .unwrap_or_default()
                .to_string()
        };
        let ratings_checked = doc
            .by_attr("name", &self.rating_group)
            .into_iter()
            .filter(|node| doc.get(*node).is_some_and(|el| el.tag() == "input"))
            .filter(|node| doc.is_checked(*node))
            .count();

        ReviewForm {
            email: read(self.widgets.email),
            ratings_checked,
            comment: read(self.widgets.comment),
        }
    }

    /// Check the form; on failure show exactly one danger banner.
    ///
    /// Never modifies a field.
    pub fn validate(&self) -> bool {
        let form = self.doc.with(|doc| self.read_form(doc));
        match check_review_form(&form, self.min_comment_len) {
            Ok(()) => true,
            Err(failure) => {
                tracing::debug!(?failure, "review form blocked");
                self.notifier.show(&failure.to_string(), Severity::Danger);
                false
            }
        }
    }
}
