//! Filter criteria and the per-entry predicates they evaluate.
//!
//! Each predicate looks at one criterion only; an unset criterion always
//! passes. [`FilterCriteria::matches`] composes them with logical AND.

use peer_core::entry::{Entry, parse_ordinal};

/// Criteria derived from the three filter widgets on every evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Minimum star rating.
    pub min_rating: Option<u32>,
    /// Exact project category.
    pub project: Option<String>,
    /// Lower-cased substring of the user name.
    pub user_search: Option<String>,
}

impl FilterCriteria {
    /// Build criteria from raw widget values.
    ///
    /// Empty values disable their criterion. A rating value that is not a
    /// number also disables the rating criterion instead of comparing text.
    #[must_use]
    pub fn from_widgets(rating: &str, project: &str, user_search: &str) -> Self {
        let min_rating = if rating.is_empty() {
            None
        } else {
            match parse_ordinal("rating filter", rating) {
                Ok(min) => Some(min),
                Err(e) => {
                    tracing::debug!(%e, "rating filter disabled");
                    None
                }
            }
        };

        Self {
            min_rating,
            project: (!project.is_empty()).then(|| project.to_string()),
            user_search: (!user_search.is_empty()).then(|| user_search.to_lowercase()),
        }
    }

    /// `true` when no criterion is set.
    #[must_use]
    pub const fn is_unrestricted(&self) -> bool {
        self.min_rating.is_none() && self.project.is_none() && self.user_search.is_none()
    }

    /// Whether `entry` should be shown.
    #[must_use]
    pub fn matches(&self, entry: &Entry) -> bool {
        let mut show = true;
        if !rating_passes(entry, self.min_rating) {
            show = false;
        }
        if !project_passes(entry, self.project.as_deref()) {
            show = false;
        }
        if !user_passes(entry, self.user_search.as_deref()) {
            show = false;
        }
        show
    }
}

/// Numeric `rating >= min`. An entry without a rating fails an active threshold.
#[must_use]
pub fn rating_passes(entry: &Entry, min_rating: Option<u32>) -> bool {
    match min_rating {
        None => true,
        Some(min) => entry.rating.is_some_and(|rating| rating >= min),
    }
}

#[must_use]
pub fn project_passes(entry: &Entry, project: Option<&str>) -> bool {
    project.is_none_or(|project| entry.project == project)
}

/// Case-insensitive substring match; `needle` must already be lower-cased.
#[must_use]
pub fn user_passes(entry: &Entry, needle: Option<&str>) -> bool {
    needle.is_none_or(|needle| entry.user_name.to_lowercase().contains(needle))
}

/// Entries that survive `criteria`, in input order.
pub fn visible_entries<'a>(
    entries: &'a [Entry],
    criteria: &'a FilterCriteria,
) -> impl Iterator<Item = &'a Entry> + 'a {
    entries.iter().filter(move |entry| criteria.matches(entry))
}
