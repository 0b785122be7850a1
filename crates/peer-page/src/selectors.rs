//! Names the components use to find their elements in the rendered page.

/// Element ids, classes and attribute names of the review pages.
///
/// Defaults match the server templates; every component tolerates its
/// elements being absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSelectors {
    /// Rating threshold `<select>` of the listing filter.
    pub rating_filter: String,
    /// Project category `<select>` of the listing filter.
    pub project_filter: String,
    /// Free-text user search box of the listing filter.
    pub user_filter: String,
    /// Class marking one review row.
    pub entry_class: String,
    pub entry_rating_attr: String,
    pub entry_project_attr: String,
    pub entry_user_attr: String,

    /// `name` shared by the rating radio inputs.
    pub rating_group: String,
    /// Prefix of the `for` attribute of rating labels (`rating3` → 3).
    pub rating_label_prefix: String,

    /// Person lookup text box.
    pub lookup_input: String,
    /// Dropdown receiving lookup candidates.
    pub lookup_results: String,
    /// Field receiving the selected candidate's email.
    pub selection_field: String,

    /// The review form itself.
    pub review_form: String,
    pub comment_field: String,

    /// Class of the container notifications are prepended into.
    pub notification_container: String,
}

impl Default for PageSelectors {
    fn default() -> Self {
        Self {
            rating_filter: "filter_rating".into(),
            project_filter: "filter_project".into(),
            user_filter: "search_user".into(),
            entry_class: "review-card".into(),
            entry_rating_attr: "data-rating".into(),
            entry_project_attr: "data-project".into(),
            entry_user_attr: "data-user".into(),
            rating_group: "rating".into(),
            rating_label_prefix: "rating".into(),
            lookup_input: "user-search".into(),
            lookup_results: "search-results".into(),
            selection_field: "reviewed_user_email".into(),
            review_form: "review-form".into(),
            comment_field: "comment".into(),
            notification_container: "container".into(),
        }
    }
}
