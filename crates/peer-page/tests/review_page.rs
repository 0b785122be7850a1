//! End-to-end behavior of a fully wired review page.

use std::future::{Future, ready};
use std::time::Duration;

use peer_core::candidate::Candidate;
use peer_core::severity::Severity;
use peer_lookup::{CandidateSource, LookupOutcome};
use peer_page::dom::{Document, Element, NodeId, SharedDocument};
use peer_page::filter::FilterSummary;
use peer_page::notify::{ALERT_CLASS, CLOSE_CLASS};
use peer_page::rating::{ACTIVE_CLASS, STARS_CLASS};
use peer_page::resolver::{OPEN_CLASS, ResolverState, UNAVAILABLE};
use peer_page::{Dispatch, PageSelectors, PageSettings, ReviewPage};
use pretty_assertions::assert_eq;

// ── Sources ────────────────────────────────────────────────────────

/// Answers with every known person whose name contains the query.
#[derive(Clone)]
struct Directory(Vec<Candidate>);

impl Directory {
    fn staff() -> Self {
        Self(vec![
            person("Ana Anić", "ana.anic@fer.hr", Some("FER"), Some("ZEMRIS")),
            person("Ana Kovač", "ana.kovac@fer.hr", None, None),
            person("Ivo Ivić", "ivo.ivic@fer.hr", Some("FER"), None),
        ])
    }
}

impl CandidateSource for Directory {
    fn search(&self, query: &str) -> impl Future<Output = LookupOutcome> + Send {
        let needle = query.to_lowercase();
        let found = self
            .0
            .iter()
            .filter(|c| c.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        ready(LookupOutcome::Found(found))
    }
}

/// A directory whose server is down.
struct Unreachable;

impl CandidateSource for Unreachable {
    fn search(&self, _query: &str) -> impl Future<Output = LookupOutcome> + Send {
        ready(LookupOutcome::Failed {
            reason: "API error (503): maintenance".into(),
        })
    }
}

fn person(name: &str, email: &str, faculty: Option<&str>, department: Option<&str>) -> Candidate {
    Candidate {
        id: None,
        name: name.into(),
        email: email.into(),
        faculty: faculty.map(Into::into),
        department: department.map(Into::into),
    }
}

// ── Fixture ────────────────────────────────────────────────────────

struct Fixture {
    doc: SharedDocument,
    container: NodeId,
    rating_filter: NodeId,
    project_filter: NodeId,
    user_filter: NodeId,
    rows: Vec<NodeId>,
    form: NodeId,
    lookup: NodeId,
    results: NodeId,
    selection: NodeId,
    rating_inputs: Vec<NodeId>,
    stars: Vec<NodeId>,
    comment: NodeId,
}

/// Listing with filters and four reviews, followed by the review form.
fn fixture() -> Fixture {
    let mut doc = Document::new();
    let root = doc.root();
    let container = doc
        .append(root, Element::new("main").with_class("container"))
        .unwrap();

    let rating_filter = doc
        .append(container, Element::new("select").with_id("filter_rating"))
        .unwrap();
    let project_filter = doc
        .append(container, Element::new("select").with_id("filter_project"))
        .unwrap();
    let user_filter = doc
        .append(container, Element::new("input").with_id("search_user"))
        .unwrap();

    let list = doc.append(container, Element::new("div")).unwrap();
    let rows = [
        ("5", "Research", "Ana Anić"),
        ("3", "Teaching", "Ivo Ivić"),
        ("4", "Research", "Marija Horvat"),
        ("", "Teaching", "Ana Kovač"),
    ]
    .into_iter()
    .map(|(rating, project, user)| {
        doc.append(
            list,
            Element::new("div")
                .with_class("review-card")
                .with_attr("data-rating", rating)
                .with_attr("data-project", project)
                .with_attr("data-user", user),
        )
        .unwrap()
    })
    .collect();

    let form = doc
        .append(container, Element::new("form").with_id("review-form"))
        .unwrap();
    let lookup = doc
        .append(form, Element::new("input").with_id("user-search"))
        .unwrap();
    let results = doc
        .append(
            form,
            Element::new("div")
                .with_id("search-results")
                .with_class("dropdown-menu"),
        )
        .unwrap();
    let selection = doc
        .append(
            form,
            Element::new("input")
                .with_id("reviewed_user_email")
                .with_attr("type", "hidden"),
        )
        .unwrap();

    let mut rating_inputs = Vec::new();
    let mut stars = Vec::new();
    for n in 1..=5 {
        let id = format!("rating{n}");
        rating_inputs.push(
            doc.append(
                form,
                Element::new("input")
                    .with_id(&id)
                    .with_attr("type", "radio")
                    .with_attr("name", "rating")
                    .with_value(&n.to_string()),
            )
            .unwrap(),
        );
        let label = doc
            .append(form, Element::new("label").with_attr("for", &id))
            .unwrap();
        stars.push(
            doc.append(label, Element::new("span").with_class(STARS_CLASS))
                .unwrap(),
        );
    }

    let comment = doc
        .append(form, Element::new("textarea").with_id("comment"))
        .unwrap();

    Fixture {
        doc: SharedDocument::new(doc),
        container,
        rating_filter,
        project_filter,
        user_filter,
        rows,
        form,
        lookup,
        results,
        selection,
        rating_inputs,
        stars,
        comment,
    }
}

fn wire<S: CandidateSource>(f: &Fixture, source: S) -> ReviewPage<S> {
    ReviewPage::setup(
        f.doc.clone(),
        &PageSelectors::default(),
        &PageSettings::default(),
        source,
    )
}

fn hidden(f: &Fixture) -> Vec<bool> {
    f.doc
        .with(|d| f.rows.iter().map(|row| d.is_hidden(*row)).collect())
}

fn banners(f: &Fixture) -> Vec<NodeId> {
    f.doc.with(|d| d.by_class(ALERT_CLASS))
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

// ── Filtering ──────────────────────────────────────────────────────

#[tokio::test]
async fn filters_combine_and_reset() {
    let f = fixture();
    let page = wire(&f, Directory::staff());

    assert_eq!(
        page.choose(f.rating_filter, "4").unwrap(),
        Dispatch::Filtered(FilterSummary {
            visible: 2,
            hidden: 2
        })
    );
    assert_eq!(hidden(&f), vec![false, true, false, true]);

    page.choose(f.project_filter, "Research").unwrap();
    assert_eq!(
        page.type_text(f.user_filter, "ANA").unwrap(),
        Dispatch::Filtered(FilterSummary {
            visible: 1,
            hidden: 3
        })
    );
    assert_eq!(hidden(&f), vec![false, true, true, true]);

    page.choose(f.rating_filter, "").unwrap();
    page.choose(f.project_filter, "").unwrap();
    page.type_text(f.user_filter, "").unwrap();
    assert_eq!(hidden(&f), vec![false; 4]);
}

#[tokio::test]
async fn unrated_review_only_hidden_by_a_threshold() {
    let f = fixture();
    let page = wire(&f, Directory::staff());

    page.choose(f.project_filter, "Teaching").unwrap();
    assert_eq!(hidden(&f), vec![true, false, true, false]);

    page.choose(f.rating_filter, "1").unwrap();
    assert_eq!(hidden(&f), vec![true, false, true, true]);
}

#[tokio::test]
async fn reevaluating_twice_changes_nothing() {
    let f = fixture();
    let page = wire(&f, Directory::staff());

    page.choose(f.rating_filter, "5").unwrap();
    let first = hidden(&f);
    let summary = page.filter_reviews();
    assert_eq!(hidden(&f), first);
    assert_eq!(
        summary,
        FilterSummary {
            visible: 1,
            hidden: 3
        }
    );
}

// ── Rating display ─────────────────────────────────────────────────

#[tokio::test]
async fn checking_a_rating_lights_stars_and_unchecks_the_rest() {
    let f = fixture();
    let page = wire(&f, Directory::staff());

    assert_eq!(
        page.check(f.rating_inputs[2]).unwrap(),
        Dispatch::RatingShown(3)
    );
    assert_eq!(
        page.check(f.rating_inputs[0]).unwrap(),
        Dispatch::RatingShown(1)
    );

    f.doc.with(|d| {
        let lit: Vec<bool> = f.stars.iter().map(|s| d.has_class(*s, ACTIVE_CLASS)).collect();
        assert_eq!(lit, vec![true, false, false, false, false]);
        assert!(!d.is_checked(f.rating_inputs[2]));
        assert!(d.is_checked(f.rating_inputs[0]));
    });
}

// ── Lookup and submission ──────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn lookup_selection_then_submit_passes_the_gate() {
    let f = fixture();
    let page = wire(&f, Directory::staff());

    assert_eq!(
        page.type_text(f.lookup, "an").unwrap(),
        Dispatch::LookupScheduled
    );
    assert_eq!(page.lookup_state(), ResolverState::Pending);

    tokio::time::sleep(ms(310)).await;
    assert_eq!(page.lookup_state(), ResolverState::Displaying);

    let (items, first_name) = f.doc.with(|d| {
        let items = d.children(f.results).to_vec();
        assert!(d.has_class(f.results, OPEN_CLASS));
        assert_eq!(
            d.text_content(items[0]),
            "Ana Anić ana.anic@fer.hr FER - ZEMRIS"
        );
        assert_eq!(d.text_content(items[1]), "Ana Kovač ana.kovac@fer.hr");
        let first_name = d.children(items[0])[0];
        (items, first_name)
    });
    assert_eq!(items.len(), 2);

    assert_eq!(
        page.click(first_name),
        Dispatch::CandidateSelected("ana.anic@fer.hr".into())
    );
    f.doc.with(|d| {
        assert_eq!(d.value(f.selection), Some("ana.anic@fer.hr"));
        assert!(d.children(f.results).is_empty());
        assert!(!d.has_class(f.results, OPEN_CLASS));
    });
    assert_eq!(page.lookup_state(), ResolverState::Idle);

    page.check(f.rating_inputs[3]).unwrap();
    assert_eq!(
        page.type_text(f.comment, "Thorough and kind feedback.")
            .unwrap(),
        Dispatch::Ignored
    );
    assert_eq!(page.submit(f.form), Dispatch::Submit { allowed: true });
    assert!(banners(&f).is_empty());
}

#[tokio::test(start_paused = true)]
async fn short_lookup_query_shows_nothing() {
    let f = fixture();
    let page = wire(&f, Directory::staff());

    page.type_text(f.lookup, "a").unwrap();
    tokio::time::sleep(ms(310)).await;

    assert_eq!(page.lookup_state(), ResolverState::Idle);
    assert!(f.doc.with(|d| d.children(f.results).is_empty()));
}

#[tokio::test(start_paused = true)]
async fn failed_lookup_warns_once_and_goes_idle() {
    let f = fixture();
    let page = wire(&f, Unreachable);

    page.type_text(f.lookup, "ana").unwrap();
    tokio::time::sleep(ms(310)).await;

    assert_eq!(page.lookup_state(), ResolverState::Idle);
    let shown = banners(&f);
    assert_eq!(shown.len(), 1);
    f.doc.with(|d| {
        assert!(d.has_class(shown[0], "alert-warning"));
        assert_eq!(d.text_content(shown[0]), UNAVAILABLE);
        assert!(d.children(f.results).is_empty());
    });
}

#[tokio::test(start_paused = true)]
async fn empty_form_is_blocked_with_one_dismissible_banner() {
    let f = fixture();
    let page = wire(&f, Directory::staff());

    assert_eq!(page.submit(f.form), Dispatch::Submit { allowed: false });

    let shown = banners(&f);
    assert_eq!(shown.len(), 1);
    let close = f.doc.with(|d| {
        assert_eq!(d.children(f.container)[0], shown[0]);
        assert!(d.has_class(shown[0], "alert-danger"));
        assert_eq!(
            d.text_content(shown[0]),
            "Please enter your colleague's email address."
        );
        d.find_within(shown[0], CLOSE_CLASS).unwrap()
    });

    assert_eq!(page.click(close), Dispatch::NotificationDismissed);
    assert!(banners(&f).is_empty());
}

#[tokio::test(start_paused = true)]
async fn short_comment_is_blocked_and_fields_are_kept() {
    let f = fixture();
    let page = wire(&f, Directory::staff());

    f.doc
        .with(|d| d.set_value(f.selection, "ivo.ivic@fer.hr"))
        .unwrap();
    page.check(f.rating_inputs[4]).unwrap();
    page.type_text(f.comment, "Too short").unwrap();

    assert!(!page.validate_review_form());
    f.doc.with(|d| {
        let shown = d.by_class(ALERT_CLASS);
        assert_eq!(shown.len(), 1);
        assert_eq!(
            d.text_content(shown[0]),
            "The comment must be at least 10 characters long."
        );
        assert_eq!(d.value(f.selection), Some("ivo.ivic@fer.hr"));
        assert_eq!(d.value(f.comment), Some("Too short"));
        assert!(d.is_checked(f.rating_inputs[4]));
    });
}

// ── Notifications ──────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn alerts_expire_after_their_lifetime() {
    let f = fixture();
    let page = wire(&f, Directory::staff());

    let handle = page.show_alert("Review saved.", Severity::Success).unwrap();
    tokio::time::sleep(ms(4990)).await;
    assert!(f.doc.with(|d| d.is_attached(handle.node())));

    tokio::time::sleep(ms(20)).await;
    assert!(banners(&f).is_empty());
}

// ── Degraded pages ─────────────────────────────────────────────────

#[tokio::test]
async fn bare_page_ignores_everything() {
    let doc = SharedDocument::new(Document::new());
    let page = ReviewPage::setup(
        doc.clone(),
        &PageSelectors::default(),
        &PageSettings::default(),
        Directory::staff(),
    );
    let root = doc.with(|d| d.root());

    assert_eq!(page.click(root), Dispatch::Ignored);
    assert_eq!(page.submit(root), Dispatch::Ignored);
    assert_eq!(page.filter_reviews(), FilterSummary::default());
    assert!(page.show_alert("nowhere", Severity::Info).is_none());
}

#[tokio::test]
async fn clicks_outside_components_are_ignored() {
    let f = fixture();
    let page = wire(&f, Directory::staff());

    assert_eq!(page.click(f.rows[0]), Dispatch::Ignored);
    assert_eq!(page.click(f.results), Dispatch::Ignored);
}
