//! Page setup: initializes every component from its own elements and routes
//! events to them.

use std::time::Duration;

use peer_config::PeerConfig;
use peer_core::severity::Severity;
use peer_lookup::CandidateSource;
use tokio::runtime::Handle;

use crate::dom::{Event, EventKind, NodeId, SharedDocument};
use crate::error::PageError;
use crate::filter::{FilterEngine, FilterSummary, FilterWidgets};
use crate::gate::{FormGate, GateWidgets};
use crate::notify::{NotificationHandle, Notifier};
use crate::rating::RatingDisplay;
use crate::resolver::{LookupResolver, ResolverSettings, ResolverState, ResolverWidgets};
use crate::selectors::PageSelectors;

/// Timing and threshold knobs of the page components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSettings {
    pub debounce: Duration,
    pub min_query_len: usize,
    pub notification_lifetime: Duration,
    pub min_comment_len: usize,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self::from(&PeerConfig::default())
    }
}

impl From<&PeerConfig> for PageSettings {
    fn from(config: &PeerConfig) -> Self {
        Self {
            debounce: Duration::from_millis(config.lookup.debounce_ms),
            min_query_len: config.lookup.min_query_len,
            notification_lifetime: Duration::from_millis(config.notifications.lifetime_ms),
            min_comment_len: config.form.min_comment_len,
        }
    }
}

/// What an event caused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// No component listens to this event.
    Ignored,
    Filtered(FilterSummary),
    /// Rating display updated; carries the number of active labels.
    RatingShown(usize),
    LookupScheduled,
    CandidateSelected(String),
    NotificationDismissed,
    /// Review form submitted; `allowed` is the gate's verdict.
    Submit { allowed: bool },
}

/// All interactive behavior of a review page, wired to one document.
pub struct ReviewPage<S> {
    doc: SharedDocument,
    filter: FilterEngine,
    rating: RatingDisplay,
    resolver: LookupResolver<S>,
    gate: FormGate,
    notifier: Notifier,
}

impl<S: CandidateSource> ReviewPage<S> {
    /// Initialize every component against the elements present in `doc`.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime; timers and lookups are
    /// spawned onto the current one.
    #[must_use]
    pub fn setup(
        doc: SharedDocument,
        selectors: &PageSelectors,
        settings: &PageSettings,
        source: S,
    ) -> Self {
        let runtime = Handle::current();
        let (filter_widgets, resolver_widgets, gate_widgets) = doc.with(|d| {
            (
                FilterWidgets::resolve(d, selectors),
                ResolverWidgets::resolve(d, selectors),
                GateWidgets::resolve(d, selectors),
            )
        });

        let notifier = Notifier::new(
            doc.clone(),
            &selectors.notification_container,
            settings.notification_lifetime,
            runtime.clone(),
        );
        let filter = FilterEngine::init(doc.clone(), filter_widgets, selectors);
        let rating = RatingDisplay::init(doc.clone(), selectors);
        let resolver = LookupResolver::init(
            doc.clone(),
            resolver_widgets,
            ResolverSettings {
                delay: settings.debounce,
                min_query_len: settings.min_query_len,
            },
            source,
            notifier.clone(),
            runtime,
        );
        let gate = FormGate::init(
            doc.clone(),
            gate_widgets,
            selectors,
            settings.min_comment_len,
            notifier.clone(),
        );

        Self {
            doc,
            filter,
            rating,
            resolver,
            gate,
            notifier,
        }
    }

    #[must_use]
    pub const fn document(&self) -> &SharedDocument {
        &self.doc
    }

    /// Route one event to the component listening for it.
    pub fn dispatch(&self, event: Event) -> Dispatch {
        if self.filter.listens_to(&event) {
            return Dispatch::Filtered(self.filter.reevaluate());
        }
        if self.rating.listens_to(&event) {
            return Dispatch::RatingShown(self.rating.on_change(event.target));
        }
        if self.resolver.listens_to(&event) {
            let query = self
                .doc
                .with(|d| d.value(event.target).unwrap_or_default().to_string());
            self.resolver.on_input(query);
            return Dispatch::LookupScheduled;
        }
        if self.gate.listens_to(&event) {
            return Dispatch::Submit {
                allowed: self.gate.validate(),
            };
        }
        if event.kind == EventKind::Click {
            if let Some(item) = self.resolver.candidate_for(event.target)
                && let Some(email) = self.resolver.select(item)
            {
                return Dispatch::CandidateSelected(email);
            }
            if let Some(banner) = self.notifier.banner_for_close(event.target)
                && self.notifier.dismiss(banner)
            {
                return Dispatch::NotificationDismissed;
            }
        }
        Dispatch::Ignored
    }

    // ── User actions ────────────────────────────────────────────────

    /// Replace a text field's value and fire `Input`.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::NodeDetached`] if `node` is gone.
    pub fn type_text(&self, node: NodeId, text: &str) -> Result<Dispatch, PageError> {
        self.doc.with(|d| d.set_value(node, text))?;
        Ok(self.dispatch(Event::new(EventKind::Input, node)))
    }

    /// Set a select's value and fire `Change`.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::NodeDetached`] if `node` is gone.
    pub fn choose(&self, node: NodeId, value: &str) -> Result<Dispatch, PageError> {
        self.doc.with(|d| d.set_value(node, value))?;
        Ok(self.dispatch(Event::new(EventKind::Change, node)))
    }

    /// Check a radio input (unchecking its group) and fire `Change`.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::NodeDetached`] if `node` is gone.
    pub fn check(&self, node: NodeId) -> Result<Dispatch, PageError> {
        self.doc.with(|d| {
            let group = d.attr(node, "name").map(str::to_string);
            if let Some(group) = group {
                for sibling in d.by_attr("name", &group) {
                    d.set_checked(sibling, false)?;
                }
            }
            d.set_checked(node, true)
        })?;
        Ok(self.dispatch(Event::new(EventKind::Change, node)))
    }

    pub fn click(&self, node: NodeId) -> Dispatch {
        self.dispatch(Event::new(EventKind::Click, node))
    }

    pub fn submit(&self, form: NodeId) -> Dispatch {
        self.dispatch(Event::new(EventKind::Submit, form))
    }

    // ── Facade ──────────────────────────────────────────────────────

    pub fn filter_reviews(&self) -> FilterSummary {
        self.filter.reevaluate()
    }

    /// Look `query` up right away, without waiting for a typing pause.
    pub fn search_users(&self, query: &str) {
        self.resolver.search_now(query);
    }

    pub fn validate_review_form(&self) -> bool {
        self.gate.validate()
    }

    pub fn show_alert(&self, message: &str, severity: Severity) -> Option<NotificationHandle> {
        self.notifier.show(message, severity)
    }

    #[must_use]
    pub fn lookup_state(&self) -> ResolverState {
        self.resolver.state()
    }
}
