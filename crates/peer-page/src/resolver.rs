//! Debounced person lookup for the review form.
//!
//! ```text
//! Idle ──keystroke──▶ Pending ──timer, query too short──▶ Idle
//!                        │
//!                        └──timer──▶ Loading ──response──▶ Displaying ──click──▶ Idle
//!                                       └──failure──▶ Idle (warning banner)
//! ```
//!
//! Every keystroke aborts the pending timer and starts a new one. A request,
//! once issued, runs to completion in its own task; each carries a sequence
//! number and only the response of the latest request is ever rendered.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use peer_core::candidate::Candidate;
use peer_core::severity::Severity;
use peer_lookup::{CandidateSource, LookupOutcome};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::dom::{Document, Element, Event, EventKind, NodeId, SharedDocument};
use crate::error::PageError;
use crate::notify::Notifier;
use crate::selectors::PageSelectors;

/// Class of each rendered candidate (and of the placeholder).
pub const ITEM_CLASS: &str = "dropdown-item";
/// Class that makes the results dropdown visible.
pub const OPEN_CLASS: &str = "show";
/// Attribute carrying a rendered candidate's email.
pub const EMAIL_ATTR: &str = "data-email";
/// Text of the single item rendered for an empty result set.
pub const NO_RESULTS: &str = "No results";
/// Banner shown when a lookup fails.
pub const UNAVAILABLE: &str = "User search is unavailable right now.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolverState {
    Idle,
    /// A debounce timer is running.
    Pending,
    /// A request is in flight.
    Loading,
    /// Candidates (or the placeholder) are on screen.
    Displaying,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolverWidgets {
    pub search_box: Option<NodeId>,
    pub results: Option<NodeId>,
    pub selection: Option<NodeId>,
}

impl ResolverWidgets {
    #[must_use]
    pub fn resolve(doc: &Document, selectors: &PageSelectors) -> Self {
        Self {
            search_box: doc.get_by_id(&selectors.lookup_input),
            results: doc.get_by_id(&selectors.lookup_results),
            selection: doc.get_by_id(&selectors.selection_field),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolverSettings {
    pub delay: Duration,
    pub min_query_len: usize,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(300),
            min_query_len: 2,
        }
    }
}

struct Inner<S> {
    doc: SharedDocument,
    widgets: ResolverWidgets,
    settings: ResolverSettings,
    source: S,
    notifier: Notifier,
    runtime: Handle,
    timer: Mutex<Option<JoinHandle<()>>>,
    state: Mutex<ResolverState>,
    /// Sequence of the newest request; responses carrying another one are stale.
    latest: AtomicU64,
}

pub struct LookupResolver<S> {
    inner: Arc<Inner<S>>,
}

impl<S> Clone for LookupResolver<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: CandidateSource> LookupResolver<S> {
    #[must_use]
    pub fn init(
        doc: SharedDocument,
        widgets: ResolverWidgets,
        settings: ResolverSettings,
        source: S,
        notifier: Notifier,
        runtime: Handle,
    ) -> Self {
        if widgets.search_box.is_none() {
            tracing::debug!("no lookup input on page; autocomplete disabled");
        }
        Self {
            inner: Arc::new(Inner {
                doc,
                widgets,
                settings,
                source,
                notifier,
                runtime,
                timer: Mutex::new(None),
                state: Mutex::new(ResolverState::Idle),
                latest: AtomicU64::new(0),
            }),
        }
    }

    #[must_use]
    pub fn state(&self) -> ResolverState {
        *lock(&self.inner.state)
    }

    fn set_state(&self, state: ResolverState) {
        *lock(&self.inner.state) = state;
    }

    #[must_use]
    pub fn listens_to(&self, event: &Event) -> bool {
        event.kind == EventKind::Input && Some(event.target) == self.inner.widgets.search_box
    }

    /// Restart the debounce window for `query`.
    pub fn on_input(&self, query: String) {
        let mut timer = lock(&self.inner.timer);
        if let Some(pending) = timer.take() {
            pending.abort();
        }

        let this = self.clone();
        let delay = self.inner.settings.delay;
        *timer = Some(self.inner.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            this.release_timer();
            this.search_now(&query);
        }));
        self.set_state(ResolverState::Pending);
    }

    /// Drop the timer slot if it still holds the calling timer task.
    fn release_timer(&self) {
        let mut timer = lock(&self.inner.timer);
        if timer
            .as_ref()
            .is_some_and(|handle| handle.id() == tokio::task::id())
        {
            timer.take();
        }
    }

    /// Move to `state` unless a debounce timer is waiting, which keeps `Pending`.
    fn settle(&self, state: ResolverState) {
        let timer = lock(&self.inner.timer);
        if timer.is_none() {
            self.set_state(state);
        }
    }

    /// Run the lookup for `query` immediately, bypassing the debounce.
    ///
    /// Queries shorter than the minimum (after trimming) clear the results
    /// and never reach the network.
    pub fn search_now(&self, query: &str) {
        if query.trim().chars().count() < self.inner.settings.min_query_len {
            self.invalidate();
            self.clear_results();
            self.set_state(ResolverState::Idle);
            return;
        }

        let seq = self.inner.latest.fetch_add(1, Ordering::SeqCst) + 1;
        self.set_state(ResolverState::Loading);
        tracing::debug!(seq, query, "user lookup issued");

        let this = self.clone();
        let query = query.to_string();
        self.inner.runtime.spawn(async move {
            let outcome = this.inner.source.search(&query).await;
            this.finish(seq, &query, outcome);
        });
    }

    fn finish(&self, seq: u64, query: &str, outcome: LookupOutcome) {
        let applied = self.inner.doc.with(|doc| {
            if self.inner.latest.load(Ordering::SeqCst) != seq {
                return None;
            }
            Some(match &outcome {
                LookupOutcome::Found(candidates) => self.render(doc, candidates),
                LookupOutcome::Failed { .. } => self.clear_in(doc).map(|()| false),
            })
        });

        match applied {
            None => tracing::debug!(seq, query, "discarding stale lookup response"),
            Some(Ok(shown)) => {
                if let LookupOutcome::Failed { reason } = &outcome {
                    tracing::warn!(seq, query, reason, "user lookup failed");
                    self.inner.notifier.show(UNAVAILABLE, Severity::Warning);
                }
                self.settle(if shown {
                    ResolverState::Displaying
                } else {
                    ResolverState::Idle
                });
            }
            Some(Err(e)) => {
                tracing::debug!(%e, "lookup results container vanished");
                self.settle(ResolverState::Idle);
            }
        }
    }

    /// Replace the dropdown contents with `candidates` and open it.
    ///
    /// Returns `false` when the page has no results container.
    fn render(&self, doc: &mut Document, candidates: &[Candidate]) -> Result<bool, PageError> {
        let Some(results) = self.inner.widgets.results else {
            return Ok(false);
        };
        doc.clear_children(results)?;

        if candidates.is_empty() {
            doc.append(
                results,
                Element::new("div")
                    .with_class(&format!("{ITEM_CLASS} text-muted"))
                    .with_text(NO_RESULTS),
            )?;
        }

        for candidate in candidates {
            let item = doc.append(
                results,
                Element::new("a")
                    .with_class(ITEM_CLASS)
                    .with_attr("href", "#")
                    .with_attr(EMAIL_ATTR, &candidate.email),
            )?;
            doc.append(item, Element::new("strong").with_text(&candidate.name))?;
            doc.append(
                item,
                Element::new("div")
                    .with_class("small text-muted")
                    .with_text(&candidate.email),
            )?;
            if let Some(affiliation) = candidate.affiliation() {
                doc.append(
                    item,
                    Element::new("div")
                        .with_class("small text-muted")
                        .with_text(&affiliation),
                )?;
            }
        }

        doc.add_class(results, OPEN_CLASS)?;
        Ok(true)
    }

    fn clear_in(&self, doc: &mut Document) -> Result<(), PageError> {
        let Some(results) = self.inner.widgets.results else {
            return Ok(());
        };
        doc.clear_children(results)?;
        doc.remove_class(results, OPEN_CLASS)
    }

    /// Empty and close the dropdown.
    pub fn clear_results(&self) {
        if let Err(e) = self.inner.doc.with(|doc| self.clear_in(doc)) {
            tracing::debug!(%e, "lookup results container vanished");
        }
    }

    /// Make any in-flight response stale.
    fn invalidate(&self) {
        self.inner.latest.fetch_add(1, Ordering::SeqCst);
    }

    /// The rendered candidate `target` belongs to, if any.
    #[must_use]
    pub fn candidate_for(&self, target: NodeId) -> Option<NodeId> {
        let results = self.inner.widgets.results?;
        self.inner.doc.with(|doc| {
            let item = doc.closest_with_class(target, ITEM_CLASS)?;
            let inside = doc.get(item)?.parent() == Some(results);
            (inside && doc.attr(item, EMAIL_ATTR).is_some()).then_some(item)
        })
    }

    /// Commit the candidate rendered as `item`: write its email into the
    /// selection field, then clear and close the dropdown.
    pub fn select(&self, item: NodeId) -> Option<String> {
        let email = self.inner.doc.with(|doc| {
            let email = doc.attr(item, EMAIL_ATTR)?.to_string();
            if let Some(field) = self.inner.widgets.selection
                && let Err(e) = doc.set_value(field, &email)
            {
                tracing::debug!(%e, "selection field vanished");
            }
            Some(email)
        })?;

        self.invalidate();
        self.clear_results();
        self.set_state(ResolverState::Idle);
        tracing::debug!(email, "lookup candidate selected");
        Some(email)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
