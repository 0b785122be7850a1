//! Transient, dismissible banners at the top of the main content container.

use std::time::Duration;

use peer_core::severity::Severity;
use tokio::runtime::Handle;

use crate::dom::{Element, NodeId, SharedDocument};

/// Class of every banner element.
pub const ALERT_CLASS: &str = "alert";
/// Class of the close button inside a banner.
pub const CLOSE_CLASS: &str = "btn-close";

/// Handle to one shown banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationHandle(NodeId);

impl NotificationHandle {
    #[must_use]
    pub const fn node(self) -> NodeId {
        self.0
    }
}

#[derive(Clone)]
pub struct Notifier {
    doc: SharedDocument,
    container_class: String,
    lifetime: Duration,
    runtime: Handle,
}

impl Notifier {
    #[must_use]
    pub fn new(
        doc: SharedDocument,
        container_class: &str,
        lifetime: Duration,
        runtime: Handle,
    ) -> Self {
        Self {
            doc,
            container_class: container_class.to_string(),
            lifetime,
            runtime,
        }
    }

    /// Prepend a banner to the first content container and schedule its removal.
    ///
    /// Banners stack; identical messages are not merged. Returns `None` when
    /// the page has no container.
    pub fn show(&self, message: &str, severity: Severity) -> Option<NotificationHandle> {
        let shown = self.doc.with(|doc| {
            let container = doc.first_by_class(&self.container_class)?;
            let banner = Element::new("div")
                .with_class(&format!(
                    "{ALERT_CLASS} alert-{severity} alert-dismissible fade show"
                ))
                .with_attr("role", "alert")
                .with_text(message);
            let node = doc.prepend(container, banner).ok()?;
            doc.append(
                node,
                Element::new("button")
                    .with_class(CLOSE_CLASS)
                    .with_attr("type", "button")
                    .with_attr("aria-label", "Close"),
            )
            .ok()?;
            Some(node)
        });

        let Some(node) = shown else {
            tracing::warn!(%severity, message, "no notification container on page");
            return None;
        };

        let doc = self.doc.clone();
        let lifetime = self.lifetime;
        self.runtime.spawn(async move {
            tokio::time::sleep(lifetime).await;
            doc.with(|doc| {
                // Already dismissed by hand.
                if doc.is_attached(node) {
                    let _ = doc.remove(node);
                }
            });
        });

        Some(NotificationHandle(node))
    }

    /// Remove a banner early. Returns `false` if it was already gone.
    pub fn dismiss(&self, handle: NotificationHandle) -> bool {
        self.doc.with(|doc| doc.remove(handle.0).is_ok())
    }

    /// The banner whose close button is `target`, if any.
    #[must_use]
    pub fn banner_for_close(&self, target: NodeId) -> Option<NotificationHandle> {
        self.doc.with(|doc| {
            if !doc.has_class(target, CLOSE_CLASS) {
                return None;
            }
            doc.closest_with_class(target, ALERT_CLASS)
                .map(NotificationHandle)
        })
    }

    /// Banners currently attached, newest first.
    #[must_use]
    pub fn active(&self) -> Vec<NotificationHandle> {
        self.doc.with(|doc| {
            doc.by_class(ALERT_CLASS)
                .into_iter()
                .map(NotificationHandle)
                .collect()
        })
    }
}
