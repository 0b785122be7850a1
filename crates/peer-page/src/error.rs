//! Page error types.

use thiserror::Error;

use crate::dom::NodeId;

/// Errors raised by document mutations.
///
/// Components treat these as "feature unavailable" and log them; nothing
/// here should abort the page.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PageError {
    /// The node was removed (or never existed in this document).
    #[error("node {0} is not attached to the document")]
    NodeDetached(NodeId),

    /// The document root cannot be removed.
    #[error("cannot remove the document root")]
    RootRemoval,
}
