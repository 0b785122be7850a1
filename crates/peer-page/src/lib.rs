//! # peer-page
//!
//! In-page interaction layer of the peer review listing.
//!
//! Components operate on a [`dom::Document`] shared behind a
//! [`dom::SharedDocument`] and react to [`dom::Event`]s:
//! - [`filter::FilterEngine`] hides review rows that fail the current criteria
//! - [`rating::RatingDisplay`] mirrors the chosen rating as lit stars
//! - [`resolver::LookupResolver`] turns typed text into selectable colleagues
//! - [`gate::FormGate`] blocks incomplete review submissions
//! - [`notify::Notifier`] shows self-expiring banners
//!
//! [`page::ReviewPage`] wires all of them to one document.

pub mod dom;
pub mod filter;
pub mod gate;
pub mod notify;
pub mod page;
pub mod predicate;
pub mod rating;
pub mod resolver;
pub mod selectors;

mod error;

pub use error::PageError;
pub use page::{Dispatch, PageSettings, ReviewPage};
pub use selectors::PageSelectors;
