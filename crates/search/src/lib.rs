//! # Recall Search
//!
//! The public retrieval contract over one or more loaded namespaces.
//!
//! A [`QueryService`] is constructed once at process startup from the
//! persisted stores and is immutable afterwards: every store sits behind an
//! `Arc`, ranked search touches no shared mutable state, and any number of
//! [`QueryService::search`] calls may run in parallel. The one non-pure
//! path, "no query → one random document", draws from an injectable seeded
//! generator so tests can pin its output.

mod error;
mod service;

pub use error::{Result, SearchError};
pub use service::{QueryService, SearchHit};

/// Smallest accepted result count.
pub const K_MIN: usize = 1;
/// Largest accepted result count.
pub const K_MAX: usize = 20;
/// Result count used when the caller does not say.
pub const DEFAULT_K: usize = 5;
