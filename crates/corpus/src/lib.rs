//! # Recall Corpus
//!
//! Document model and corpus loading for the retrieval engine.
//!
//! A [`Corpus`] is an ordered, validated collection of [`Document`]s. Order is
//! load-bearing: the position of a document in the corpus is its row index in
//! the embedding matrix built from it, so the loader preserves input order
//! exactly and rejects anything that would make row indices ambiguous
//! (duplicate ids) or meaningless (an empty collection).

mod document;
mod error;

pub use document::{Corpus, Document};
pub use error::{CorpusError, Result};
