//! # Recall Store
//!
//! Vector-space model, similarity ranking, and persistence for the
//! retrieval engine.
//!
//! ## Architecture
//!
//! ```text
//! Corpus (ordered documents)
//!     │
//!     ├──> TfidfModel::fit ──> vocabulary + idf weights
//!     │
//!     ├──> embedding matrix [n_docs, vocab_size]
//!     │
//!     └──> Store ──> save/load (three artifacts per namespace)
//!                      ├─ <ns>_documents.json
//!                      ├─ <ns>_embeddings.bin
//!                      └─ <ns>_vectorizer.bin
//! ```
//!
//! A store is built once from a corpus, persisted, and loaded read-only at
//! service startup. Query transforms reuse the frozen vectorizer model and
//! never extend its vocabulary.

mod error;
mod rank;
mod store;
mod tfidf;
mod tokenize;

pub use error::{Result, StoreError};
pub use rank::rank;
pub use store::Store;
pub use tfidf::TfidfModel;
pub use tokenize::tokenize;

// Re-export corpus types for convenience
pub use recall_corpus::{Corpus, CorpusError, Document};
