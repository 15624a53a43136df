use crate::error::{CorpusError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// One curated text item (a quote, a journal prompt, a wellness note).
///
/// Immutable once stored. The `meta` map carries free-form string attributes
/// such as `author` or `type`; its on-disk field name matches the persisted
/// documents artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub text: String,
    #[serde(default, rename = "meta")]
    pub metadata: BTreeMap<String, String>,
}

impl Document {
    #[must_use]
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            metadata: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// Ordered sequence of documents with unique ids.
///
/// Position in the corpus is the document's row index in the embedding
/// matrix, so iteration order always equals insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Corpus {
    documents: Vec<Document>,
}

impl Corpus {
    /// Validate raw records and assemble them into a corpus, preserving
    /// input order.
    pub fn from_records(records: Vec<Document>) -> Result<Self> {
        if records.is_empty() {
            return Err(CorpusError::Empty);
        }

        let mut seen: HashSet<&str> = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id.as_str()) {
                return Err(CorpusError::DuplicateId(record.id.clone()));
            }
        }

        log::debug!("Loaded corpus with {} documents", records.len());
        Ok(Self { documents: records })
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Document> {
        self.documents.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Document> {
        self.documents.iter()
    }

    /// Document texts in corpus order, as fed to the vectorizer fit step.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.documents.iter().map(|doc| doc.text.as_str())
    }
}
