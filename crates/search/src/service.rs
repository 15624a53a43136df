use crate::error::{Result, SearchError};
use crate::{K_MAX, K_MIN};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use recall_corpus::Document;
use recall_store::{rank, Store};
use serde::Serialize;
use std::collections::BTreeMap;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// One ranked (or randomly drawn) search result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub id: String,
    pub text: String,
    pub metadata: BTreeMap<String, String>,
    pub score: f32,
}

impl SearchHit {
    fn from_document(doc: &Document, score: f32) -> Self {
        Self {
            id: doc.id.clone(),
            text: doc.text.clone(),
            metadata: doc.metadata.clone(),
            score,
        }
    }
}

/// Read-only retrieval service over loaded namespace stores.
///
/// All stores are loaded up front; a load failure aborts construction so
/// the service never serves a partially loaded state. The only interior
/// mutability is the random generator behind the no-query path.
#[derive(Debug)]
pub struct QueryService {
    stores: HashMap<String, Arc<Store>>,
    rng: Mutex<StdRng>,
}

impl QueryService {
    /// Load every named namespace from `dir`. Fails fast on the first
    /// namespace that is missing or unreadable.
    pub async fn open<S: AsRef<str>>(
        dir: impl AsRef<Path>,
        namespaces: impl IntoIterator<Item = S>,
    ) -> Result<Self> {
        let dir = dir.as_ref();
        let mut stores = HashMap::new();
        for namespace in namespaces {
            let namespace = namespace.as_ref();
            let store = Store::load(dir, namespace).await?;
            stores.insert(namespace.to_string(), Arc::new(store));
        }
        log::info!("Query service ready: {} namespaces", stores.len());
        Ok(Self::from_stores(stores))
    }

    /// Build a service from already-loaded stores.
    #[must_use]
    pub fn from_stores(stores: HashMap<String, Arc<Store>>) -> Self {
        Self {
            stores,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Replace the random source with a seeded one. The no-query draw
    /// becomes a deterministic sequence; ranked search is unaffected.
    #[must_use]
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    pub fn namespaces(&self) -> impl Iterator<Item = &str> {
        self.stores.keys().map(String::as_str)
    }

    /// Retrieve the most relevant documents for `query`, or one uniformly
    /// random document when no query is given.
    ///
    /// `k` must lie in `[K_MIN, K_MAX]`; out-of-range values are rejected
    /// before any ranking runs, never clamped. Ranked results come back
    /// score-descending, equal scores in corpus order, at most
    /// `min(k, corpus size)` of them. The random path always returns
    /// exactly one hit with a sentinel score of 1.0.
    pub fn search(
        &self,
        namespace: &str,
        query: Option<&str>,
        k: usize,
    ) -> Result<Vec<SearchHit>> {
        let store = self
            .stores
            .get(namespace)
            .ok_or_else(|| SearchError::UnknownNamespace(namespace.to_string()))?;

        if !(K_MIN..=K_MAX).contains(&k) {
            return Err(SearchError::InvalidK { k });
        }

        match query {
            // Whitespace-only text still counts as a query; it simply has
            // no known terms and scores zero everywhere.
            Some(text) if !text.is_empty() => self.ranked(store, text, k),
            _ => self.random_pick(store),
        }
    }

    fn ranked(&self, store: &Store, query: &str, k: usize) -> Result<Vec<SearchHit>> {
        log::debug!("Ranked search: query='{}', k={}", query, k);

        let query_vector = store.vectorizer().transform(query);
        let scored = rank(&query_vector, store.embeddings()).map_err(SearchError::Store)?;

        let hits: Vec<SearchHit> = scored
            .into_iter()
            .take(k)
            .filter_map(|(index, score)| {
                store
                    .corpus()
                    .get(index)
                    .map(|doc| SearchHit::from_document(doc, score))
            })
            .collect();

        log::debug!("Ranked search returned {} hits", hits.len());
        Ok(hits)
    }

    /// Distinct code path from ranking: one uniformly random document with
    /// a sentinel score of exactly 1.0.
    fn random_pick(&self, store: &Store) -> Result<Vec<SearchHit>> {
        let corpus = store.corpus();
        if corpus.is_empty() {
            return Err(SearchError::Store(recall_store::StoreError::Corpus(
                recall_corpus::CorpusError::Empty,
            )));
        }

        let index = {
            let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
            rng.gen_range(0..corpus.len())
        };
        // gen_range(0..len) is always in bounds
        let doc = corpus.get(index).expect("random index within corpus");

        log::debug!("Random pick: index={}, id={}", index, doc.id);
        Ok(vec![SearchHit::from_document(doc, 1.0)])
    }
}
