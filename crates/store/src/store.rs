use crate::error::{Result, StoreError};
use crate::tfidf::TfidfModel;
use ndarray::Array2;
use recall_corpus::Corpus;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const STORE_SCHEMA_VERSION: u32 = 1;

const DOCUMENTS_ARTIFACT: &str = "documents";
const EMBEDDINGS_ARTIFACT: &str = "embeddings";
const VECTORIZER_ARTIFACT: &str = "vectorizer";

/// One namespace's retrieval state: the corpus, its embedding matrix, and
/// the vectorizer model the matrix was built with.
///
/// Built once from a validated corpus, persisted as three co-located
/// artifacts, and loaded read-only at service startup. Nothing mutates a
/// store after construction; a rebuild produces a new value.
#[derive(Debug, Clone)]
pub struct Store {
    corpus: Corpus,
    embeddings: Array2<f32>,
    vectorizer: TfidfModel,
}

/// Row-major matrix as persisted in the embeddings artifact.
#[derive(Debug, Serialize, Deserialize)]
struct PersistedEmbeddings {
    schema_version: u32,
    rows: usize,
    cols: usize,
    data: Vec<f32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct PersistedVectorizer {
    schema_version: u32,
    model: TfidfModel,
}

impl Store {
    /// Fit the vectorizer over the corpus texts and embed every document in
    /// one pass.
    #[must_use]
    pub fn build(corpus: Corpus) -> Self {
        let vectorizer = TfidfModel::fit(corpus.texts());
        let cols = vectorizer.vocab_size();

        let mut data = Vec::with_capacity(corpus.len() * cols);
        for text in corpus.texts() {
            data.extend(vectorizer.transform(text));
        }
        // transform always returns vocab_size weights per document
        let embeddings = Array2::from_shape_vec((corpus.len(), cols), data)
            .expect("row length matches vocabulary size");

        log::info!(
            "Built store: {} documents, {} terms",
            corpus.len(),
            cols
        );
        Self {
            corpus,
            embeddings,
            vectorizer,
        }
    }

    #[must_use]
    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    #[must_use]
    pub fn embeddings(&self) -> &Array2<f32> {
        &self.embeddings
    }

    #[must_use]
    pub fn vectorizer(&self) -> &TfidfModel {
        &self.vectorizer
    }

    /// Write the three artifacts for `namespace` under `dir`.
    ///
    /// Each artifact goes through a temp file and rename; all three are
    /// replaced in this one pass so a documents artifact is never left
    /// paired with a previous build's matrix.
    pub async fn save(&self, dir: impl AsRef<Path>, namespace: &str) -> Result<()> {
        let dir = dir.as_ref();
        tokio::fs::create_dir_all(dir).await?;

        let documents = serde_json::to_vec_pretty(&self.corpus)?;
        write_artifact(&documents_path(dir, namespace), &documents).await?;

        let persisted = PersistedEmbeddings {
            schema_version: STORE_SCHEMA_VERSION,
            rows: self.embeddings.nrows(),
            cols: self.embeddings.ncols(),
            data: self.embeddings.iter().copied().collect(),
        };
        let embeddings = serde_cbor::to_vec(&persisted)?;
        write_artifact(&embeddings_path(dir, namespace), &embeddings).await?;

        let persisted = PersistedVectorizer {
            schema_version: STORE_SCHEMA_VERSION,
            model: self.vectorizer.clone(),
        };
        let vectorizer = serde_cbor::to_vec(&persisted)?;
        write_artifact(&vectorizer_path(dir, namespace), &vectorizer).await?;

        log::info!(
            "Saved store '{}' to {:?} ({} documents)",
            namespace,
            dir,
            self.corpus.len()
        );
        Ok(())
    }

    /// Load the three artifacts for `namespace` from `dir`.
    ///
    /// All three must exist; a partial set fails with
    /// [`StoreError::NotFound`]. Decoded artifacts are cross-checked: the
    /// matrix must have one row per document and one column per vocabulary
    /// term, anything else is unrecoverable and fails fast.
    pub async fn load(dir: impl AsRef<Path>, namespace: &str) -> Result<Self> {
        let dir = dir.as_ref();
        log::info!("Loading store '{}' from {:?}", namespace, dir);

        let docs_path = documents_path(dir, namespace);
        let emb_path = embeddings_path(dir, namespace);
        let vec_path = vectorizer_path(dir, namespace);

        for (path, artifact) in [
            (&docs_path, DOCUMENTS_ARTIFACT),
            (&emb_path, EMBEDDINGS_ARTIFACT),
            (&vec_path, VECTORIZER_ARTIFACT),
        ] {
            if !path.exists() {
                return Err(StoreError::NotFound {
                    namespace: namespace.to_string(),
                    artifact,
                });
            }
        }

        let bytes = read_artifact(&docs_path, DOCUMENTS_ARTIFACT).await?;
        let corpus: Corpus =
            serde_json::from_slice(&bytes).map_err(|e| load_error(DOCUMENTS_ARTIFACT, &e))?;

        let bytes = read_artifact(&emb_path, EMBEDDINGS_ARTIFACT).await?;
        let persisted: PersistedEmbeddings =
            serde_cbor::from_slice(&bytes).map_err(|e| load_error(EMBEDDINGS_ARTIFACT, &e))?;
        if persisted.schema_version != STORE_SCHEMA_VERSION {
            return Err(StoreError::Load {
                artifact: EMBEDDINGS_ARTIFACT,
                reason: format!(
                    "unsupported schema_version {} (expected {STORE_SCHEMA_VERSION})",
                    persisted.schema_version
                ),
            });
        }
        let embeddings = Array2::from_shape_vec(
            (persisted.rows, persisted.cols),
            persisted.data,
        )
        .map_err(|e| StoreError::Corrupt(format!("embeddings shape mismatch: {e}")))?;

        let bytes = read_artifact(&vec_path, VECTORIZER_ARTIFACT).await?;
        let persisted: PersistedVectorizer =
            serde_cbor::from_slice(&bytes).map_err(|e| load_error(VECTORIZER_ARTIFACT, &e))?;
        if persisted.schema_version != STORE_SCHEMA_VERSION {
            return Err(StoreError::Load {
                artifact: VECTORIZER_ARTIFACT,
                reason: format!(
                    "unsupported schema_version {} (expected {STORE_SCHEMA_VERSION})",
                    persisted.schema_version
                ),
            });
        }
        let vectorizer = persisted.model;

        if embeddings.nrows() != corpus.len() {
            return Err(StoreError::Corrupt(format!(
                "embedding matrix has {} rows for {} documents",
                embeddings.nrows(),
                corpus.len()
            )));
        }
        if embeddings.ncols() != vectorizer.vocab_size() {
            return Err(StoreError::Corrupt(format!(
                "embedding matrix has {} columns for a {}-term vocabulary",
                embeddings.ncols(),
                vectorizer.vocab_size()
            )));
        }

        log::info!(
            "Loaded store '{}': {} documents, {} terms",
            namespace,
            corpus.len(),
            vectorizer.vocab_size()
        );
        Ok(Self {
            corpus,
            embeddings,
            vectorizer,
        })
    }
}

#[must_use]
pub fn documents_path(dir: &Path, namespace: &str) -> PathBuf {
    dir.join(format!("{namespace}_documents.json"))
}

#[must_use]
pub fn embeddings_path(dir: &Path, namespace: &str) -> PathBuf {
    dir.join(format!("{namespace}_embeddings.bin"))
}

#[must_use]
pub fn vectorizer_path(dir: &Path, namespace: &str) -> PathBuf {
    dir.join(format!("{namespace}_vectorizer.bin"))
}

async fn write_artifact(path: &Path, bytes: &[u8]) -> Result<()> {
    let tmp = path.with_extension("tmp");
    tokio::fs::write(&tmp, bytes).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}

async fn read_artifact(path: &Path, artifact: &'static str) -> Result<Vec<u8>> {
    tokio::fs::read(path)
        .await
        .map_err(|e| load_error(artifact, &e))
}

fn load_error(artifact: &'static str, reason: &impl std::fmt::Display) -> StoreError {
    StoreError::Load {
        artifact,
        reason: reason.to_string(),
    }
}
