use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store not found: namespace '{namespace}' is missing its {artifact} artifact")]
    NotFound {
        namespace: String,
        artifact: &'static str,
    },

    #[error("Failed to load {artifact} artifact: {reason}")]
    Load {
        artifact: &'static str,
        reason: String,
    },

    #[error("Corrupt store: {0}")]
    Corrupt(String),

    #[error("Corpus error: {0}")]
    Corpus(#[from] recall_corpus::CorpusError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Binary encoding error: {0}")]
    Encoding(#[from] serde_cbor::Error),
}
