use crate::{K_MAX, K_MIN};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SearchError>;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Store error: {0}")]
    Store(#[from] recall_store::StoreError),

    #[error("Unknown namespace: {0}")]
    UnknownNamespace(String),

    #[error("Invalid result count k={k} (expected {K_MIN} to {K_MAX})")]
    InvalidK { k: usize },
}
