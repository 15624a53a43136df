use thiserror::Error;

pub type Result<T> = std::result::Result<T, CorpusError>;

#[derive(Error, Debug)]
pub enum CorpusError {
    #[error("Duplicate document id: {0}")]
    DuplicateId(String),

    #[error("Corpus is empty")]
    Empty,
}
