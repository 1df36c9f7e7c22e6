use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Index not found at path: {0}")]
    IndexNotFound(String),

    #[error("Index at {path} has an incompatible schema: {reason}")]
    IncompatibleSchema { path: String, reason: String },

    #[error("Cannot open index directory {path}: {reason}")]
    OpenDirectory { path: String, reason: String },

    #[error("Tantivy error: {0}")]
    TantivyError(#[from] tantivy::TantivyError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SearchError>;
