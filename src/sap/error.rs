use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HeaderError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Header has {found} lines, {field} expected on line {line}")]
    MissingLine {
        field: &'static str,
        line: usize,
        found: usize,
    },

    #[error("{field} line has no quoted value")]
    MissingDelimiter { field: &'static str },
}

pub type Result<T> = std::result::Result<T, HeaderError>;
