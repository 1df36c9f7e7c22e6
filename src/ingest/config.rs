use std::path::PathBuf;

use crate::sap::{DocumentSchema, ParseMode};

/// Pending documents that trigger a commit in batched mode.
pub const DEFAULT_BATCH_SIZE: usize = 50;

/// Extension (without the dot) of the files the walk picks up.
pub const SAP_EXTENSION: &str = "sap";

/// When staged documents reach the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchPolicy {
    /// Commit every document on its own.
    Direct,
    /// Commit once `size` documents are pending, and once more after the walk.
    Batched { size: usize },
}

impl Default for BatchPolicy {
    fn default() -> Self {
        BatchPolicy::Batched {
            size: DEFAULT_BATCH_SIZE,
        }
    }
}

/// Configuration for one ingestion run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Directory scanned recursively. Document ids are relative to it.
    pub root: PathBuf,
    pub batch: BatchPolicy,
    pub schema: DocumentSchema,
    pub parse_mode: ParseMode,
    /// Matched case-sensitively.
    pub extension: String,
}

impl PipelineConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            batch: BatchPolicy::default(),
            schema: DocumentSchema::default(),
            parse_mode: ParseMode::default(),
            extension: SAP_EXTENSION.to_string(),
        }
    }

    pub fn with_batch(mut self, batch: BatchPolicy) -> Self {
        self.batch = batch;
        self
    }

    pub fn with_schema(mut self, schema: DocumentSchema) -> Self {
        self.schema = schema;
        self
    }

    pub fn with_parse_mode(mut self, parse_mode: ParseMode) -> Self {
        self.parse_mode = parse_mode;
        self
    }
}
