// asma-indexer - SAP module metadata indexing library
//!
//! Reads the text header of SAP music modules, turns it into [`SapDocument`]s
//! and ingests them into a Tantivy index in bounded batches.

pub mod cli;
pub mod ingest;
pub mod sap;
pub mod search;

#[cfg(test)]
pub mod tests;

// Re-export common types
pub use ingest::{BatchPolicy, IngestError, IngestStats, PipelineConfig, WalkPipeline};
pub use sap::{DocumentSchema, FieldParser, HeaderError, ParseMode, SapDocument};
pub use search::{IndexBatch, SapIndex, SearchError};
