//! Search index gateway.
//!
//! Wraps a Tantivy index with the fixed SAP schema: open or create, stage
//! documents into batches, commit.

pub mod batch;
pub mod error;
pub mod index;
pub mod schema;

pub use batch::IndexBatch;
pub use error::SearchError;
pub use index::SapIndex;
