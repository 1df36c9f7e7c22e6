//! SAP header parsing.
//!
//! [`header`] isolates the text block of a file, [`fields`] turns it into a
//! [`SapDocument`].

pub mod document;
pub mod error;
pub mod fields;
pub mod header;

pub use document::{DocumentSchema, SapDocument};
pub use error::HeaderError;
pub use fields::{FieldParser, ParseMode};
pub use header::{read_header, split_header};
