//! Tantivy schema for SAP module documents.
//!
//! - `id`: path of the module relative to the scanned root (exact match key)
//! - `author`, `name`: tokenized with the `sap_text` analyzer
//! - `date`: year token exactly as found in the header
//! - `year`: numeric year for range queries
//! - `stereo`: 0/1 flag, only in the extended schema

use tantivy::schema::{
    Field, FieldType, IndexRecordOption, NumericOptions, Schema, TextFieldIndexing, TextOptions,
    STORED, STRING,
};
use tantivy::tokenizer::{AsciiFoldingFilter, LowerCaser, SimpleTokenizer, TextAnalyzer};
use tantivy::Index;

use crate::sap::DocumentSchema;
use crate::search::error::{Result, SearchError};

/// Field name constants for the search schema.
pub mod fields {
    pub const ID: &str = "id";
    pub const AUTHOR: &str = "author";
    pub const NAME: &str = "name";
    pub const DATE: &str = "date";
    pub const YEAR: &str = "year";
    pub const STEREO: &str = "stereo";
}

/// Analyzer used for author and title text.
pub const TEXT_TOKENIZER: &str = "sap_text";

/// Build the Tantivy schema for the given document variant.
pub fn create_schema(variant: DocumentSchema) -> Schema {
    let mut builder = Schema::builder();

    let text_options = TextOptions::default()
        .set_indexing_options(
            TextFieldIndexing::default()
                .set_tokenizer(TEXT_TOKENIZER)
                .set_index_option(IndexRecordOption::WithFreqsAndPositions),
        )
        .set_stored();
    let numeric_options = NumericOptions::default()
        .set_indexed()
        .set_stored()
        .set_fast();

    builder.add_text_field(fields::ID, STRING | STORED);
    builder.add_text_field(fields::AUTHOR, text_options.clone());
    builder.add_text_field(fields::NAME, text_options);
    builder.add_text_field(fields::DATE, STRING | STORED);
    builder.add_u64_field(fields::YEAR, numeric_options.clone());
    if variant.has_stereo() {
        builder.add_u64_field(fields::STEREO, numeric_options);
    }

    builder.build()
}

/// Register the `sap_text` analyzer. Must run on every opened or created index.
pub fn register_tokenizers(index: &Index) {
    index.tokenizers().register(
        TEXT_TOKENIZER,
        TextAnalyzer::builder(SimpleTokenizer::default())
            .filter(LowerCaser)
            .filter(AsciiFoldingFilter)
            .build(),
    );
}

/// Pre-resolved field handles for document construction and retrieval.
#[derive(Clone, Copy, Debug)]
pub struct SchemaFields {
    pub id: Field,
    pub author: Field,
    pub name: Field,
    pub date: Field,
    pub year: Field,
    pub stereo: Option<Field>,
}

impl SchemaFields {
    /// Resolve field handles, checking that every field the variant needs is
    /// present with the expected type.
    pub fn resolve(schema: &Schema, variant: DocumentSchema) -> std::result::Result<Self, String> {
        let text = |name: &str| expect_field(schema, name, FieldKind::Text);
        let numeric = |name: &str| expect_field(schema, name, FieldKind::U64);

        Ok(Self {
            id: text(fields::ID)?,
            author: text(fields::AUTHOR)?,
            name: text(fields::NAME)?,
            date: text(fields::DATE)?,
            year: numeric(fields::YEAR)?,
            stereo: if variant.has_stereo() {
                Some(numeric(fields::STEREO)?)
            } else {
                None
            },
        })
    }

    /// Like [`SchemaFields::resolve`], reporting mismatches against `path`.
    pub fn for_index(schema: &Schema, variant: DocumentSchema, path: &str) -> Result<Self> {
        Self::resolve(schema, variant).map_err(|reason| SearchError::IncompatibleSchema {
            path: path.to_string(),
            reason,
        })
    }
}

#[derive(Clone, Copy)]
enum FieldKind {
    Text,
    U64,
}

fn expect_field(schema: &Schema, name: &str, kind: FieldKind) -> std::result::Result<Field, String> {
    let field = schema
        .get_field(name)
        .map_err(|_| format!("missing field '{name}'"))?;
    let matches = matches!(
        (kind, schema.get_field_entry(field).field_type()),
        (FieldKind::Text, FieldType::Str(_)) | (FieldKind::U64, FieldType::U64(_))
    );
    if matches {
        Ok(field)
    } else {
        Err(format!("field '{name}' has the wrong type"))
    }
}
