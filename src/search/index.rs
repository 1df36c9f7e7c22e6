//! Tantivy-backed index of SAP module documents.
//!
//! Documents are keyed by their `id` field. Every write deletes the key before
//! adding the document, so re-ingesting a tree replaces documents instead of
//! duplicating them.

use std::path::{Path, PathBuf};

use tantivy::collector::DocSetCollector;
use tantivy::query::TermQuery;
use tantivy::schema::{Field, IndexRecordOption, TantivyDocument, Value};
use tantivy::{Index, IndexReader, IndexWriter, Term};
use tracing::{debug, info, warn};

use crate::sap::{DocumentSchema, SapDocument};
use crate::search::batch::IndexBatch;
use crate::search::error::{Result, SearchError};
use crate::search::schema::{create_schema, register_tokenizers, SchemaFields};

const WRITER_HEAP_SIZE: usize = 50_000_000; // 50MB

/// Tuning knobs for the index writer.
#[derive(Debug, Clone)]
pub(crate) struct IndexOptions {
    pub(crate) writer_heap_size: usize,
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self {
            writer_heap_size: WRITER_HEAP_SIZE,
        }
    }
}

pub struct SapIndex {
    index: Index,
    reader: IndexReader,
    writer: Option<IndexWriter>,
    fields: SchemaFields,
    variant: DocumentSchema,
    location: Option<PathBuf>,
    options: IndexOptions,
    /// Zero-based commit number that fails after staging its documents.
    #[cfg(test)]
    fail_commit_at: Option<usize>,
    #[cfg(test)]
    commits_attempted: usize,
}

impl SapIndex {
    /// Open an existing index, checking it carries the fields `variant` needs.
    pub fn open(path: &Path, variant: DocumentSchema) -> Result<Self> {
        if !path.join("meta.json").exists() {
            return Err(SearchError::IndexNotFound(path.display().to_string()));
        }
        let index = Index::open_in_dir(path).map_err(|e| SearchError::OpenDirectory {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let fields = SchemaFields::for_index(&index.schema(), variant, &path.display().to_string())?;

        debug!("Opened index at {}", path.display());
        Self::from_index(index, fields, variant, Some(path.to_path_buf()))
    }

    /// Create a new index at `path`. Fails if an index already lives there.
    pub fn create(path: &Path, variant: DocumentSchema) -> Result<Self> {
        std::fs::create_dir_all(path)?;
        let schema = create_schema(variant);
        let fields = SchemaFields::for_index(&schema, variant, &path.display().to_string())?;
        let index = Index::create_in_dir(path, schema)?;

        info!("📂 Created new index at {}", path.display());
        Self::from_index(index, fields, variant, Some(path.to_path_buf()))
    }

    /// Open the index at `path`, falling back to creating it.
    pub fn open_or_create(path: &Path, variant: DocumentSchema) -> Result<Self> {
        match Self::open(path, variant) {
            Ok(index) => Ok(index),
            Err(err) => {
                info!("Cannot open index ({}), creating a new one", err);
                Self::create(path, variant)
            }
        }
    }

    /// Create a RAM-only index (tests and dry runs).
    pub fn in_memory(variant: DocumentSchema) -> Result<Self> {
        let schema = create_schema(variant);
        let fields = SchemaFields::for_index(&schema, variant, "<memory>")?;
        let index = Index::create_in_ram(schema);
        Self::from_index(index, fields, variant, None)
    }

    /// Writer heap override, used to keep test indexes small.
    #[cfg(test)]
    pub(crate) fn with_options(mut self, options: IndexOptions) -> Self {
        self.options = options;
        self
    }

    /// Schema variant the index was opened or created with.
    pub fn variant(&self) -> DocumentSchema {
        self.variant
    }

    /// Directory of the index, `None` for RAM indexes.
    pub fn location(&self) -> Option<&Path> {
        self.location.as_deref()
    }

    /// Start an empty batch.
    pub fn new_batch(&self) -> IndexBatch {
        IndexBatch::new()
    }

    /// Apply every staged document in one commit and return how many were written.
    ///
    /// On failure nothing from the batch becomes visible.
    pub fn commit(&mut self, batch: IndexBatch) -> Result<usize> {
        let staged = batch.into_staged();
        let fields = self.fields;
        let injected = self.injected_failure();
        let writer = self.writer()?;

        let written = stage_documents(writer, &fields, &staged).and_then(|()| match injected {
            Some(err) => Err(err),
            None => writer.commit().map(|_| ()).map_err(SearchError::from),
        });
        if let Err(err) = written {
            if let Err(rollback_err) = writer.rollback() {
                warn!("Rollback after failed commit also failed: {}", rollback_err);
            }
            return Err(err);
        }

        self.reader.reload()?;
        debug!("📝 Committed {} documents", staged.len());
        Ok(staged.len())
    }

    /// Index one document and commit immediately.
    pub fn index(&mut self, id: &str, doc: SapDocument) -> Result<()> {
        let mut batch = self.new_batch();
        batch.index(id, doc);
        self.commit(batch).map(|_| ())
    }

    /// Number of committed documents.
    pub fn num_docs(&self) -> u64 {
        self.reader.searcher().num_docs()
    }

    /// Load the stored document for `id`, if committed.
    pub fn get(&self, id: &str) -> Result<Option<SapDocument>> {
        let f = &self.fields;
        let query = TermQuery::new(
            Term::from_field_text(f.id, id),
            IndexRecordOption::Basic,
        );

        let searcher = self.reader.searcher();
        let matches = searcher.search(&query, &DocSetCollector)?;
        let Some(address) = matches.into_iter().next() else {
            return Ok(None);
        };

        let doc: TantivyDocument = searcher.doc(address)?;
        Ok(Some(SapDocument {
            author: get_text_field(&doc, f.author),
            name: get_text_field(&doc, f.name),
            date: get_text_field(&doc, f.date),
            stereo: f
                .stereo
                .map(|field| get_u64_field(&doc, field) == Some(1)),
        }))
    }

    // --- Private helpers ---

    fn from_index(
        index: Index,
        fields: SchemaFields,
        variant: DocumentSchema,
        location: Option<PathBuf>,
    ) -> Result<Self> {
        register_tokenizers(&index);
        let reader = index.reader()?;
        reader.reload()?;

        Ok(Self {
            index,
            reader,
            writer: None,
            fields,
            variant,
            location,
            options: IndexOptions::default(),
            #[cfg(test)]
            fail_commit_at: None,
            #[cfg(test)]
            commits_attempted: 0,
        })
    }

    /// Make the `nth` commit from now on (zero-based) fail before it is applied.
    #[cfg(test)]
    pub(crate) fn fail_commit_at(&mut self, nth: usize) {
        self.fail_commit_at = Some(self.commits_attempted + nth);
    }

    #[cfg(test)]
    fn injected_failure(&mut self) -> Option<SearchError> {
        let attempt = self.commits_attempted;
        self.commits_attempted += 1;
        (self.fail_commit_at == Some(attempt)).then(|| {
            SearchError::IoError(std::io::Error::other("injected commit failure"))
        })
    }

    #[cfg(not(test))]
    fn injected_failure(&mut self) -> Option<SearchError> {
        None
    }

    fn writer(&mut self) -> Result<&mut IndexWriter> {
        match &mut self.writer {
            Some(writer) => Ok(writer),
            slot @ None => {
                let writer = self.index.writer(self.options.writer_heap_size)?;
                Ok(slot.insert(writer))
            }
        }
    }
}

fn stage_documents(
    writer: &IndexWriter,
    fields: &SchemaFields,
    staged: &[(String, SapDocument)],
) -> Result<()> {
    for (id, doc) in staged {
        writer.delete_term(Term::from_field_text(fields.id, id));
        writer.add_document(to_tantivy(fields, id, doc))?;
    }
    Ok(())
}

fn to_tantivy(fields: &SchemaFields, id: &str, doc: &SapDocument) -> TantivyDocument {
    let mut tantivy_doc = TantivyDocument::new();

    tantivy_doc.add_text(fields.id, id);
    tantivy_doc.add_text(fields.author, &doc.author);
    tantivy_doc.add_text(fields.name, &doc.name);
    tantivy_doc.add_text(fields.date, &doc.date);
    if let Some(year) = doc.year() {
        tantivy_doc.add_u64(fields.year, year);
    }
    if let (Some(field), Some(stereo)) = (fields.stereo, doc.stereo) {
        tantivy_doc.add_u64(field, u64::from(stereo));
    }

    tantivy_doc
}

fn get_text_field(doc: &TantivyDocument, field: Field) -> String {
    doc.get_first(field)
        .and_then(|value| value.as_str())
        .unwrap_or_default()
        .to_string()
}

fn get_u64_field(doc: &TantivyDocument, field: Field) -> Option<u64> {
    doc.get_first(field).and_then(|value| value.as_u64())
}
