//! Directory walk feeding SAP documents into the index.
//!
//! The pipeline borrows the index for the whole run and owns the pending batch.
//! Per-file problems (unreadable file, malformed header in strict mode) skip
//! that file; a failed commit stops the run.

pub mod config;

pub use config::{BatchPolicy, PipelineConfig, DEFAULT_BATCH_SIZE};

use std::io::Write;
use std::path::Path;
use std::time::Instant;

use thiserror::Error;
use tracing::{debug, error, info, warn};
use walkdir::WalkDir;

use crate::sap::{read_header, FieldParser, SapDocument};
use crate::search::{IndexBatch, SapIndex, SearchError};

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Commit of {} documents failed: {source}", ids.len())]
    Commit {
        ids: Vec<String>,
        #[source]
        source: SearchError,
    },

    #[error("Cannot write document listing: {0}")]
    Output(#[from] std::io::Error),
}

/// Counters reported at the end of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestStats {
    pub indexed: usize,
    pub skipped_unreadable: usize,
    pub skipped_malformed: usize,
    pub walk_errors: usize,
    pub commits: usize,
    /// Largest number of documents ever pending at once.
    pub largest_batch: usize,
}

pub struct WalkPipeline<'a> {
    index: &'a mut SapIndex,
    config: PipelineConfig,
    parser: FieldParser,
    batch: IndexBatch,
    stats: IngestStats,
}

impl<'a> WalkPipeline<'a> {
    pub fn new(index: &'a mut SapIndex, config: PipelineConfig) -> Self {
        let parser = FieldParser::new(config.schema, config.parse_mode);
        let batch = index.new_batch();
        Self {
            index,
            config,
            parser,
            batch,
            stats: IngestStats::default(),
        }
    }

    /// Walk the root, writing one line per parsed document to `out`.
    pub fn run<W: Write>(mut self, out: &mut W) -> Result<IngestStats, IngestError> {
        let start = Instant::now();
        info!("📁 Scanning {}", self.config.root.display());

        for entry in WalkDir::new(&self.config.root).follow_links(false) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!("⚠️  Skipping unreadable entry: {}", err);
                    self.stats.walk_errors += 1;
                    continue;
                }
            };

            // Symlinks count as files so a dangling one is reported as unreadable.
            if !entry.file_type().is_dir() {
                self.visit_file(entry.path(), out)?;
            }
        }

        self.flush()?;
        out.flush()?;

        info!(
            "✅ Indexed {} documents in {} commits ({} unreadable, {} malformed) in {:.2}s",
            self.stats.indexed,
            self.stats.commits,
            self.stats.skipped_unreadable,
            self.stats.skipped_malformed,
            start.elapsed().as_secs_f64()
        );
        Ok(self.stats)
    }

    fn visit_file<W: Write>(&mut self, path: &Path, out: &mut W) -> Result<(), IngestError> {
        if !has_extension(path, &self.config.extension) {
            return Ok(());
        }

        let header = match read_header(path) {
            Ok(header) => header,
            Err(err) => {
                debug!("Skipping file: {}", err);
                self.stats.skipped_unreadable += 1;
                return Ok(());
            }
        };

        let doc = match self.parser.parse(&header) {
            Ok(doc) => doc,
            Err(err) => {
                warn!("⚠️  Skipping {}: {}", path.display(), err);
                self.stats.skipped_malformed += 1;
                return Ok(());
            }
        };

        let id = document_id(&self.config.root, path);
        debug!("{} -> {}", id, doc);
        writeln!(out, "{doc}")?;
        self.stage(id, doc)
    }

    fn stage(&mut self, id: String, doc: SapDocument) -> Result<(), IngestError> {
        match self.config.batch {
            BatchPolicy::Direct => {
                self.stats.largest_batch = self.stats.largest_batch.max(1);
                if let Err(source) = self.index.index(&id, doc) {
                    return Err(commit_failed(vec![id], source));
                }
                self.stats.indexed += 1;
                self.stats.commits += 1;
            }
            BatchPolicy::Batched { size } => {
                self.batch.index(id, doc);
                self.stats.largest_batch = self.stats.largest_batch.max(self.batch.len());
                if self.batch.len() >= size.max(1) {
                    self.flush()?;
                }
            }
        }
        Ok(())
    }

    /// Commit the pending batch, if any, and start a fresh one.
    fn flush(&mut self) -> Result<(), IngestError> {
        if self.batch.is_empty() {
            return Ok(());
        }

        let batch = std::mem::replace(&mut self.batch, self.index.new_batch());
        let ids: Vec<String> = batch.ids().map(str::to_string).collect();
        match self.index.commit(batch) {
            Ok(count) => {
                self.stats.indexed += count;
                self.stats.commits += 1;
                info!("💾 Committed batch of {} documents", count);
                Ok(())
            }
            Err(source) => Err(commit_failed(ids, source)),
        }
    }
}

fn commit_failed(ids: Vec<String>, source: SearchError) -> IngestError {
    error!(
        "❌ Commit failed for [{}]: {}",
        ids.join(", "),
        source
    );
    IngestError::Commit { ids, source }
}

/// True when the file name ends in `.<extension>`, including a bare `.sap`.
fn has_extension(path: &Path, extension: &str) -> bool {
    path.file_name().is_some_and(|name| {
        name.to_string_lossy()
            .strip_suffix(extension)
            .is_some_and(|stem| stem.ends_with('.'))
    })
}

/// Key of a file in the index: its path below `root`, `/`-separated, with a
/// leading `/`.
pub fn document_id(root: &Path, path: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(relative) => {
            let mut id = String::new();
            for component in relative.components() {
                id.push('/');
                id.push_str(&component.as_os_str().to_string_lossy());
            }
            id
        }
        Err(_) => path.to_string_lossy().into_owned(),
    }
}
