use std::io::{self, BufWriter};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use asma_indexer::cli::{init_logging, Cli};
use asma_indexer::{SapIndex, WalkPipeline};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging()?;

    // Validate before touching the index so a bad invocation leaves no trace on disk.
    let config = cli.pipeline_config()?;

    let mut index = SapIndex::open_or_create(&cli.index, config.schema)
        .with_context(|| format!("Unable to open or create index at {}", cli.index.display()))?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let stats = WalkPipeline::new(&mut index, config)
        .run(&mut out)
        .context("Ingestion aborted")?;

    let location = index.location().unwrap_or(cli.index.as_path());
    info!(
        "🎵 {} documents in {} ({:?} schema, {} indexed this run)",
        index.num_docs(),
        location.display(),
        index.variant(),
        stats.indexed
    );
    Ok(())
}
