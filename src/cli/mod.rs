/// Command-line surface of the asma-indexer binary
///
/// Flag parsing, validation of the scan root and logging setup. Kept in the
/// library so the checks run under test without spawning the binary.
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use thiserror::Error;

use crate::ingest::PipelineConfig;

/// Index directory used when `-i` is not given.
pub const DEFAULT_INDEX_PATH: &str = "asma.bleve";

#[derive(Parser, Debug)]
#[command(name = "asma-indexer")]
#[command(about = "Index SAP module metadata from an ASMA tree", long_about = None)]
#[command(version)]
pub struct Cli {
    /// The name of the index directory
    #[arg(short = 'i', value_name = "PATH", default_value = DEFAULT_INDEX_PATH)]
    pub index: PathBuf,

    /// Existing ASMA directory taken from the official repository
    #[arg(short = 'a', value_name = "DIR")]
    pub asma_dir: Option<PathBuf>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("ASMA directory not specified (use -a <DIR>)")]
    MissingRoot,

    #[error("ASMA directory {0} is not a directory")]
    RootNotDirectory(PathBuf),
}

impl Cli {
    /// Validate the flags and turn them into a pipeline configuration.
    pub fn pipeline_config(&self) -> std::result::Result<PipelineConfig, ConfigError> {
        let root = match &self.asma_dir {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => return Err(ConfigError::MissingRoot),
        };
        if !root.is_dir() {
            return Err(ConfigError::RootNotDirectory(root.clone()));
        }
        Ok(PipelineConfig::new(root.clone()))
    }
}

/// Log to stderr, warn+ unless RUST_LOG overrides. Stdout carries the document listing.
pub fn init_logging() -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}
