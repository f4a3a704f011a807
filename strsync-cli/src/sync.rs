use std::path::PathBuf;

use anyhow::{Context, Result};
use strsync::{Document, Parser, SyncOptions, SyncReport, synchronize_with};
use tracing::info;

use crate::validation::{validate_file_path, validate_output_path};

#[derive(Debug, Clone)]
pub struct SyncCommand {
    pub master: PathBuf,
    pub translation: PathBuf,
    /// Where to write the result; the translation file when unset.
    pub output: Option<PathBuf>,
    pub options: SyncOptions,
}

impl SyncCommand {
    pub fn output_path(&self) -> &PathBuf {
        self.output.as_ref().unwrap_or(&self.translation)
    }
}

/// Synchronizes the translation file against the master and writes the result.
pub fn run_sync_command(cmd: &SyncCommand) -> Result<SyncReport> {
    validate_file_path(&cmd.master).map_err(anyhow::Error::msg)?;
    validate_file_path(&cmd.translation).map_err(anyhow::Error::msg)?;
    let output = cmd.output_path();
    validate_output_path(output).map_err(anyhow::Error::msg)?;

    let master = Document::read_from(&cmd.master)
        .with_context(|| format!("Failed to read master '{}'", cmd.master.display()))?;
    let translation = Document::read_from(&cmd.translation)
        .with_context(|| format!("Failed to read translation '{}'", cmd.translation.display()))?;

    let (synced, report) = synchronize_with(&master, &translation, &cmd.options)
        .with_context(|| format!("Failed to synchronize '{}'", cmd.translation.display()))?;

    synced
        .write_to(output)
        .with_context(|| format!("Failed to write '{}'", output.display()))?;
    info!(
        file = %output.display(),
        translated = report.translated,
        missing = report.missing,
        skipped = report.skipped,
        dropped = report.dropped.len(),
        "translation synchronized"
    );
    Ok(report)
}
