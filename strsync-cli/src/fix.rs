use std::path::PathBuf;

use anyhow::{Context, Result};
use strsync::{Document, FixReport, Parser, normalize_with_report};
use tracing::info;

use crate::validation::validate_file_path;

#[derive(Debug, Clone)]
pub struct FixCommand {
    pub strings_file: PathBuf,
    /// Report whether the file needs fixing without writing it.
    pub check: bool,
}

#[derive(Debug, Clone)]
pub struct FixOutcome {
    /// Whether normalization changed the document.
    pub changed: bool,
    pub report: FixReport,
}

/// Normalizes whitespace of one strings file, rewriting it in place.
pub fn run_fix_command(cmd: &FixCommand) -> Result<FixOutcome> {
    validate_file_path(&cmd.strings_file).map_err(anyhow::Error::msg)?;

    let document = Document::read_from(&cmd.strings_file)
        .with_context(|| format!("Failed to read '{}'", cmd.strings_file.display()))?;
    let (fixed, report) = normalize_with_report(&document);
    let changed = fixed != document;

    if cmd.check {
        info!(
            file = %cmd.strings_file.display(),
            changed,
            fixed_elements = report.fixed_elements,
            "check complete"
        );
        return Ok(FixOutcome { changed, report });
    }

    fixed
        .write_to(&cmd.strings_file)
        .with_context(|| format!("Failed to write '{}'", cmd.strings_file.display()))?;
    info!(
        file = %cmd.strings_file.display(),
        fixed_elements = report.fixed_elements,
        unknown_tags = report.unknown_tags.len(),
        "strings fixed"
    );
    Ok(FixOutcome { changed, report })
}
