//! Machine-readable run summary written by `--json-file`.

use anyhow::{Context, Result};
use chrono::Utc;
use log::info;
use serde::Serialize;
use std::path::Path;

use logscrub_core::StatementSummary;

use crate::utils::files::write_output;

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub source: String,
    pub output: String,
    pub definitions: String,
    pub generated_at: String,
    pub input_sha256: String,
    pub output_sha256: String,
    pub lines_before: usize,
    pub lines_after: usize,
    pub lines_removed: usize,
    pub statements: Vec<StatementSummary>,
}

impl RunSummary {
    /// Stamps the summary with the current UTC time.
    pub fn new(
        source: &Path,
        output: &Path,
        definitions: &Path,
        input_sha256: String,
        output_sha256: String,
        lines_before: usize,
        lines_after: usize,
        statements: Vec<StatementSummary>,
    ) -> Self {
        Self {
            source: source.display().to_string(),
            output: output.display().to_string(),
            definitions: definitions.display().to_string(),
            generated_at: Utc::now().to_rfc3339(),
            input_sha256,
            output_sha256,
            lines_before,
            lines_after,
            lines_removed: lines_before.saturating_sub(lines_after),
            statements,
        }
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize run summary")?;
        write_output(path, &json)?;
        info!("Run summary written to {}", path.display());
        Ok(())
    }
}
