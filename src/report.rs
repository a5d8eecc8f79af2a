//! JSON run report

use crate::error::SuiteError;
use crate::matrix::MatrixSelection;
use crate::suite::RunSummary;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Build identifier baked in by build.rs
pub const GIT_HASH: &str = env!("GIT_HASH");

#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    pub generated_at: String,
    pub git_hash: &'static str,
    pub selection: &'a MatrixSelection,
    pub passed: bool,
    #[serde(flatten)]
    pub summary: &'a RunSummary,
}

impl<'a> RunReport<'a> {
    pub fn new(selection: &'a MatrixSelection, summary: &'a RunSummary) -> Self {
        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            git_hash: GIT_HASH,
            selection,
            passed: !summary.has_failures(),
            summary,
        }
    }

    pub fn write(&self, path: &Path) -> Result<(), SuiteError> {
        let to_report_err = |reason: String| SuiteError::Report {
            path: path.to_path_buf(),
            reason,
        };
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| to_report_err(e.to_string()))?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| to_report_err(e.to_string()))?;
        fs::write(path, json).map_err(|e| to_report_err(e.to_string()))?;
        tracing::info!(target: "SUITE", "report written to {}", path.display());
        Ok(())
    }
}
