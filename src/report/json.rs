//! JSON report output.
//!
//! The report document serializes directly: counters become plain
//! key→value maps, sizes and dates stay primitive numbers/strings.

use std::path::Path;

use tracing::info;

use crate::error::{ReportError, Result};
use crate::model::report::Report;

/// Render the report document as pretty-printed JSON.
pub fn render_json(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(|e| ReportError::RenderError(e.to_string()))
}

/// Write the JSON report to `path`, creating parent directories as needed.
pub fn write_json(report: &Report, path: &Path) -> Result<()> {
    let rendered = render_json(report)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| ReportError::io(parent, e))?;
        }
    }
    std::fs::write(path, rendered).map_err(|e| ReportError::io(path, e))?;
    info!(path = %path.display(), "Report saved");
    Ok(())
}
