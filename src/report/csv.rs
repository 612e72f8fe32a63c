//! CSV report output.
//!
//! Output is UTF-8 with BOM for Excel compatibility. The file is laid out
//! in sections (file info, top senders, top recipients, attachment types),
//! each with its own header row; absent statistics skip their section.

use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::error::{ReportError, Result};
use crate::model::report::Report;

/// Write the CSV report to `path`.
pub fn write_csv(report: &Report, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| ReportError::io(parent, e))?;
        }
    }
    let mut file = std::fs::File::create(path).map_err(|e| ReportError::io(path, e))?;
    let rendered = render_csv(report);
    // UTF-8 BOM for Excel
    file.write_all(&[0xEF, 0xBB, 0xBF])
        .map_err(|e| ReportError::io(path, e))?;
    file.write_all(rendered.as_bytes())
        .map_err(|e| ReportError::io(path, e))?;
    info!(path = %path.display(), "CSV report saved");
    Ok(())
}

/// Render the CSV body (without the BOM).
pub fn render_csv(report: &Report) -> String {
    let mut out = String::new();
    let stats = &report.statistics;

    push_row(&mut out, &["Email Analysis Report"]);
    push_row(&mut out, &["Generated", &report.generated_at]);
    out.push('\n');

    // File information
    push_row(&mut out, &["File Information"]);
    if let Some(path) = &report.file_metadata.file_path {
        push_row(&mut out, &["Path", &path.display().to_string()]);
    }
    if let Some(human) = &report.file_metadata.file_size_human {
        push_row(&mut out, &["Size", human]);
    }
    if let Some(count) = report.file_metadata.email_count {
        push_row(&mut out, &["Email Count", &count.to_string()]);
    }
    out.push('\n');

    // Top senders
    if let Some(senders) = &stats.senders {
        push_row(&mut out, &["Top Senders"]);
        push_row(&mut out, &["Email Address", "Count"]);
        for entry in &senders.top_senders {
            push_row(&mut out, &[&entry.address, &entry.count.to_string()]);
        }
        out.push('\n');
    }

    // Top recipients
    if let Some(recipients) = &stats.recipients {
        push_row(&mut out, &["Top Recipients"]);
        push_row(&mut out, &["Email Address", "Count"]);
        for entry in &recipients.top_recipients {
            push_row(&mut out, &[&entry.address, &entry.count.to_string()]);
        }
        out.push('\n');
    }

    // Attachment types
    if let Some(attachments) = &stats.attachments {
        push_row(&mut out, &["Attachment Types"]);
        push_row(&mut out, &["Type", "Count", "Total Size", "Average Size"]);
        for entry in &attachments.by_type {
            push_row(
                &mut out,
                &[
                    &entry.kind,
                    &entry.count.to_string(),
                    &entry.total_size_human,
                    &entry.avg_size_human,
                ],
            );
        }
        out.push('\n');
    }

    out
}

/// Append one escaped CSV row.
fn push_row(out: &mut String, fields: &[&str]) {
    let escaped: Vec<String> = fields.iter().map(|f| csv_escape(f)).collect();
    out.push_str(&escaped.join(","));
    out.push('\n');
}

/// Escape a value for CSV (RFC 4180).
///
/// Wraps in double quotes if the value contains commas, quotes, or newlines.
fn csv_escape(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
