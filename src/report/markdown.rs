//! Markdown report rendering.
//!
//! Builds a human-readable summary from the report document. Every section
//! is optional: absent statistics render nothing, never an error.

use std::fmt::Write as _;
use std::path::Path;

use tracing::info;

use crate::error::{ReportError, Result};
use crate::model::report::Report;
use crate::stats::format_size;

/// Render the report as a Markdown document.
pub fn render_markdown(report: &Report) -> String {
    let mut md = String::new();
    let stats = &report.statistics;

    md.push_str("# MBOX Analysis Report\n\n");
    let _ = writeln!(md, "*Generated on: {}*\n", report.generated_at);

    // Overview
    md.push_str("## Overview\n\n");
    if let Some(path) = &report.file_metadata.file_path {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let _ = writeln!(md, "- **File Name**: {name}");
    }
    if let Some(size) = report.file_metadata.file_size {
        let _ = writeln!(md, "- **File Size**: {}", format_size(size as f64));
    }
    if let Some(dates) = &stats.date_distribution {
        let _ = writeln!(
            md,
            "- **Date Range**: {} to {}",
            dates.first_month, dates.last_month
        );
    }
    if let Some(count) = report.file_metadata.email_count {
        let _ = writeln!(md, "- **Total Emails**: {}", format_count(count));
    }
    md.push('\n');

    // Basic statistics
    md.push_str("## Email Statistics\n\n");
    if let Some(senders) = &stats.senders {
        let _ = writeln!(
            md,
            "- **Unique Senders**: {}",
            format_count(senders.unique_senders as u64)
        );
    }
    if let Some(recipients) = &stats.recipients {
        let _ = writeln!(
            md,
            "- **Unique Recipients**: {}",
            format_count(recipients.unique_recipients as u64)
        );
    }
    if let Some(dates) = &stats.date_distribution {
        let _ = writeln!(md, "- **Time Span**: {} months", dates.total_months);
        md.push('\n');
        let _ = writeln!(
            md,
            "**Busiest Month**: {} with {} emails\n",
            dates.busiest_month,
            format_count(dates.busiest_month_count)
        );
    }

    // Monthly distribution
    if !report.headers.date_distribution.is_empty() {
        md.push_str("### Emails per Month\n\n");
        let mut months: Vec<(String, u64)> = report
            .headers
            .date_distribution
            .iter()
            .map(|(k, c)| (k.clone(), c))
            .collect();
        months.sort();
        let rows: Vec<Vec<String>> = months
            .into_iter()
            .map(|(month, count)| vec![month, format_count(count)])
            .collect();
        md.push_str(&table(&["Month", "Emails"], &rows));
        md.push('\n');
    }

    // Top senders / recipients
    if let Some(senders) = &stats.senders {
        md.push_str("## Top Senders\n\n");
        let rows: Vec<Vec<String>> = senders
            .top_senders
            .iter()
            .map(|entry| vec![entry.address.clone(), format_count(entry.count)])
            .collect();
        md.push_str(&table(&["Address", "Emails"], &rows));
        md.push('\n');
    }
    if let Some(recipients) = &stats.recipients {
        md.push_str("## Top Recipients\n\n");
        let rows: Vec<Vec<String>> = recipients
            .top_recipients
            .iter()
            .map(|entry| vec![entry.address.clone(), format_count(entry.count)])
            .collect();
        md.push_str(&table(&["Address", "Emails"], &rows));
        md.push('\n');
    }

    // Body content
    if stats.plain_text_body.is_some() || stats.html_body.is_some() {
        md.push_str("## Body Content\n\n");
        let mut rows = Vec::new();
        if let Some(body) = &stats.plain_text_body {
            rows.push(vec![
                "Plain text".to_string(),
                format_count(body.count as u64),
                body.total_size_human.clone(),
                body.avg_size_human.clone(),
                body.median_size_human.clone(),
            ]);
        }
        if let Some(body) = &stats.html_body {
            rows.push(vec![
                "HTML".to_string(),
                format_count(body.count as u64),
                body.total_size_human.clone(),
                body.avg_size_human.clone(),
                body.median_size_human.clone(),
            ]);
        }
        md.push_str(&table(
            &["Type", "Messages", "Total", "Average", "Median"],
            &rows,
        ));
        md.push('\n');
    }

    // Attachments
    if let Some(attachments) = &stats.attachments {
        md.push_str("## Attachments\n\n");
        let _ = writeln!(
            md,
            "- **Total**: {}",
            format_count(attachments.total_count)
        );
        let _ = writeln!(md, "- **Unique Types**: {}\n", attachments.unique_types);
        let rows: Vec<Vec<String>> = attachments
            .by_type
            .iter()
            .map(|t| {
                vec![
                    t.kind.clone(),
                    format_count(t.count),
                    format!("{:.1}%", t.percentage),
                    t.total_size_human.clone(),
                    t.avg_size_human.clone(),
                ]
            })
            .collect();
        md.push_str(&table(
            &["Type", "Count", "Share", "Total Size", "Average Size"],
            &rows,
        ));
        md.push('\n');
    }

    // Missing headers
    if let Some(missing) = &stats.missing_headers {
        md.push_str("## Missing Headers\n\n");
        let rows: Vec<Vec<String>> = missing
            .by_type
            .iter()
            .map(|h| vec![h.header.clone(), format_count(h.count)])
            .collect();
        md.push_str(&table(&["Header", "Messages"], &rows));
        md.push('\n');
    }

    // Size comparison
    if let Some(comparison) = &stats.size_comparison {
        md.push_str("## Size Comparison\n\n");
        let _ = writeln!(
            md,
            "- **Original File Size**: {}",
            comparison.original_file_size_human
        );
        let _ = writeln!(
            md,
            "- **Parsed Data Size**: {}",
            comparison.parsed_data_size_human
        );
        let _ = writeln!(
            md,
            "- **Difference**: {} ({:.2}%)",
            comparison.difference_human, comparison.difference_percentage
        );
        md.push('\n');
    }

    md
}

/// Write the Markdown report to `path`.
pub fn write_markdown(report: &Report, path: &Path) -> Result<()> {
    let rendered = render_markdown(report);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| ReportError::io(parent, e))?;
        }
    }
    std::fs::write(path, rendered).map_err(|e| ReportError::io(path, e))?;
    info!(path = %path.display(), "Markdown summary saved");
    Ok(())
}

/// Build a Markdown table from headers and rows.
fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut out = String::new();
    out.push_str("| ");
    out.push_str(&headers.join(" | "));
    out.push_str(" |\n| ");
    out.push_str(&vec!["---"; headers.len()].join(" | "));
    out.push_str(" |\n");
    for row in rows {
        out.push_str("| ");
        out.push_str(&row.join(" | "));
        out.push_str(" |\n");
    }
    out
}

/// Format a count with thousands separators: `1234567` → `"1,234,567"`.
fn format_count(count: u64) -> String {
    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
