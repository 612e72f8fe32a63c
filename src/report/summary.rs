//! Plain text summary of a report, for terminal output.

use std::fmt::Write as _;

use crate::model::report::Report;

/// How many top senders the summary shows.
const SUMMARY_TOP_SENDERS: usize = 5;

/// How many attachment types the summary shows.
const SUMMARY_TOP_ATTACHMENTS: usize = 3;

/// Build a short text digest of the report's key statistics.
pub fn render_summary(report: &Report) -> String {
    let mut out = String::new();
    let stats = &report.statistics;

    out.push_str("=== Email Analysis Report Summary ===\n\n");

    out.push_str("File Information:\n");
    if let Some(path) = &report.file_metadata.file_path {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let _ = writeln!(out, "- File: {name}");
    }
    if let Some(human) = &report.file_metadata.file_size_human {
        let _ = writeln!(out, "- Size: {human}");
    }
    if let Some(count) = report.file_metadata.email_count {
        let _ = writeln!(out, "- Emails: {count}");
    }
    out.push('\n');

    out.push_str("Key Statistics:\n");
    if let Some(senders) = &stats.senders {
        let _ = writeln!(out, "- Unique senders: {}", senders.unique_senders);
    }
    if let Some(recipients) = &stats.recipients {
        let _ = writeln!(out, "- Unique recipients: {}", recipients.unique_recipients);
    }

    if let Some(senders) = &stats.senders {
        if !senders.top_senders.is_empty() {
            out.push_str("\nTop Senders:\n");
            for entry in senders.top_senders.iter().take(SUMMARY_TOP_SENDERS) {
                let _ = writeln!(out, "- {}: {} emails", entry.address, entry.count);
            }
        }
    }

    if let Some(attachments) = &stats.attachments {
        out.push_str("\nAttachments:\n");
        let _ = writeln!(out, "- Total: {}", attachments.total_count);
        let _ = writeln!(out, "- Unique types: {}", attachments.unique_types);
        if !attachments.by_type.is_empty() {
            out.push_str("\nTop Attachment Types:\n");
            for entry in attachments.by_type.iter().take(SUMMARY_TOP_ATTACHMENTS) {
                let _ = writeln!(
                    out,
                    "- {}: {} files ({})",
                    entry.kind, entry.count, entry.total_size_human
                );
            }
        }
    }

    if let Some(comparison) = &stats.size_comparison {
        out.push_str("\nSize Comparison:\n");
        let _ = writeln!(
            out,
            "- Parsed {} of {} ({:.2}% difference)",
            comparison.parsed_data_size_human,
            comparison.original_file_size_human,
            comparison.difference_percentage
        );
    }

    let _ = write!(out, "\nReport generated at: {}", report.generated_at);

    out
}
