//! Integration tests for the report renderers.

use assert_fs::prelude::*;
use predicates::prelude::*;

use mboxreport::model::facts::ReportFacts;
use mboxreport::model::report::Report;
use mboxreport::report::{csv, json, markdown, summary};
use mboxreport::stats::calculate_statistics;

fn sample_report() -> Report {
    let mut facts = ReportFacts::new();
    facts.file_metadata.file_path = Some("archive.mbox".into());
    facts.file_metadata.file_size = Some(1_000_000);
    facts.file_metadata.file_size_human = Some("976.56 KB".to_string());
    facts.file_metadata.email_count = Some(42);
    facts.headers.from = [
        ("alice@example.com".to_string(), 30u64),
        ("bob@example.com".to_string(), 12),
    ]
    .into_iter()
    .collect();
    facts.headers.to = [("carol@example.com".to_string(), 42u64)]
        .into_iter()
        .collect();
    facts.headers.date_distribution = [
        ("2024-01".to_string(), 20u64),
        ("2024-02".to_string(), 22),
    ]
    .into_iter()
    .collect();
    facts.content.body_sizes.plain_text = vec![1000, 2000, 3000];
    facts.content.attachments.counts_by_type =
        [(".pdf".to_string(), 3u64)].into_iter().collect();
    facts.content.attachments.sizes_by_type =
        [(".pdf".to_string(), vec![10_000u64, 20_000, 30_000])]
            .into_iter()
            .collect();

    let statistics = calculate_statistics(&facts);
    Report {
        generated_at: "2024-03-01T12:00:00+00:00".to_string(),
        file_metadata: facts.file_metadata,
        headers: facts.headers,
        content: facts.content,
        statistics,
    }
}

fn empty_report() -> Report {
    let facts = ReportFacts::new();
    let statistics = calculate_statistics(&facts);
    Report {
        generated_at: "2024-03-01T12:00:00+00:00".to_string(),
        file_metadata: facts.file_metadata,
        headers: facts.headers,
        content: facts.content,
        statistics,
    }
}

// ─── JSON ───────────────────────────────────────────────────────────

#[test]
fn test_json_report_structure() {
    let rendered = json::render_json(&sample_report()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();

    assert_eq!(value["file_metadata"]["email_count"], 42);
    assert_eq!(value["headers"]["from"]["alice@example.com"], 30);
    assert_eq!(value["statistics"]["unique_senders"], 2);
    assert_eq!(value["statistics"]["top_senders"][0]["address"], "alice@example.com");
    assert_eq!(
        value["statistics"]["size_comparison"]["original_file_size"],
        1_000_000
    );
    // Raw counter sections survive serialization as plain maps
    assert_eq!(value["content"]["attachments"]["counts_by_type"][".pdf"], 3);
}

#[test]
fn test_json_written_to_disk() {
    let dir = assert_fs::TempDir::new().unwrap();
    let file = dir.child("out/report.json");
    json::write_json(&sample_report(), file.path()).unwrap();
    file.assert(predicate::str::contains("\"email_count\": 42"));
    dir.close().unwrap();
}

// ─── Markdown ───────────────────────────────────────────────────────

#[test]
fn test_markdown_report_sections() {
    let md = markdown::render_markdown(&sample_report());
    assert!(md.contains("# MBOX Analysis Report"));
    assert!(md.contains("- **Total Emails**: 42"));
    assert!(md.contains("## Top Senders"));
    assert!(md.contains("| alice@example.com | 30 |"));
    assert!(md.contains("## Attachments"));
    assert!(md.contains("## Size Comparison"));
}

#[test]
fn test_markdown_tolerates_empty_statistics() {
    let md = markdown::render_markdown(&empty_report());
    assert!(md.contains("# MBOX Analysis Report"));
    assert!(!md.contains("## Top Senders"));
}

#[test]
fn test_markdown_written_to_disk() {
    let dir = assert_fs::TempDir::new().unwrap();
    let file = dir.child("report.md");
    markdown::write_markdown(&sample_report(), file.path()).unwrap();
    file.assert(predicate::str::contains("## Top Senders"));
    dir.close().unwrap();
}

// ─── CSV ────────────────────────────────────────────────────────────

#[test]
fn test_csv_report_sections() {
    let rendered = csv::render_csv(&sample_report());
    assert!(rendered.contains("Email Analysis Report\n"));
    assert!(rendered.contains("Email Count,42\n"));
    assert!(rendered.contains("Top Senders\n"));
    assert!(rendered.contains("alice@example.com,30\n"));
    assert!(rendered.contains("Attachment Types\n"));
    assert!(rendered.contains(".pdf,3,"));
}

#[test]
fn test_csv_tolerates_empty_statistics() {
    let rendered = csv::render_csv(&empty_report());
    assert!(rendered.contains("Email Analysis Report\n"));
    assert!(!rendered.contains("Top Senders"));
}

#[test]
fn test_csv_written_with_bom() {
    let dir = assert_fs::TempDir::new().unwrap();
    let file = dir.child("report.csv");
    csv::write_csv(&sample_report(), file.path()).unwrap();
    let bytes = std::fs::read(file.path()).unwrap();
    assert_eq!(&bytes[..3], &[0xEF, 0xBB, 0xBF]);
    file.assert(predicate::str::contains("Top Senders"));
    dir.close().unwrap();
}

// ─── Summary ────────────────────────────────────────────────────────

#[test]
fn test_summary_digest() {
    let text = summary::render_summary(&sample_report());
    assert!(text.contains("=== Email Analysis Report Summary ==="));
    assert!(text.contains("- Emails: 42"));
    assert!(text.contains("- alice@example.com: 30 emails"));
    assert!(text.contains("Report generated at: 2024-03-01T12:00:00+00:00"));
}

#[test]
fn test_summary_tolerates_empty_statistics() {
    let text = summary::render_summary(&empty_report());
    assert!(text.contains("=== Email Analysis Report Summary ==="));
}
