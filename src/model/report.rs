//! The reduced statistics records and the full report document.
//!
//! Field names match the JSON schema consumed by the report renderers.
//! Every optional sub-record serializes to *no keys at all* when absent,
//! which is how the report distinguishes "no data" from "zero value"
//! (`email_count: 0` is kept; an empty sender counter yields no
//! `top_senders` key).

use serde::Serialize;

use super::facts::{ContentFacts, FileMetadata, HeaderFacts};

/// One `(address, count)` entry in a top-senders/top-recipients list.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AddressCount {
    pub address: String,
    pub count: u64,
}

/// Sender summary: top list plus the single most frequent sender.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SenderStats {
    pub top_senders: Vec<AddressCount>,
    pub unique_senders: usize,
    pub most_frequent_sender: String,
    pub most_frequent_sender_count: u64,
}

/// Recipient summary, structurally identical to [`SenderStats`].
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RecipientStats {
    pub top_recipients: Vec<AddressCount>,
    pub unique_recipients: usize,
    pub most_frequent_recipient: String,
    pub most_frequent_recipient_count: u64,
}

/// Distribution summary over one body content type (plain text or HTML).
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BodySizeStats {
    pub count: usize,
    pub total_size: u64,
    pub total_size_human: String,
    pub avg_size: f64,
    pub avg_size_human: String,
    pub min_size: u64,
    pub min_size_human: String,
    pub max_size: u64,
    pub max_size_human: String,
    pub median_size: f64,
    pub median_size_human: String,
}

/// Per-extension attachment summary entry.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AttachmentTypeStats {
    #[serde(rename = "type")]
    pub kind: String,
    pub count: u64,
    /// Share of `total_count`, 0–100.
    pub percentage: f64,
    pub total_size: u64,
    pub total_size_human: String,
    pub avg_size: f64,
    pub avg_size_human: String,
}

/// Attachment summary across all extensions.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AttachmentStats {
    pub total_count: u64,
    pub unique_types: usize,
    /// Ordered by count descending, first-seen order on ties.
    pub by_type: Vec<AttachmentTypeStats>,
}

/// One `(header, count)` entry in the missing-header summary.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HeaderCount {
    pub header: String,
    pub count: u64,
}

/// Missing-header summary.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MissingHeaderStats {
    pub total_count: u64,
    pub by_type: Vec<HeaderCount>,
}

/// Monthly message distribution summary.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DateDistributionStats {
    pub first_month: String,
    pub last_month: String,
    pub total_months: usize,
    pub busiest_month: String,
    pub busiest_month_count: u64,
    pub monthly_average: f64,
    pub monthly_median: f64,
}

/// Raw archive size reconciled against the sum of parsed content sizes.
///
/// `difference` may be negative: MIME transport overhead usually makes the
/// raw file larger, but decoding can occasionally expand text.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SizeComparison {
    pub original_file_size: u64,
    pub original_file_size_human: String,
    pub parsed_data_size: u64,
    pub parsed_data_size_human: String,
    pub difference: i64,
    pub difference_human: String,
    pub difference_percentage: f64,
}

/// The complete statistics object produced by one aggregation pass.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct Statistics {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_count: Option<u64>,
    #[serde(flatten)]
    pub senders: Option<SenderStats>,
    #[serde(flatten)]
    pub recipients: Option<RecipientStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plain_text_body: Option<BodySizeStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_body: Option<BodySizeStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachments: Option<AttachmentStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_headers: Option<MissingHeaderStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_distribution: Option<DateDistributionStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_comparison: Option<SizeComparison>,
}

impl Statistics {
    /// `true` when no section was produced at all (entirely empty input).
    pub fn is_empty(&self) -> bool {
        self.email_count.is_none()
            && self.senders.is_none()
            && self.recipients.is_none()
            && self.plain_text_body.is_none()
            && self.html_body.is_none()
            && self.attachments.is_none()
            && self.missing_headers.is_none()
            && self.date_distribution.is_none()
            && self.size_comparison.is_none()
    }
}

/// The full report document handed to renderers: the raw accumulated facts
/// plus the reduced statistics, stamped with a generation time.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Report {
    pub generated_at: String,
    pub file_metadata: FileMetadata,
    pub headers: HeaderFacts,
    pub content: ContentFacts,
    pub statistics: Statistics,
}
