//! The accumulated-facts structure built during a single archive pass.
//!
//! One `ReportFacts` is created empty per pass, grows monotonically as each
//! message's [`MessageFacts`] is absorbed, and is then handed to
//! [`crate::stats::calculate_statistics`] exactly once.

use std::path::PathBuf;

use serde::Serialize;

use super::counter::{CountMap, SizeListMap};

/// The three headers every message is expected to carry.
pub const REQUIRED_HEADERS: [&str; 3] = ["from", "date", "subject"];

/// Metadata about the archive file itself.
///
/// All fields are optional: a facts structure assembled from partial data
/// (e.g. in tests, or when the file could not be stat'ed) simply leaves
/// them unset.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct FileMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_size_human: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_count: Option<u64>,
}

/// Per-header counters accumulated across the archive.
///
/// `cc` and `bcc` are tracked and serialized with the rest of the facts but
/// are not reduced by the statistics engine, which summarizes `from` and
/// `to` only.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct HeaderFacts {
    pub from: CountMap<String>,
    pub to: CountMap<String>,
    pub cc: CountMap<String>,
    pub bcc: CountMap<String>,
    pub subject_keywords: CountMap<String>,
    /// Message count per `"YYYY-MM"` month key.
    pub date_distribution: CountMap<String>,
    pub missing_headers: CountMap<String>,
}

/// Per-message body sizes, one entry per message that had that content type.
/// Zero-size bodies are excluded at absorption time.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct BodySizes {
    pub plain_text: Vec<u64>,
    pub html: Vec<u64>,
}

/// Attachment counters keyed by lowercase dotted extension (`".pdf"`) or
/// the `"unknown"` sentinel.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct AttachmentFacts {
    pub counts_by_type: CountMap<String>,
    pub sizes_by_type: SizeListMap<String>,
}

/// Body and attachment facts.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ContentFacts {
    pub body_sizes: BodySizes,
    pub attachments: AttachmentFacts,
}

/// Everything accumulated over one pass of the archive.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ReportFacts {
    pub file_metadata: FileMetadata,
    pub headers: HeaderFacts,
    pub content: ContentFacts,
}

/// The fixed tuple of facts extracted from a single raw message.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageFacts {
    /// Sender addresses from the `From` header, lowercased.
    pub from: Vec<String>,
    /// Recipient addresses from `To`, lowercased.
    pub to: Vec<String>,
    /// Recipient addresses from `Cc`, lowercased.
    pub cc: Vec<String>,
    /// Recipient addresses from `Bcc`, lowercased.
    pub bcc: Vec<String>,
    /// Keywords extracted from the decoded subject.
    pub subject_keywords: Vec<String>,
    /// `"YYYY-MM"` month key from the parsed `Date` header, if any.
    pub month_key: Option<String>,
    /// Total bytes of `text/plain` parts in this message.
    pub plain_text_size: u64,
    /// Total bytes of `text/html` parts in this message.
    pub html_size: u64,
    /// `(extension, size)` per attachment found.
    pub attachments: Vec<(String, u64)>,
    /// Required headers absent from this message (`from`, `date`, `subject`).
    pub missing_headers: Vec<&'static str>,
}

impl ReportFacts {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` when no section carries any data at all.
    pub fn is_empty(&self) -> bool {
        self.file_metadata == FileMetadata::default()
            && self.headers == HeaderFacts::default()
            && self.content.body_sizes.plain_text.is_empty()
            && self.content.body_sizes.html.is_empty()
            && self.content.attachments.counts_by_type.is_empty()
    }

    /// Fold one message's extracted facts into the accumulator.
    pub fn absorb(&mut self, facts: MessageFacts) {
        for addr in facts.from {
            self.headers.from.increment(addr);
        }
        for addr in facts.to {
            self.headers.to.increment(addr);
        }
        for addr in facts.cc {
            self.headers.cc.increment(addr);
        }
        for addr in facts.bcc {
            self.headers.bcc.increment(addr);
        }
        for keyword in facts.subject_keywords {
            self.headers.subject_keywords.increment(keyword);
        }
        if let Some(month) = facts.month_key {
            self.headers.date_distribution.increment(month);
        }
        for header in facts.missing_headers {
            self.headers.missing_headers.increment(header.to_string());
        }

        if facts.plain_text_size > 0 {
            self.content
                .body_sizes
                .plain_text
                .push(facts.plain_text_size);
        }
        if facts.html_size > 0 {
            self.content.body_sizes.html.push(facts.html_size);
        }
        for (extension, size) in facts.attachments {
            self.content
                .attachments
                .counts_by_type
                .increment(extension.clone());
            self.content.attachments.sizes_by_type.push(extension, size);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_message() -> MessageFacts {
        MessageFacts {
            from: vec!["alice@example.com".to_string()],
            to: vec!["bob@example.com".to_string(), "carol@example.com".to_string()],
            subject_keywords: vec!["meeting".to_string(), "notes".to_string()],
            month_key: Some("2024-03".to_string()),
            plain_text_size: 1200,
            html_size: 0,
            attachments: vec![(".pdf".to_string(), 50_000)],
            ..Default::default()
        }
    }

    #[test]
    fn test_absorb_counts_each_dimension() {
        let mut facts = ReportFacts::new();
        facts.absorb(sample_message());
        facts.absorb(sample_message());

        assert_eq!(facts.headers.from.get(&"alice@example.com".to_string()), 2);
        assert_eq!(facts.headers.to.get(&"bob@example.com".to_string()), 2);
        assert_eq!(facts.headers.date_distribution.get(&"2024-03".to_string()), 2);
        assert_eq!(facts.content.body_sizes.plain_text, vec![1200, 1200]);
        assert!(facts.content.body_sizes.html.is_empty());
        assert_eq!(
            facts.content.attachments.counts_by_type.get(&".pdf".to_string()),
            2
        );
        assert_eq!(
            facts.content.attachments.sizes_by_type.get(&".pdf".to_string()),
            &[50_000, 50_000]
        );
    }

    #[test]
    fn test_zero_size_bodies_excluded() {
        let mut facts = ReportFacts::new();
        facts.absorb(MessageFacts::default());
        assert!(facts.content.body_sizes.plain_text.is_empty());
        assert!(facts.content.body_sizes.html.is_empty());
    }

    #[test]
    fn test_attachment_count_size_invariant() {
        let mut facts = ReportFacts::new();
        facts.absorb(sample_message());
        facts.absorb(MessageFacts {
            attachments: vec![
                (".jpg".to_string(), 100),
                ("unknown".to_string(), 7),
            ],
            ..Default::default()
        });
        let attachments = &facts.content.attachments;
        assert_eq!(
            attachments.counts_by_type.total(),
            attachments.sizes_by_type.value_count() as u64
        );
    }

    #[test]
    fn test_missing_headers_counted() {
        let mut facts = ReportFacts::new();
        facts.absorb(MessageFacts {
            missing_headers: vec!["date", "subject"],
            ..Default::default()
        });
        facts.absorb(MessageFacts {
            missing_headers: vec!["date"],
            ..Default::default()
        });
        assert_eq!(facts.headers.missing_headers.get(&"date".to_string()), 2);
        assert_eq!(facts.headers.missing_headers.get(&"subject".to_string()), 1);
        assert_eq!(facts.headers.missing_headers.get(&"from".to_string()), 0);
    }

    #[test]
    fn test_is_empty() {
        let facts = ReportFacts::new();
        assert!(facts.is_empty());

        let mut with_count = ReportFacts::new();
        with_count.file_metadata.email_count = Some(0);
        assert!(!with_count.is_empty());
    }
}
