//! The archive pass: stream messages, extract facts, reduce to statistics.

use std::path::Path;

use tracing::{debug, info};

use crate::error::Result;
use crate::model::facts::ReportFacts;
use crate::model::report::Report;
use crate::parser::mbox::MboxParser;
use crate::parser::message::extract_facts;
use crate::stats::{calculate_statistics, format_size};

/// Analyzes one MBOX archive and produces the report document.
///
/// One `Analyzer` performs exactly one pass: facts accumulate message by
/// message, then the statistics engine reduces them once.
pub struct Analyzer {
    parser: MboxParser,
}

impl Analyzer {
    /// Open the archive, verifying it exists and capturing its byte size.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let parser = MboxParser::new(path)?;
        Ok(Self { parser })
    }

    /// Override the maximum per-message size before analyzing.
    pub fn with_max_message_size(mut self, max: usize) -> Self {
        self.parser = self.parser.with_max_message_size(max);
        self
    }

    /// Total size of the archive file in bytes.
    pub fn file_size(&self) -> u64 {
        self.parser.file_size()
    }

    /// Run the full pass and build the report document.
    ///
    /// `progress` receives `(bytes_read, total_bytes)` while the archive
    /// streams through.
    pub fn analyze(&self, progress: Option<&dyn Fn(u64, u64)>) -> Result<Report> {
        info!(path = %self.parser.path().display(), "Analyzing archive");

        let mut facts = ReportFacts::new();
        let mut email_count: u64 = 0;

        self.parser.parse(
            &mut |offset, raw_message| {
                debug!(offset, "Extracting message facts");
                facts.absorb(extract_facts(raw_message));
                email_count += 1;
                true
            },
            progress,
        )?;

        let file_size = self.parser.file_size();
        facts.file_metadata.file_path = Some(self.parser.path().to_path_buf());
        facts.file_metadata.file_size = Some(file_size);
        facts.file_metadata.file_size_human = Some(format_size(file_size as f64));
        facts.file_metadata.email_count = Some(email_count);

        info!(
            count = email_count,
            size = file_size,
            "Archive pass complete"
        );

        let statistics = calculate_statistics(&facts);

        Ok(Report {
            generated_at: chrono::Local::now().to_rfc3339(),
            file_metadata: facts.file_metadata,
            headers: facts.headers,
            content: facts.content,
            statistics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_analyze_small_archive() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "From alice@example.com Thu Jan 04 10:00:00 2024\n\
From: alice@example.com\n\
To: bob@example.com\n\
Subject: Hello\n\
Date: Thu, 04 Jan 2024 10:00:00 +0000\n\
\n\
Hi Bob.\n\
\n\
From bob@example.com Fri Jan 05 11:00:00 2024\n\
From: bob@example.com\n\
To: alice@example.com\n\
Subject: Re: Hello\n\
Date: Fri, 05 Jan 2024 11:00:00 +0000\n\
\n\
Hi Alice.\n"
        )
        .unwrap();

        let report = Analyzer::open(file.path()).unwrap().analyze(None).unwrap();
        assert_eq!(report.file_metadata.email_count, Some(2));
        assert_eq!(report.statistics.email_count, Some(2));
        let senders = report.statistics.senders.as_ref().unwrap();
        assert_eq!(senders.unique_senders, 2);
        let dates = report.statistics.date_distribution.as_ref().unwrap();
        assert_eq!(dates.first_month, "2024-01");
        assert!(report.statistics.size_comparison.is_some());
    }

    #[test]
    fn test_analyze_empty_archive() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let report = Analyzer::open(file.path()).unwrap().analyze(None).unwrap();
        assert_eq!(report.file_metadata.email_count, Some(0));
        assert_eq!(report.statistics.email_count, Some(0));
        assert!(report.statistics.senders.is_none());
        // File size is known (zero), so the comparison exists with a
        // guarded percentage
        let comparison = report.statistics.size_comparison.as_ref().unwrap();
        assert_eq!(comparison.difference_percentage, 0.0);
    }
}
