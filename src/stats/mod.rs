//! The statistics engine: pure reduction of accumulated facts into the
//! report's statistics object.
//!
//! Every aggregator is a pure function over one dimension of the facts.
//! [`calculate_statistics`] composes them, invoking each only when its
//! input carries data, so absent sections produce no keys in the output.
//! The engine never logs, prints, or performs I/O.

pub mod content;
pub mod dates;
pub mod headers;
pub mod numeric;
pub mod size;

pub use content::{attachment_stats, body_size_stats};
pub use dates::date_distribution_stats;
pub use headers::{missing_header_stats, recipient_stats, sender_stats};
pub use numeric::{format_size, mean, median, mode};
pub use size::{calculate_parsed_data_size, size_comparison_stats};

use crate::model::facts::ReportFacts;
use crate::model::report::Statistics;

/// Reduce the accumulated facts into the statistics object.
///
/// `email_count` is emitted whenever the metadata carries it, including
/// zero. `size_comparison` is computed whenever the raw file size is known,
/// over whatever body/attachment data exists. Everything else appears only
/// when its source counter is non-empty. A fully empty input yields an
/// empty statistics object.
///
/// The reduction is pure: calling it twice on the same facts produces
/// identical output.
pub fn calculate_statistics(facts: &ReportFacts) -> Statistics {
    let headers = &facts.headers;
    let content = &facts.content;

    let size_comparison = facts.file_metadata.file_size.map(|file_size| {
        let parsed = calculate_parsed_data_size(
            &content.body_sizes,
            &content.attachments.sizes_by_type,
        );
        size_comparison_stats(file_size, parsed)
    });

    Statistics {
        email_count: facts.file_metadata.email_count,
        senders: sender_stats(&headers.from),
        recipients: recipient_stats(&headers.to),
        plain_text_body: body_size_stats(&content.body_sizes.plain_text),
        html_body: body_size_stats(&content.body_sizes.html),
        attachments: attachment_stats(
            &content.attachments.counts_by_type,
            &content.attachments.sizes_by_type,
        ),
        missing_headers: missing_header_stats(&headers.missing_headers),
        date_distribution: date_distribution_stats(&headers.date_distribution),
        size_comparison,
    }
}
