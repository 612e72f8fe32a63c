//! Aggregators over the header counters: senders, recipients, and
//! missing required headers.

use crate::model::counter::CountMap;
use crate::model::report::{
    AddressCount, HeaderCount, MissingHeaderStats, RecipientStats, SenderStats,
};

/// Number of entries kept in the top-senders/top-recipients lists.
const TOP_LIMIT: usize = 10;

/// Reduce the sender counter into a summary, or `None` if it is empty.
pub fn sender_stats(counts: &CountMap<String>) -> Option<SenderStats> {
    let (most_frequent, most_frequent_count) = counts.top().map(|(k, c)| (k.clone(), c))?;
    Some(SenderStats {
        top_senders: top_addresses(counts),
        unique_senders: counts.len(),
        most_frequent_sender: most_frequent,
        most_frequent_sender_count: most_frequent_count,
    })
}

/// Reduce the recipient counter into a summary, or `None` if it is empty.
pub fn recipient_stats(counts: &CountMap<String>) -> Option<RecipientStats> {
    let (most_frequent, most_frequent_count) = counts.top().map(|(k, c)| (k.clone(), c))?;
    Some(RecipientStats {
        top_recipients: top_addresses(counts),
        unique_recipients: counts.len(),
        most_frequent_recipient: most_frequent,
        most_frequent_recipient_count: most_frequent_count,
    })
}

/// Reduce the missing-header counter, or `None` if it is empty.
pub fn missing_header_stats(counts: &CountMap<String>) -> Option<MissingHeaderStats> {
    if counts.is_empty() {
        return None;
    }
    let by_type = counts
        .most_common(None)
        .into_iter()
        .map(|(header, count)| HeaderCount { header, count })
        .collect();
    Some(MissingHeaderStats {
        total_count: counts.total(),
        by_type,
    })
}

/// Top entries by count descending, capped at [`TOP_LIMIT`].
fn top_addresses(counts: &CountMap<String>) -> Vec<AddressCount> {
    counts
        .most_common(Some(TOP_LIMIT))
        .into_iter()
        .map(|(address, count)| AddressCount { address, count })
        .collect()
}
