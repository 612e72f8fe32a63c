//! Aggregators over body sizes and attachments.

use crate::model::counter::{CountMap, SizeListMap};
use crate::model::report::{AttachmentStats, AttachmentTypeStats, BodySizeStats};

use super::numeric::{format_size, median};

/// Reduce one body-size sequence (plain text or HTML) into a summary,
/// or `None` if the sequence is empty.
pub fn body_size_stats(sizes: &[u64]) -> Option<BodySizeStats> {
    if sizes.is_empty() {
        return None;
    }
    let count = sizes.len();
    let total: u64 = sizes.iter().sum();
    let avg = total as f64 / count as f64;
    let min = sizes.iter().copied().min().unwrap_or(0);
    let max = sizes.iter().copied().max().unwrap_or(0);
    let med = median(sizes);

    Some(BodySizeStats {
        count,
        total_size: total,
        total_size_human: format_size(total as f64),
        avg_size: avg,
        avg_size_human: format_size(avg),
        min_size: min,
        min_size_human: format_size(min as f64),
        max_size: max,
        max_size_human: format_size(max as f64),
        median_size: med,
        median_size_human: format_size(med),
    })
}

/// Reduce the attachment counters into a summary, or `None` if no
/// attachment was counted.
///
/// `by_type` is ordered by count descending (first-seen order on ties).
/// An extension present in `counts` but absent from `sizes` contributes a
/// zero total size.
pub fn attachment_stats(
    counts: &CountMap<String>,
    sizes: &SizeListMap<String>,
) -> Option<AttachmentStats> {
    if counts.is_empty() {
        return None;
    }
    let total_count = counts.total();

    let by_type = counts
        .most_common(None)
        .into_iter()
        .map(|(extension, count)| {
            let total_size: u64 = sizes.get(&extension).iter().sum();
            let avg_size = if count > 0 {
                total_size as f64 / count as f64
            } else {
                0.0
            };
            AttachmentTypeStats {
                kind: extension,
                count,
                percentage: count as f64 / total_count as f64 * 100.0,
                total_size,
                total_size_human: format_size(total_size as f64),
                avg_size,
                avg_size_human: format_size(avg_size),
            }
        })
        .collect();

    Some(AttachmentStats {
        total_count,
        unique_types: counts.len(),
        by_type,
    })
}
