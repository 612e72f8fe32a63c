//! Parsed-size reconciliation: how much of the raw archive the extracted
//! content accounts for.

use crate::model::counter::SizeListMap;
use crate::model::facts::BodySizes;
use crate::model::report::SizeComparison;

use super::numeric::format_size;

/// Compare the raw archive byte size against the summed parsed content
/// size.
///
/// Always returns a populated record, even for zero sizes. A negative
/// `difference` means the parsed data is larger than the raw file — a
/// legitimate outcome when decoding expands content. When
/// `original_size == 0` the percentage is `0.0` exactly, guarding the
/// division.
pub fn size_comparison_stats(original_size: u64, parsed_size: u64) -> SizeComparison {
    let difference = original_size as i64 - parsed_size as i64;
    let difference_percentage = if original_size > 0 {
        difference as f64 / original_size as f64 * 100.0
    } else {
        0.0
    };

    SizeComparison {
        original_file_size: original_size,
        original_file_size_human: format_size(original_size as f64),
        parsed_data_size: parsed_size,
        parsed_data_size_human: format_size(parsed_size as f64),
        difference,
        difference_human: format_size(difference as f64),
        difference_percentage,
    }
}

/// Canonical definition of "parsed size": the sum of every extracted body
/// and attachment byte size. Missing sections contribute zero.
pub fn calculate_parsed_data_size(
    body_sizes: &BodySizes,
    attachment_sizes: &SizeListMap<String>,
) -> u64 {
    let bodies: u64 =
        body_sizes.plain_text.iter().sum::<u64>() + body_sizes.html.iter().sum::<u64>();
    bodies + attachment_sizes.total()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_comparison_basic() {
        let stats = size_comparison_stats(10_000_000, 7_500_000);
        assert_eq!(stats.original_file_size, 10_000_000);
        assert_eq!(stats.original_file_size_human, "9.54 MB");
        assert_eq!(stats.parsed_data_size, 7_500_000);
        assert_eq!(stats.parsed_data_size_human, "7.15 MB");
        assert_eq!(stats.difference, 2_500_000);
        assert_eq!(stats.difference_human, "2.38 MB");
        assert_eq!(stats.difference_percentage, 25.0);
    }

    #[test]
    fn test_size_comparison_zero_original() {
        let stats = size_comparison_stats(0, 0);
        assert_eq!(stats.difference_percentage, 0.0);
        assert_eq!(stats.difference, 0);
    }

    #[test]
    fn test_size_comparison_negative_difference() {
        let stats = size_comparison_stats(1000, 2500);
        assert_eq!(stats.difference, -1500);
        assert_eq!(stats.difference_human, "-1.46 KB");
        assert_eq!(stats.difference_percentage, -150.0);
    }

    #[test]
    fn test_parsed_data_size_sums_all_sections() {
        let bodies = BodySizes {
            plain_text: vec![1000, 2000, 3000],
            html: vec![5000, 6000, 7000],
        };
        let sizes: SizeListMap<String> = [
            (".pdf".to_string(), vec![10_000, 20_000]),
            (".doc".to_string(), vec![15_000, 25_000]),
            (".jpg".to_string(), vec![5_000, 8_000]),
        ]
        .into_iter()
        .collect();
        assert_eq!(calculate_parsed_data_size(&bodies, &sizes), 107_000);
    }

    #[test]
    fn test_parsed_data_size_empty() {
        assert_eq!(
            calculate_parsed_data_size(&BodySizes::default(), &SizeListMap::new()),
            0
        );
    }

    #[test]
    fn test_parsed_data_size_partial_sections() {
        let bodies = BodySizes {
            plain_text: vec![],
            html: vec![1000],
        };
        let sizes: SizeListMap<String> =
            [(".pdf".to_string(), vec![2000])].into_iter().collect();
        assert_eq!(calculate_parsed_data_size(&bodies, &sizes), 3000);
    }
}
