//! Numeric primitives shared by the aggregators.
//!
//! All functions are total: empty input yields `0` (or `None` for
//! [`mode`]), never a panic or a NaN.

use std::hash::Hash;

use crate::model::counter::CountMap;

/// Arithmetic mean. Returns `0.0` for empty input.
pub fn mean(values: &[u64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<u64>() as f64 / values.len() as f64
}

/// Median over a copy of the input (the slice is not assumed sorted).
///
/// Odd length: the middle element. Even length: the average of the two
/// middle elements. Returns `0.0` for empty input.
pub fn median(values: &[u64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[mid] as f64
    } else {
        (sorted[mid - 1] + sorted[mid]) as f64 / 2.0
    }
}

/// Most frequent element, or `None` for empty input.
///
/// Ties go to the value that first reached the maximum count, i.e. the
/// earliest in first-occurrence order.
pub fn mode<T: Eq + Hash + Clone>(values: &[T]) -> Option<T> {
    let mut counts: CountMap<T> = CountMap::new();
    for value in values {
        counts.increment(value.clone());
    }
    counts.top().map(|(value, _)| value.clone())
}

/// Format a byte count as a human-readable string, e.g. `"1.46 KB"`.
///
/// Scales through B, KB, MB, GB, TB by repeated division by 1024; PB is the
/// terminal unit. Always two decimal places. The sign of negative inputs is
/// carried through the division.
pub fn format_size(bytes: f64) -> String {
    let mut value = bytes;
    for unit in ["B", "KB", "MB", "GB", "TB"] {
        if value.abs() < 1024.0 {
            return format!("{value:.2} {unit}");
        }
        value /= 1024.0;
    }
    format!("{value:.2} PB")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[1, 2, 3, 4, 5]), 3.0);
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(mean(&[10]), 10.0);
    }

    #[test]
    fn test_median_odd_length() {
        assert_eq!(median(&[1, 2, 3, 4, 5]), 3.0);
        // Unsorted input
        assert_eq!(median(&[5, 2, 1, 3, 4]), 3.0);
    }

    #[test]
    fn test_median_even_length() {
        assert_eq!(median(&[1, 2, 3, 4]), 2.5);
        assert_eq!(median(&[8, 10, 12, 15, 18, 20]), 13.5);
    }

    #[test]
    fn test_median_empty() {
        assert_eq!(median(&[]), 0.0);
    }

    #[test]
    fn test_mode() {
        assert_eq!(mode(&[1u64, 2, 2, 3, 4, 2, 5]), Some(2));
        assert_eq!(mode(&["apple", "banana", "apple", "cherry"]), Some("apple"));
        assert_eq!(mode::<u64>(&[]), None);
        // All unique: first value wins
        assert_eq!(mode(&[1u64, 2, 3, 4, 5]), Some(1));
    }

    #[test]
    fn test_format_size_units() {
        assert_eq!(format_size(0.0), "0.00 B");
        assert_eq!(format_size(500.0), "500.00 B");
        assert_eq!(format_size(1024.0), "1.00 KB");
        assert_eq!(format_size(1500.0), "1.46 KB");
        assert_eq!(format_size(1_500_000.0), "1.43 MB");
        assert_eq!(format_size(1_500_000_000.0), "1.40 GB");
        assert_eq!(format_size(1_500_000_000_000.0), "1.36 TB");
        assert_eq!(format_size(1024f64.powi(4)), "1.00 TB");
    }

    #[test]
    fn test_format_size_petabytes_terminal() {
        assert_eq!(format_size(1024f64.powi(5)), "1.00 PB");
        // No unit beyond PB
        assert_eq!(format_size(1024f64.powi(6)), "1024.00 PB");
    }

    #[test]
    fn test_format_size_negative_carries_sign() {
        assert_eq!(format_size(-1500.0), "-1.46 KB");
        assert_eq!(format_size(-500.0), "-500.00 B");
    }
}
