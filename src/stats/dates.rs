//! Aggregator over the monthly date distribution.

use crate::model::counter::CountMap;
use crate::model::report::DateDistributionStats;

use super::numeric::{mean, median};

/// Reduce the `"YYYY-MM"` distribution into a summary, or `None` if empty.
///
/// First/last month use lexicographic ordering, which is chronological for
/// zero-padded month keys. The busiest month breaks ties by first-seen
/// order.
pub fn date_distribution_stats(
    distribution: &CountMap<String>,
) -> Option<DateDistributionStats> {
    let (busiest, busiest_count) = distribution.top().map(|(k, c)| (k.clone(), c))?;

    let first = distribution.keys().min()?.clone();
    let last = distribution.keys().max()?.clone();
    let counts: Vec<u64> = distribution.counts().collect();

    Some(DateDistributionStats {
        first_month: first,
        last_month: last,
        total_months: distribution.len(),
        busiest_month: busiest,
        busiest_month_count: busiest_count,
        monthly_average: mean(&counts),
        monthly_median: median(&counts),
    })
}
