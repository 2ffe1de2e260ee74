use tracing::{info, warn};

use crate::aggregator::{aggregate_range, AggregateResult};
use crate::fetcher::ObservationSource;
use crate::intervals::DateInterval;

/// Aggregate every interval in order and return the results sorted by end
/// timestamp.
///
/// Intervals are processed strictly sequentially, one full day-fetch loop
/// at a time. A fault in one interval (fetch failure, dry range) is logged
/// and skipped; the run always continues, so the result count may be lower
/// than the interval count. The final sort is needed because input row
/// order is not guaranteed chronological.
pub async fn run_pipeline<S: ObservationSource>(
    source: &S,
    station_id: &str,
    intervals: &[DateInterval],
) -> Vec<AggregateResult> {
    let mut results = Vec::new();

    for interval in intervals {
        match aggregate_range(source, station_id, interval).await {
            Ok(result) => {
                info!(
                    "Interval {} – {}: min {} / max {}",
                    interval.begin, interval.end, result.temperature_min, result.temperature_max
                );
                results.push(result);
            }
            Err(e) => {
                warn!(
                    "Skipping interval {} – {} for station {}: {}",
                    interval.begin, interval.end, station_id, e
                );
            }
        }
    }

    results.sort_by_key(|r| r.end);
    results
}
