use chrono::{Days, NaiveDateTime};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::fetch_error::FetchError;
use crate::fetcher::{Observation, ObservationSource};
use crate::intervals::DateInterval;

#[derive(Error, Debug)]
pub enum AggregateError {
    #[error("Day fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("No observations between {begin} and {end}")]
    EmptyRange {
        begin: NaiveDateTime,
        end: NaiveDateTime,
    },
}

/// Min/max temperature reduction over one interval.
#[derive(Debug, Clone, Serialize)]
pub struct AggregateResult {
    pub station_id: String,
    pub end: NaiveDateTime,
    pub temperature_min: f64,
    pub temperature_max: f64,
}

/// Aggregate one interval.
///
/// The source is queried once per calendar day in the inclusive span
/// [begin.day, end.day]; the source pages are organized by day, so the
/// fetch is coarser than the filter. The concatenated observations are
/// then restricted to begin <= t <= end (both inclusive) and reduced to
/// the minimum and maximum temperature. Equal temperatures keep fetch
/// order; equal timestamps too (both sorts are stable).
///
/// A reversed interval (begin > end) yields no observations in range and
/// reports `EmptyRange` like any other dry window.
pub async fn aggregate_range<S: ObservationSource>(
    source: &S,
    station_id: &str,
    interval: &DateInterval,
) -> Result<AggregateResult, AggregateError> {
    let mut observations: Vec<Observation> = Vec::new();

    let mut cursor = interval.begin.date();
    let stop = interval.end.date() + Days::new(1);
    while cursor < stop {
        let day_observations = source.fetch_day(station_id, cursor).await?;
        debug!(
            "Fetched {} observations for {}",
            day_observations.len(),
            cursor
        );
        observations.extend(day_observations);
        cursor = cursor + Days::new(1);
    }

    observations.sort_by_key(|o| o.timestamp);

    let mut in_range: Vec<&Observation> = observations
        .iter()
        .filter(|o| o.timestamp >= interval.begin && o.timestamp <= interval.end)
        .collect();

    if in_range.is_empty() {
        return Err(AggregateError::EmptyRange {
            begin: interval.begin,
            end: interval.end,
        });
    }

    in_range.sort_by(|a, b| a.temperature.total_cmp(&b.temperature));

    Ok(AggregateResult {
        station_id: station_id.to_string(),
        end: interval.end,
        temperature_min: in_range[0].temperature,
        temperature_max: in_range[in_range.len() - 1].temperature,
    })
}
