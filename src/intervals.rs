use chrono::NaiveDateTime;
use tracing::{debug, warn};

use crate::importers::InputRow;

/// One aggregation window, bounded by the dates of two consecutive input
/// rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateInterval {
    pub begin: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// Pair consecutive rows into intervals, in input order.
///
/// Dates are parsed with the configured `date_format`; a row that fails to
/// parse is skipped with a warning and pairing continues from the previous
/// good row. Degenerate pairs (equal parsed timestamps, typically duplicate
/// rows) are dropped silently. Fewer than two parseable rows produce no
/// intervals.
pub fn build_intervals(rows: &[InputRow], date_format: &str) -> Vec<DateInterval> {
    let mut intervals = Vec::new();
    let mut previous: Option<NaiveDateTime> = None;

    for row in rows {
        let parsed = match NaiveDateTime::parse_from_str(row.date_text.trim(), date_format) {
            Ok(timestamp) => timestamp,
            Err(e) => {
                warn!("Skipping row with unparseable date '{}': {}", row.date_text, e);
                continue;
            }
        };

        if let Some(begin) = previous {
            if begin == parsed {
                debug!("Skipping degenerate interval at {}", parsed);
            } else {
                intervals.push(DateInterval {
                    begin,
                    end: parsed,
                });
            }
        }
        previous = Some(parsed);
    }

    intervals
}
