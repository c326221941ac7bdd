//! Daily representative selection
//!
//! The 3-hour feed spans five-plus calendar days. The daily cards show one
//! entry per UTC calendar date: the first slot at or after 06:00 local
//! time, so a card reflects daytime conditions rather than the midnight
//! slot a day usually starts with.

use chrono::Timelike;

use crate::data::ForecastEntry;

/// Local hour a slot must reach before it can represent its date.
pub const MIN_REPRESENTATIVE_HOUR: u32 = 6;

/// Picks one representative entry per UTC calendar date.
///
/// Dates are keyed by the UTC date of `timestamp` and kept in order of
/// first appearance, which is chronological for an ordered feed. Within a
/// date the first entry whose local hour (from the feed's local-time
/// field) is at least [`MIN_REPRESENTATIVE_HOUR`] wins.
///
/// A date with no qualifying entry produces nothing: the feed's final
/// partial day often holds only pre-dawn slots, and such days are dropped
/// rather than represented by a night-time reading.
///
/// Pure over its input. Borrowed entries come back in the result, so
/// callers can hold the selection alongside the forecast it came from.
pub fn select_daily_representatives(entries: &[ForecastEntry]) -> Vec<&ForecastEntry> {
    let mut dates = Vec::new();
    for entry in entries {
        let date = entry.timestamp.date_naive();
        if !dates.contains(&date) {
            dates.push(date);
        }
    }

    let mut representatives = Vec::new();
    for date in dates {
        let pick = entries.iter().find(|entry| {
            entry.timestamp.date_naive() == date
                && entry.local_time.hour() >= MIN_REPRESENTATIVE_HOUR
        });
        if let Some(entry) = pick {
            representatives.push(entry);
        }
    }
    representatives
}
