//! Unit conversion and icon selection for forecast display
//!
//! OpenWeatherMap responses arrive in SI units (Kelvin, m/s, meters)
//! because the forecast request sends no `units` parameter. These
//! functions turn raw readings into the display strings the UI renders,
//! with a shared `"N/A"` sentinel for readings the feed omitted.

use chrono::{NaiveDateTime, Timelike};
use thiserror::Error;

/// Sentinel rendered when a reading is absent or not a number.
pub const MISSING_VALUE: &str = "N/A";

/// Local hour (inclusive) at which daytime icons begin.
pub const DAY_START_HOUR: u32 = 6;

/// Local hour (exclusive) at which daytime icons end.
pub const DAY_END_HOUR: u32 = 18;

/// Errors raised when the icon selector is handed malformed arguments.
///
/// These indicate a caller mistake, not a data condition: the parse step
/// rejects responses with empty icon codes or unreadable timestamps before
/// they reach the selector.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConvertError {
    #[error("Icon code is empty")]
    EmptyIconCode,
    #[error("Invalid local timestamp: {0}")]
    InvalidTimestamp(String),
}

/// Converts a Kelvin reading to a whole-degree Celsius string.
///
/// Absent or NaN readings produce `"N/A"`. Present readings are shifted by
/// -273.15 and rounded to the nearest integer, ties to even so the result
/// is identical on every platform. No unit suffix is added; the renderer
/// appends the degree mark.
///
/// # Example
///
/// ```
/// use skycast::forecast::convert::format_celsius;
///
/// assert_eq!(format_celsius(Some(300.15)), "27");
/// assert_eq!(format_celsius(None), "N/A");
/// ```
pub fn format_celsius(kelvin: Option<f64>) -> String {
    match kelvin {
        Some(k) if !k.is_nan() => {
            let celsius = (k - 273.15).round_ties_even();
            // Cast, don't format: "{:.0}" would print -0.0 as "-0"
            (celsius as i64).to_string()
        }
        _ => MISSING_VALUE.to_string(),
    }
}

/// Converts a wind speed in meters per second to a `km/h` display string.
///
/// Takes a plain `f64` on purpose: the feed's wind block is optional as a
/// whole, and the caller substitutes a default speed before formatting
/// rather than threading an optional through here. See
/// `view::DEFAULT_WIND_SPEED_MPS` for the substitution value.
pub fn format_wind_speed(meters_per_second: f64) -> String {
    format!("{:.0} km/h", meters_per_second * 3.6)
}

/// Converts a visibility reading in meters to a `km` display string.
///
/// Absent or NaN readings produce `"N/A"`.
pub fn format_visibility(meters: Option<f64>) -> String {
    match meters {
        Some(m) if !m.is_nan() => format!("{:.0} km", m / 1000.0),
        _ => MISSING_VALUE.to_string(),
    }
}

/// Resolves an icon code to its day or night variant from local-time text.
///
/// The final character of the code is replaced with `'d'` when the local
/// hour falls in `[DAY_START_HOUR, DAY_END_HOUR)` and `'n'` otherwise,
/// matching the icon-naming scheme of the feed (`"10d"` / `"10n"`).
///
/// # Arguments
///
/// * `icon_code` - A non-empty feed icon code such as `"10d"`
/// * `local_timestamp` - Local-time text in the feed's
///   `"2024-05-01 06:00:00"` form or the ISO `"2024-05-01T06:00:00"` form
///
/// # Errors
///
/// Returns an error when the icon code is empty or the timestamp does not
/// parse.
pub fn day_night_icon(icon_code: &str, local_timestamp: &str) -> Result<String, ConvertError> {
    let local = parse_local_timestamp(local_timestamp)?;
    day_night_icon_for_hour(icon_code, local.hour())
}

/// Resolves an icon code's day/night variant from an already-parsed hour.
pub fn day_night_icon_for_hour(icon_code: &str, hour: u32) -> Result<String, ConvertError> {
    if icon_code.is_empty() {
        return Err(ConvertError::EmptyIconCode);
    }
    let variant = if (DAY_START_HOUR..DAY_END_HOUR).contains(&hour) {
        'd'
    } else {
        'n'
    };

    let mut resolved = icon_code.to_string();
    resolved.pop();
    resolved.push(variant);
    Ok(resolved)
}

/// Parses the feed's local-time text into a `NaiveDateTime`.
///
/// The 3-hour forecast feed writes `"2024-05-01 06:00:00"`; the ISO `"T"`
/// separator is accepted as well.
pub fn parse_local_timestamp(value: &str) -> Result<NaiveDateTime, ConvertError> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .map_err(|_| ConvertError::InvalidTimestamp(value.to_string()))
}
