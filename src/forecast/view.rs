//! Display-ready forecast views
//!
//! The renderer does no unit math: everything it prints is pre-formatted
//! here, in one pass over a freshly parsed [`CityForecast`]. Formats
//! follow the feed's conventions for city forecasts: `dd.mm.yyyy` dates,
//! 12-hour slot times, 24-hour sunrise/sunset.

use thiserror::Error;

use crate::data::{CityForecast, ForecastEntry};
use crate::forecast::convert::{
    self, day_night_icon_for_hour, format_celsius, format_visibility, format_wind_speed,
    ConvertError,
};
use crate::forecast::daily::select_daily_representatives;

use chrono::Timelike;

/// Wind speed in m/s substituted when the feed omits the wind block.
///
/// The converter deliberately takes a plain `f64`, so the substitution
/// happens here, before conversion, and stays visible at the call site.
pub const DEFAULT_WIND_SPEED_MPS: f64 = 1.64;

/// Errors from assembling a forecast view.
#[derive(Debug, Error)]
pub enum ViewError {
    #[error("Forecast contained no entries")]
    EmptyForecast,
    #[error("Icon selection failed: {0}")]
    Convert(#[from] ConvertError),
}

/// One forecast slot, formatted for display
#[derive(Debug, Clone, PartialEq)]
pub struct EntryView {
    /// Slot time on the city clock, e.g. "3:00 PM"
    pub time: String,
    /// Slot date, e.g. "01.05.2024"
    pub date: String,
    /// Full weekday name, e.g. "Wednesday"
    pub day_name: String,
    /// Whole-degree Celsius or "N/A"; the renderer appends the degree mark
    pub temperature: String,
    /// Feels-like temperature, same format
    pub feels_like: String,
    /// Slot minimum temperature, same format
    pub temp_min: String,
    /// Slot maximum temperature, same format
    pub temp_max: String,
    /// e.g. "45%" or "N/A"
    pub humidity: String,
    /// e.g. "1012 hPa" or "N/A"
    pub pressure: String,
    /// e.g. "6 km/h"
    pub wind_speed: String,
    /// e.g. "10 km" or "N/A"
    pub visibility: String,
    /// Day/night-resolved icon code, e.g. "02d"
    pub icon: String,
    /// Condition text from the feed
    pub description: String,
}

/// A full forecast, formatted for display
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastView {
    /// City name as reported by the feed
    pub city_name: String,
    /// Sunrise on the city clock, e.g. "5:43"
    pub sunrise: String,
    /// Sunset on the city clock, e.g. "20:58"
    pub sunset: String,
    /// The first slot of the feed, shown as current conditions
    pub current: EntryView,
    /// Every slot in feed order, for the hourly strip
    pub hourly: Vec<EntryView>,
    /// One card per represented calendar date
    pub daily: Vec<EntryView>,
}

/// Formats one forecast slot for display.
pub fn entry_view(entry: &ForecastEntry) -> Result<EntryView, ConvertError> {
    Ok(EntryView {
        time: entry.local_time.format("%-I:%M %p").to_string(),
        date: entry.local_time.format("%d.%m.%Y").to_string(),
        day_name: entry.local_time.format("%A").to_string(),
        temperature: format_celsius(entry.temperature),
        feels_like: format_celsius(entry.feels_like),
        temp_min: format_celsius(entry.temp_min),
        temp_max: format_celsius(entry.temp_max),
        humidity: format_humidity(entry.humidity),
        pressure: format_pressure(entry.pressure),
        wind_speed: format_wind_speed(entry.wind_speed.unwrap_or(DEFAULT_WIND_SPEED_MPS)),
        visibility: format_visibility(entry.visibility),
        icon: day_night_icon_for_hour(&entry.icon, entry.local_time.hour())?,
        description: entry.description.clone(),
    })
}

/// Builds the complete display view for a parsed forecast.
///
/// Runs the whole pipeline: every slot is formatted for the hourly strip,
/// the daily selector picks the card entries, and sunrise/sunset move onto
/// the city clock. The first slot doubles as current conditions.
///
/// # Errors
///
/// An empty forecast or a slot that violates the icon selector's contract
/// fails the whole view; the caller surfaces that as a failed query rather
/// than rendering a half-formed screen.
pub fn build_forecast_view(forecast: &CityForecast) -> Result<ForecastView, ViewError> {
    let first = forecast.entries.first().ok_or(ViewError::EmptyForecast)?;
    let current = entry_view(first)?;

    let hourly = forecast
        .entries
        .iter()
        .map(entry_view)
        .collect::<Result<Vec<_>, _>>()?;

    let daily = select_daily_representatives(&forecast.entries)
        .into_iter()
        .map(entry_view)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ForecastView {
        city_name: forecast.city_name.clone(),
        sunrise: forecast
            .city_local(forecast.sunrise)
            .format("%-H:%M")
            .to_string(),
        sunset: forecast
            .city_local(forecast.sunset)
            .format("%-H:%M")
            .to_string(),
        current,
        hourly,
        daily,
    })
}

fn format_humidity(humidity: Option<f64>) -> String {
    match humidity {
        Some(h) if !h.is_nan() => format!("{:.0}%", h),
        _ => convert::MISSING_VALUE.to_string(),
    }
}

fn format_pressure(pressure: Option<f64>) -> String {
    match pressure {
        Some(p) if !p.is_nan() => format!("{:.0} hPa", p),
        _ => convert::MISSING_VALUE.to_string(),
    }
}
