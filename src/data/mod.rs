//! Core data models for skycast
//!
//! This module contains the typed forecast data used throughout the
//! application. Everything here is produced by the parse step in
//! [`openweather`] and is immutable afterwards: a new query replaces the
//! whole [`CityForecast`], never patches it.

pub mod openweather;

pub use openweather::{OpenWeatherClient, WeatherError};

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single 3-hour slot from the forecast feed
///
/// Numeric readings stay in the feed's SI units (Kelvin, m/s, meters);
/// the display pipeline owns all unit conversion. Readings the feed
/// omitted are `None` and surface later as the `"N/A"` sentinel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    /// Forecast instant in UTC
    pub timestamp: DateTime<Utc>,
    /// The feed's local-time rendering of the same instant
    pub local_time: NaiveDateTime,
    /// Temperature in Kelvin
    pub temperature: Option<f64>,
    /// Feels-like temperature in Kelvin
    pub feels_like: Option<f64>,
    /// Slot minimum temperature in Kelvin
    pub temp_min: Option<f64>,
    /// Slot maximum temperature in Kelvin
    pub temp_max: Option<f64>,
    /// Relative humidity percentage
    pub humidity: Option<f64>,
    /// Air pressure in hPa
    pub pressure: Option<f64>,
    /// Wind speed in meters per second
    pub wind_speed: Option<f64>,
    /// Visibility in meters
    pub visibility: Option<f64>,
    /// Feed icon code, non-empty (e.g. "10d")
    pub icon: String,
    /// Human-readable condition text (e.g. "light rain")
    pub description: String,
}

/// A parsed forecast response for one city
///
/// `entries` preserves the feed's chronological order; the daily selector
/// relies on that order and nothing else.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CityForecast {
    /// City name as reported by the feed
    pub city_name: String,
    /// City UTC offset in seconds, for rendering local times
    pub timezone_offset_secs: i32,
    /// Sunrise instant in UTC
    pub sunrise: DateTime<Utc>,
    /// Sunset instant in UTC
    pub sunset: DateTime<Utc>,
    /// Ordered 3-hour forecast slots
    pub entries: Vec<ForecastEntry>,
    /// When this data was fetched
    pub fetched_at: DateTime<Utc>,
}

impl CityForecast {
    /// Shifts a UTC instant to the city's local wall clock.
    pub fn city_local(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        instant.naive_utc() + Duration::seconds(i64::from(self.timezone_offset_secs))
    }
}

/// A city suggestion from the place-search endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceMatch {
    /// City name
    pub name: String,
    /// Two-letter country code, "??" when the feed omitted it
    pub country: String,
}

impl PlaceMatch {
    /// Display and query label, e.g. "Lutsk,UA".
    pub fn label(&self) -> String {
        format!("{},{}", self.name, self.country)
    }
}
