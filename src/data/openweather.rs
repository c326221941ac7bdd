//! OpenWeatherMap API client
//!
//! Fetches the 5-day/3-hour forecast and city suggestions from
//! OpenWeatherMap and parses them into typed forecast data. Requests send
//! no `units` parameter, so readings arrive in SI units and the display
//! pipeline owns every conversion.
//!
//! The forecast path is cache-backed: fresh cache short-circuits the
//! network, a successful fetch overwrites the cache (last response wins),
//! and a failed fetch falls back to whatever the cache still holds.

use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use super::{CityForecast, ForecastEntry, PlaceMatch};
use crate::cache::CacheManager;
use crate::forecast::convert::parse_local_timestamp;

/// Base URL for the OpenWeatherMap 2.5 API
const OPENWEATHER_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Time-to-live for cached forecasts in hours
const FORECAST_CACHE_TTL_HOURS: i64 = 1;

/// Longest error-body excerpt quoted in a status error
const MAX_ERROR_BODY_LEN: usize = 200;

/// Errors that can occur when fetching forecast data
#[derive(Debug, Error)]
pub enum WeatherError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// The API answered with a non-success status
    #[error("OpenWeatherMap returned {0}: {1}")]
    BadStatus(u16, String),

    /// Missing expected field in response
    #[error("Missing expected field in response: {0}")]
    MissingField(String),

    /// Invalid time format in response
    #[error("Invalid time format: {0}")]
    InvalidTimeFormat(String),
}

/// Client for fetching forecast data from OpenWeatherMap
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    /// HTTP client for making requests
    http_client: Client,
    /// API key sent with every request
    api_key: String,
    /// Cache manager for persisting responses
    cache_manager: Option<CacheManager>,
    /// Base URL for the API (allows override for testing)
    base_url: String,
}

impl OpenWeatherClient {
    /// Creates a new client with the default cache location.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            api_key: api_key.into(),
            cache_manager: CacheManager::new(),
            base_url: OPENWEATHER_BASE_URL.to_string(),
        }
    }

    /// Creates a new client with a custom cache manager.
    pub fn with_cache(api_key: impl Into<String>, cache_manager: CacheManager) -> Self {
        Self {
            http_client: Client::new(),
            api_key: api_key.into(),
            cache_manager: Some(cache_manager),
            base_url: OPENWEATHER_BASE_URL.to_string(),
        }
    }

    /// Overrides the API base URL (for testing).
    #[cfg(test)]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Generates a cache key for a place query
    fn cache_key(place: &str) -> String {
        let slug: String = place
            .to_lowercase()
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { '-' })
            .collect();
        format!("forecast_{}", slug)
    }

    /// Fetches the forecast for a place query like "Lutsk" or "Vancouver,CA".
    ///
    /// # Behavior
    /// - A fresh cache entry is returned without touching the network
    /// - Otherwise the API is queried; success overwrites the cache
    /// - On API failure, an expired cache entry is returned if one exists
    pub async fn fetch_forecast(&self, place: &str) -> Result<CityForecast, WeatherError> {
        let cache_key = Self::cache_key(place);

        if let Some(ref cache_manager) = self.cache_manager {
            if let Some(cached) = cache_manager.read::<CityForecast>(&cache_key) {
                if !cached.is_expired {
                    tracing::debug!(
                        "Serving forecast for {} from cache ({})",
                        place,
                        cached.cached_at
                    );
                    return Ok(cached.data);
                }
            }
        }

        self.fetch_and_cache(place, &cache_key).await
    }

    /// Fetches the forecast, skipping the fresh-cache read.
    ///
    /// Used by manual refresh so it always reaches the network; the
    /// stale-cache fallback still applies when the network is down.
    pub async fn refresh_forecast(&self, place: &str) -> Result<CityForecast, WeatherError> {
        let cache_key = Self::cache_key(place);
        self.fetch_and_cache(place, &cache_key).await
    }

    async fn fetch_and_cache(
        &self,
        place: &str,
        cache_key: &str,
    ) -> Result<CityForecast, WeatherError> {
        match self.fetch_from_api(place).await {
            Ok(forecast) => {
                if let Some(ref cache_manager) = self.cache_manager {
                    let _ = cache_manager.write(
                        cache_key,
                        &forecast,
                        Duration::hours(FORECAST_CACHE_TTL_HOURS),
                    );
                }
                Ok(forecast)
            }
            Err(api_error) => {
                if let Some(ref cache_manager) = self.cache_manager {
                    if let Some(cached) = cache_manager.read::<CityForecast>(cache_key) {
                        tracing::warn!(
                            "Forecast fetch for {} failed ({}), falling back to cache from {}",
                            place,
                            api_error,
                            cached.cached_at
                        );
                        return Ok(cached.data);
                    }
                }
                Err(api_error)
            }
        }
    }

    /// Fetches the forecast directly from the API
    async fn fetch_from_api(&self, place: &str) -> Result<CityForecast, WeatherError> {
        let url = format!("{}/forecast", self.base_url);
        let response = self
            .http_client
            .get(&url)
            .query(&[("q", place), ("appid", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(WeatherError::BadStatus(
                status.as_u16(),
                extract_error_message(&body),
            ));
        }

        let api_response: ForecastResponse = serde_json::from_str(&body)?;
        parse_response(api_response)
    }

    /// Searches for cities matching a (partial) name.
    ///
    /// Backs the suggestion dropdown; an unknown prefix yields an empty
    /// list, not an error.
    pub async fn search_places(&self, query: &str) -> Result<Vec<PlaceMatch>, WeatherError> {
        let url = format!("{}/find", self.base_url);
        let response = self
            .http_client
            .get(&url)
            .query(&[("q", query), ("appid", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(WeatherError::BadStatus(
                status.as_u16(),
                extract_error_message(&body),
            ));
        }

        let api_response: FindResponse = serde_json::from_str(&body)?;
        Ok(parse_find_response(api_response))
    }
}

/// Parses the forecast API response into a CityForecast
fn parse_response(response: ForecastResponse) -> Result<CityForecast, WeatherError> {
    let city = response.city;
    let sunrise = parse_epoch(city.sunrise)?;
    let sunset = parse_epoch(city.sunset)?;

    let mut entries = Vec::with_capacity(response.list.len());
    for slot in response.list {
        entries.push(parse_slot(slot)?);
    }

    Ok(CityForecast {
        city_name: city.name,
        timezone_offset_secs: city.timezone,
        sunrise,
        sunset,
        entries,
        fetched_at: Utc::now(),
    })
}

/// Parses a single 3-hour slot
///
/// Optional readings map to `None`; the weather block and its icon are
/// required because everything downstream assumes a non-empty icon code.
fn parse_slot(slot: ForecastSlot) -> Result<ForecastEntry, WeatherError> {
    let timestamp = parse_epoch(slot.dt)?;
    let local_time = parse_local_timestamp(&slot.dt_txt)
        .map_err(|_| WeatherError::InvalidTimeFormat(slot.dt_txt.clone()))?;

    let weather = slot
        .weather
        .into_iter()
        .next()
        .ok_or_else(|| WeatherError::MissingField("weather".to_string()))?;
    if weather.icon.is_empty() {
        return Err(WeatherError::MissingField("weather.icon".to_string()));
    }

    Ok(ForecastEntry {
        timestamp,
        local_time,
        temperature: slot.main.temp,
        feels_like: slot.main.feels_like,
        temp_min: slot.main.temp_min,
        temp_max: slot.main.temp_max,
        humidity: slot.main.humidity,
        pressure: slot.main.pressure,
        wind_speed: slot.wind.and_then(|w| w.speed),
        visibility: slot.visibility,
        icon: weather.icon,
        description: weather.description,
    })
}

/// Converts the suggestion response into place matches
fn parse_find_response(response: FindResponse) -> Vec<PlaceMatch> {
    response
        .list
        .into_iter()
        .map(|record| PlaceMatch {
            name: record.name,
            country: record
                .sys
                .and_then(|sys| sys.country)
                .unwrap_or_else(|| "??".to_string()),
        })
        .collect()
}

/// Converts epoch seconds from the feed to a UTC instant
fn parse_epoch(secs: i64) -> Result<DateTime<Utc>, WeatherError> {
    DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| WeatherError::InvalidTimeFormat(format!("epoch {}", secs)))
}

/// Pulls a human-readable message out of an error response body.
///
/// OpenWeatherMap error bodies look like
/// `{"cod":"404","message":"city not found"}`; anything else is quoted
/// with a length cap so a proxy's HTML error page doesn't flood the UI.
fn extract_error_message(body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        if let Some(message) = parsed.message {
            return message;
        }
    }

    let trimmed = body.trim();
    if trimmed.chars().count() > MAX_ERROR_BODY_LEN {
        let excerpt: String = trimmed.chars().take(MAX_ERROR_BODY_LEN).collect();
        format!("{}...", excerpt)
    } else {
        trimmed.to_string()
    }
}

/// Forecast API response structure
#[derive(Debug, Deserialize)]
struct ForecastResponse {
    city: CityInfo,
    list: Vec<ForecastSlot>,
}

/// City block of the forecast response
#[derive(Debug, Deserialize)]
struct CityInfo {
    name: String,
    /// UTC offset in seconds
    timezone: i32,
    sunrise: i64,
    sunset: i64,
}

/// One 3-hour slot of the forecast response
#[derive(Debug, Deserialize)]
struct ForecastSlot {
    dt: i64,
    dt_txt: String,
    main: MainReadings,
    #[serde(default)]
    weather: Vec<WeatherInfo>,
    #[serde(default)]
    wind: Option<WindInfo>,
    #[serde(default)]
    visibility: Option<f64>,
}

/// Numeric readings of a forecast slot
#[derive(Debug, Deserialize)]
struct MainReadings {
    temp: Option<f64>,
    feels_like: Option<f64>,
    temp_min: Option<f64>,
    temp_max: Option<f64>,
    pressure: Option<f64>,
    humidity: Option<f64>,
}

/// Condition block of a forecast slot
#[derive(Debug, Deserialize)]
struct WeatherInfo {
    #[serde(default)]
    description: String,
    #[serde(default)]
    icon: String,
}

/// Wind block of a forecast slot
#[derive(Debug, Deserialize)]
struct WindInfo {
    speed: Option<f64>,
}

/// Place-search API response structure
#[derive(Debug, Deserialize)]
struct FindResponse {
    #[serde(default)]
    list: Vec<FindRecord>,
}

/// A single place-search match
#[derive(Debug, Deserialize)]
struct FindRecord {
    name: String,
    #[serde(default)]
    sys: Option<FindSys>,
}

/// Country block of a place-search match
#[derive(Debug, Deserialize)]
struct FindSys {
    country: Option<String>,
}

/// Error response body
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}
