//! Current-weather client.
//!
//! The weather API takes the key and a location query (`q`) as query
//! parameters and returns a `location` object plus a `current` object.
//! Its timestamps are naive local strings (`2025-03-01 14:30`), which we
//! keep as UTC best-effort; an unparseable timestamp is simply dropped.

use std::time::Duration;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;

use rg_core::{Config, WeatherSnapshot};

use crate::error::SyncResult;

/// Request timeout for weather fetches.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the current-weather endpoint.
pub struct WeatherClient {
    http: reqwest::blocking::Client,
    api_key: String,
    endpoint: String,
    query: String,
}

#[derive(Deserialize, Default)]
struct WeatherResponse {
    #[serde(default)]
    location: Option<RawLocation>,
    #[serde(default)]
    current: Option<RawCurrent>,
}

#[derive(Deserialize)]
struct RawLocation {
    name: Option<String>,
    region: Option<String>,
    country: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

#[derive(Deserialize)]
struct RawCurrent {
    temp_c: Option<f64>,
    feelslike_c: Option<f64>,
    wind_kph: Option<f64>,
    wind_dir: Option<String>,
    humidity: Option<f64>,
    uv: Option<f64>,
    last_updated: Option<String>,
}

impl WeatherClient {
    /// Create a client with explicit credentials and location query.
    pub fn new(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        query: impl Into<String>,
    ) -> SyncResult<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            query: query.into(),
        })
    }

    /// Create a client from the environment configuration.
    pub fn from_config(config: &Config) -> SyncResult<Self> {
        let creds = config.require_weather()?;
        Self::new(
            creds.key.clone(),
            creds.endpoint.clone(),
            config.weather_query.clone(),
        )
    }

    /// Fetch the current weather observation.
    pub fn fetch_current(&self) -> SyncResult<WeatherSnapshot> {
        let response: WeatherResponse = self
            .http
            .get(&self.endpoint)
            .query(&[("key", &self.api_key), ("q", &self.query)])
            .send()?
            .error_for_status()?
            .json()?;

        let location = response.location;
        let current = response.current;

        let (name, region, country, lat, lon) = match location {
            Some(loc) => (loc.name, loc.region, loc.country, loc.lat, loc.lon),
            None => (None, None, None, None, None),
        };

        let snapshot = match current {
            Some(cur) => WeatherSnapshot {
                location_name: name,
                region,
                country,
                latitude: lat,
                longitude: lon,
                temperature_c: cur.temp_c,
                feels_like_c: cur.feelslike_c,
                wind_kph: cur.wind_kph,
                wind_dir: cur.wind_dir,
                humidity: cur.humidity,
                uv_index: cur.uv,
                last_updated: cur.last_updated.as_deref().and_then(parse_local_timestamp),
            },
            None => WeatherSnapshot {
                location_name: name,
                region,
                country,
                latitude: lat,
                longitude: lon,
                temperature_c: None,
                feels_like_c: None,
                wind_kph: None,
                wind_dir: None,
                humidity: None,
                uv_index: None,
                last_updated: None,
            },
        };

        Ok(snapshot)
    }
}

/// Parse the API's naive `YYYY-MM-DD HH:MM` timestamps as UTC.
fn parse_local_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S"))
        .ok()
        .map(|naive| naive.and_utc())
}
