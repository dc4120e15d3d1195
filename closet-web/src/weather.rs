//! OpenWeatherMap API client
//!
//! Geocoding (city name → coordinates) plus the One Call current,
//! historical, daily summary and overview endpoints.
//! Every call is a fresh request: no caching. Transport errors and 5xx
//! responses are retried once; everything else is reported as-is.

use chrono::{DateTime, NaiveDate, Utc};
use closet_common::config::WeatherConfig;
use closet_common::WeatherReading;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

const USER_AGENT: &str = concat!("closet-web/", env!("CARGO_PKG_VERSION"));

/// One initial attempt plus a single retry
const MAX_ATTEMPTS: u32 = 2;

/// Weather client errors
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("City not found: {0}")]
    CityNotFound(String),

    #[error("Weather unavailable: {0}")]
    Unavailable(String),
}

/// Latitude/longitude pair from geocoding
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Geocoding candidate
#[derive(Debug, Clone, Deserialize)]
struct GeoCandidate {
    lat: f64,
    lon: f64,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    country: Option<String>,
}

/// One Call response (only the fields we read)
#[derive(Debug, Clone, Deserialize)]
struct OneCallResponse {
    current: CurrentWeather,
}

#[derive(Debug, Clone, Deserialize)]
struct CurrentWeather {
    temp: f64,
    #[serde(default)]
    weather: Vec<WeatherDescription>,
}

#[derive(Debug, Clone, Deserialize)]
struct WeatherDescription {
    description: String,
}

#[derive(Debug, Clone, Deserialize)]
struct OverviewResponse {
    weather_overview: String,
}

#[derive(Debug, Clone, Deserialize)]
struct TimeMachineResponse {
    #[serde(default)]
    data: Vec<CurrentWeather>,
}

#[derive(Debug, Clone, Deserialize)]
struct DaySummaryResponse {
    temperature: DayTemperature,
    #[serde(default)]
    precipitation: Option<DayPrecipitation>,
    #[serde(default)]
    humidity: Option<DayHumidity>,
}

#[derive(Debug, Clone, Deserialize)]
struct DayTemperature {
    min: f64,
    max: f64,
    #[serde(default)]
    afternoon: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
struct DayPrecipitation {
    total: f64,
}

#[derive(Debug, Clone, Deserialize)]
struct DayHumidity {
    #[serde(default)]
    afternoon: Option<f64>,
}

/// Daily aggregation for a location (°C, mm, %)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub temperature_min: f64,
    pub temperature_max: f64,
    pub temperature_afternoon: Option<f64>,
    pub precipitation_mm: f64,
    pub humidity_afternoon: Option<f64>,
}

/// OpenWeatherMap client
pub struct WeatherClient {
    http_client: reqwest::Client,
    api_key: Option<String>,
    geo_base_url: String,
    api_base_url: String,
}

impl WeatherClient {
    pub fn new(config: &WeatherConfig) -> Result<Self, WeatherError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout())
            .build()
            .map_err(|e| WeatherError::Unavailable(e.to_string()))?;

        Ok(Self {
            http_client,
            api_key: config.api_key.clone().filter(|k| !k.trim().is_empty()),
            geo_base_url: config.geo_base_url.trim_end_matches('/').to_string(),
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn api_key(&self) -> Result<&str, WeatherError> {
        self.api_key
            .as_deref()
            .ok_or_else(|| WeatherError::Unavailable("weather API key not configured".to_string()))
    }

    /// GET with a single retry on transport error or 5xx
    async fn get(&self, url: &str, query: &[(&str, String)]) -> reqwest::Result<reqwest::Response> {
        let mut attempt = 1;
        loop {
            let result = self.http_client.get(url).query(query).send().await;
            let transient = match &result {
                Ok(response) => response.status().is_server_error(),
                Err(_) => true,
            };
            if transient && attempt < MAX_ATTEMPTS {
                match &result {
                    Ok(response) => warn!(url, status = %response.status(), attempt, "Weather API server error, retrying"),
                    Err(e) => warn!(url, error = %e, attempt, "Weather API request failed, retrying"),
                }
                attempt += 1;
                continue;
            }
            return result;
        }
    }

    /// Convert a city name to coordinates
    ///
    /// Empty candidate list or non-success status → `CityNotFound`.
    pub async fn resolve_city(&self, city: &str) -> Result<Coordinates, WeatherError> {
        let url = format!("{}/geo/1.0/direct", self.geo_base_url);
        let query = [
            ("q", city.to_string()),
            ("limit", "1".to_string()),
            ("appid", self.api_key()?.to_string()),
        ];

        debug!(city, "Querying geocoding API");

        let response = self
            .get(&url, &query)
            .await
            .map_err(|e| WeatherError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(city, status = %status, "Geocoding request failed");
            return Err(WeatherError::CityNotFound(city.to_string()));
        }

        let candidates: Vec<GeoCandidate> = response
            .json()
            .await
            .map_err(|e| WeatherError::Unavailable(format!("Malformed geocoding payload: {}", e)))?;

        let top = candidates
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::CityNotFound(city.to_string()))?;

        info!(
            city,
            matched = top.name.as_deref().unwrap_or("?"),
            country = top.country.as_deref().unwrap_or("?"),
            lat = top.lat,
            lon = top.lon,
            "Resolved city"
        );

        Ok(Coordinates {
            latitude: top.lat,
            longitude: top.lon,
        })
    }

    fn location_query(&self, at: Coordinates) -> Result<[(&'static str, String); 4], WeatherError> {
        Ok([
            ("lat", at.latitude.to_string()),
            ("lon", at.longitude.to_string()),
            ("appid", self.api_key()?.to_string()),
            ("units", "metric".to_string()),
        ])
    }

    /// GET a One Call endpoint and decode its JSON body
    ///
    /// Transport failure, non-success status and undecodable payloads all
    /// come back as `Unavailable`.
    async fn fetch<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        what: &str,
    ) -> Result<T, WeatherError> {
        let url = format!("{}{}", self.api_base_url, path);

        let response = self
            .get(&url, query)
            .await
            .map_err(|e| WeatherError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %body, "{} request failed", what);
            return Err(WeatherError::Unavailable(format!("Weather API returned {}", status)));
        }

        response
            .json()
            .await
            .map_err(|e| WeatherError::Unavailable(format!("Malformed {} payload: {}", what, e)))
    }

    /// Current temperature (°C) and description, classified
    pub async fn current_conditions(&self, at: Coordinates) -> Result<WeatherReading, WeatherError> {
        let query = self.location_query(at)?;
        let payload: OneCallResponse = self.fetch("/data/3.0/onecall", &query, "weather").await?;

        let description = first_description(payload.current.weather)?;
        let reading = WeatherReading::new(payload.current.temp, description);
        info!(
            temperature = reading.temperature,
            description = %reading.description,
            condition = %reading.condition,
            "Fetched current weather"
        );
        Ok(reading)
    }

    /// Conditions at a past instant (One Call "timemachine"), classified
    pub async fn historical(&self, at: Coordinates, when: DateTime<Utc>) -> Result<WeatherReading, WeatherError> {
        let mut query = self.location_query(at)?.to_vec();
        query.push(("dt", when.timestamp().to_string()));

        let payload: TimeMachineResponse = self
            .fetch("/data/3.0/onecall/timemachine", &query, "historical weather")
            .await?;

        let sample = payload
            .data
            .into_iter()
            .next()
            .ok_or_else(|| WeatherError::Unavailable("Historical payload has no data".to_string()))?;

        let reading = WeatherReading::new(sample.temp, first_description(sample.weather)?);
        debug!(dt = when.timestamp(), condition = %reading.condition, "Fetched historical weather");
        Ok(reading)
    }

    /// Aggregated figures for one calendar day
    pub async fn day_summary(&self, at: Coordinates, date: NaiveDate) -> Result<DaySummary, WeatherError> {
        let mut query = self.location_query(at)?.to_vec();
        query.push(("date", date.format("%Y-%m-%d").to_string()));

        let payload: DaySummaryResponse = self
            .fetch("/data/3.0/onecall/day_summary", &query, "day summary")
            .await?;

        Ok(DaySummary {
            date,
            temperature_min: payload.temperature.min,
            temperature_max: payload.temperature.max,
            temperature_afternoon: payload.temperature.afternoon,
            precipitation_mm: payload.precipitation.map(|p| p.total).unwrap_or(0.0),
            humidity_afternoon: payload.humidity.and_then(|h| h.afternoon),
        })
    }

    /// Human-readable summary of today's weather
    pub async fn overview(&self, at: Coordinates) -> Result<String, WeatherError> {
        let query = self.location_query(at)?;
        let payload: OverviewResponse = self
            .fetch("/data/3.0/onecall/overview", &query, "overview")
            .await?;
        Ok(payload.weather_overview)
    }
}

fn first_description(weather: Vec<WeatherDescription>) -> Result<String, WeatherError> {
    weather
        .into_iter()
        .next()
        .map(|w| w.description)
        .ok_or_else(|| WeatherError::Unavailable("Weather payload has no description".to_string()))
}
