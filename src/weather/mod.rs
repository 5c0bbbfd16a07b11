//! Weather lookup for farm planning.
//!
//! Fetches a 5-day forecast from weatherapi.com by Indian postal pincode
//! and maps the wire response into a [`WeatherReport`] with display-ready
//! day labels and a farming-advice line attached.

pub mod advice;

use std::time::Duration;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::backend::utils::{check_response_status, handle_http_error};
use crate::error::{CropsightError, Result};

pub use advice::farming_advice;

const DEFAULT_BASE_URL: &str = "http://api.weatherapi.com/v1";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const FORECAST_DAYS: u8 = 5;

/// Service name used in error messages for this client.
const SERVICE: &str = "weather";

/// Current conditions at the requested location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temp_c: f32,
    pub feels_like_c: f32,
    pub humidity: u32,
    pub wind_kph: f32,
    /// Human-readable condition text, e.g. "Partly cloudy".
    pub condition: String,
    /// Icon URL supplied by the weather service.
    pub icon: String,
}

/// One day of forecast with a display-ready label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    /// "Today", "Tomorrow", then weekday abbreviations ("Wed", "Thu", ...).
    pub day: String,
    pub max_temp_c: f32,
    pub min_temp_c: f32,
    pub condition: String,
    pub icon: String,
}

/// The weather lookup result consumed by a weather page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub location: String,
    pub region: String,
    pub current: CurrentConditions,
    pub forecast: Vec<ForecastDay>,
    /// Farming-advice line derived from the current conditions.
    pub advice: String,
}

// weatherapi.com wire structures; only the fields the report needs.
#[derive(Debug, Deserialize)]
struct ApiResponse {
    location: ApiLocation,
    current: ApiCurrent,
    forecast: ApiForecast,
}

#[derive(Debug, Deserialize)]
struct ApiLocation {
    name: String,
    #[serde(default)]
    region: String,
}

#[derive(Debug, Deserialize)]
struct ApiCurrent {
    temp_c: f32,
    humidity: u32,
    wind_kph: f32,
    condition: ApiCondition,
    feelslike_c: f32,
}

#[derive(Debug, Deserialize)]
struct ApiCondition {
    text: String,
    #[serde(default)]
    icon: String,
}

#[derive(Debug, Deserialize)]
struct ApiForecast {
    #[serde(default)]
    forecastday: Vec<ApiForecastDay>,
}

#[derive(Debug, Deserialize)]
struct ApiForecastDay {
    date: String,
    day: ApiDay,
}

#[derive(Debug, Deserialize)]
struct ApiDay {
    maxtemp_c: f32,
    mintemp_c: f32,
    condition: ApiCondition,
}

/// Configuration for the weather client.
#[derive(Debug, Clone)]
pub struct WeatherConfig {
    pub api_key: String,
    pub timeout: Duration,
    /// Custom base URL; defaults to "http://api.weatherapi.com/v1".
    pub base_url: Option<String>,
}

/// Client for fetching weather forecasts from weatherapi.com.
pub struct WeatherClient {
    config: WeatherConfig,
    client: reqwest::Client,
}

impl WeatherClient {
    /// Create a new client with the provided API key.
    ///
    /// An empty key is a typed configuration error, detected here rather
    /// than deep inside a request.
    #[instrument(name = "weather_client_new", skip(api_key))]
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(CropsightError::MissingApiKey {
                env_var: "WEATHER_API_KEY",
            });
        }

        info!("Created weather client");

        Ok(Self {
            config: WeatherConfig {
                api_key,
                timeout: DEFAULT_TIMEOUT,
                base_url: None,
            },
            client: reqwest::Client::new(),
        })
    }

    /// Create a new client by reading the API key from the
    /// `WEATHER_API_KEY` environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`CropsightError::MissingApiKey`] if `WEATHER_API_KEY` is
    /// not set.
    #[instrument(name = "weather_client_from_env")]
    pub fn from_env() -> Result<Self> {
        let api_key =
            std::env::var("WEATHER_API_KEY").map_err(|_| CropsightError::MissingApiKey {
                env_var: "WEATHER_API_KEY",
            })?;
        Self::new(api_key)
    }

    /// Set the request timeout. Defaults to 30 seconds.
    #[instrument(skip(self))]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        debug!(?timeout, "Setting request timeout");
        self.config.timeout = timeout;
        self
    }

    /// Set a custom base URL (without trailing slash).
    #[instrument(skip(self, base_url))]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = Some(base_url.into());
        self
    }

    fn base_url_str(&self) -> &str {
        self.config.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    /// Fetch the 5-day forecast for a 6-digit postal pincode.
    ///
    /// The pincode is validated before any request is made; anything other
    /// than exactly six ASCII digits is rejected with
    /// [`CropsightError::InvalidPincode`].
    #[instrument(name = "weather_forecast", skip(self), fields(pincode = %pincode))]
    pub async fn forecast(&self, pincode: &str) -> Result<WeatherReport> {
        if pincode.len() != 6 || !pincode.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CropsightError::InvalidPincode(pincode.to_string()));
        }

        info!("Fetching weather forecast");
        let url = format!("{}/forecast.json", self.base_url_str());
        let days = FORECAST_DAYS.to_string();
        let response = self
            .client
            .get(&url)
            .query(&[
                ("key", self.config.api_key.as_str()),
                ("q", pincode),
                ("days", days.as_str()),
                ("aqi", "no"),
                ("alerts", "no"),
            ])
            .timeout(self.config.timeout)
            .send()
            .await
            .map_err(|e| handle_http_error(e, SERVICE))?;

        let response = check_response_status(response, SERVICE).await?;

        let wire: ApiResponse = response.json().await.map_err(|e| {
            CropsightError::MalformedResponse {
                detail: format!("weather response body is not the expected JSON: {e}"),
            }
        })?;

        debug!(
            location = %wire.location.name,
            days = wire.forecast.forecastday.len(),
            "Mapped weather response"
        );
        Ok(map_report(wire))
    }
}

fn map_report(wire: ApiResponse) -> WeatherReport {
    let current = CurrentConditions {
        temp_c: wire.current.temp_c,
        feels_like_c: wire.current.feelslike_c,
        humidity: wire.current.humidity,
        wind_kph: wire.current.wind_kph,
        condition: wire.current.condition.text,
        icon: wire.current.condition.icon,
    };

    let forecast = wire
        .forecast
        .forecastday
        .into_iter()
        .enumerate()
        .map(|(index, day)| ForecastDay {
            day: day_label(index, &day.date),
            max_temp_c: day.day.maxtemp_c,
            min_temp_c: day.day.mintemp_c,
            condition: day.day.condition.text,
            icon: day.day.condition.icon,
        })
        .collect();

    let advice = farming_advice(&current).to_string();

    WeatherReport {
        location: wire.location.name,
        region: wire.location.region,
        current,
        forecast,
        advice,
    }
}

/// Label a forecast day for display: the first two days get "Today" and
/// "Tomorrow", later ones a weekday abbreviation from the date. An
/// unparseable date falls back to the raw date string.
fn day_label(index: usize, date: &str) -> String {
    match index {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        _ => NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map(|d| d.format("%a").to_string())
            .unwrap_or_else(|_| date.to_string()),
    }
}
