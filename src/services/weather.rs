//! Weather panel: current conditions plus a reverse-geocoded place name.

use super::{get_json, GuardedState, ServiceError};
use crate::view::Notices;
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, instrument, warn};

const OPENWEATHER_BASE: &str = "https://api.openweathermap.org";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub description: String,
    pub temperature_c: f64,
    pub humidity: u8,
    pub place: String,
}

#[async_trait]
pub trait WeatherSource: Send + Sync {
    async fn current(&self, at: Coordinates) -> Result<WeatherReport, ServiceError>;
}

#[derive(Debug, Deserialize)]
struct Condition {
    description: String,
}

#[derive(Debug, Deserialize)]
struct MainReadings {
    temp: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    weather: Vec<Condition>,
    main: MainReadings,
}

#[derive(Debug, Deserialize)]
struct ReversePlace {
    name: String,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    country: Option<String>,
}

fn place_label(places: &[ReversePlace]) -> Result<String, ServiceError> {
    let place = places
        .first()
        .ok_or_else(|| ServiceError::Response("reverse geocoding returned no place".into()))?;
    let parts: Vec<&str> = std::iter::once(place.name.as_str())
        .chain(place.state.as_deref())
        .chain(place.country.as_deref())
        .collect();
    Ok(parts.join(", "))
}

fn report(current: CurrentWeather, places: &[ReversePlace]) -> Result<WeatherReport, ServiceError> {
    let description = current
        .weather
        .into_iter()
        .next()
        .map(|c| c.description)
        .ok_or_else(|| ServiceError::Response("no weather condition in response".into()))?;
    Ok(WeatherReport {
        description,
        temperature_c: current.main.temp,
        humidity: current.main.humidity.clamp(0.0, 100.0).round() as u8,
        place: place_label(places)?,
    })
}

/// OpenWeatherMap `data/2.5/weather` and `geo/1.0/reverse`.
#[derive(Clone)]
pub struct OpenWeatherClient {
    client: Client,
    api_key: SecretString,
    base_url: String,
}

impl std::fmt::Debug for OpenWeatherClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherClient")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl OpenWeatherClient {
    #[must_use]
    pub fn new(api_key: SecretString) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: OPENWEATHER_BASE.to_string(),
        }
    }
}

#[async_trait]
impl WeatherSource for OpenWeatherClient {
    #[instrument(skip(self))]
    async fn current(&self, at: Coordinates) -> Result<WeatherReport, ServiceError> {
        let lat = at.latitude.to_string();
        let lon = at.longitude.to_string();
        let key = self.api_key.expose_secret();

        let weather_url = format!("{}/data/2.5/weather", self.base_url);
        let reverse_url = format!("{}/geo/1.0/reverse", self.base_url);
        let weather_query = [
            ("lat", lat.as_str()),
            ("lon", lon.as_str()),
            ("appid", key),
            ("units", "metric"),
        ];
        let reverse_query = [
            ("lat", lat.as_str()),
            ("lon", lon.as_str()),
            ("limit", "1"),
            ("appid", key),
        ];
        let (current, places) = tokio::try_join!(
            get_json::<CurrentWeather>(&self.client, &weather_url, &weather_query),
            get_json::<Vec<ReversePlace>>(&self.client, &reverse_url, &reverse_query),
        )?;
        report(current, &places)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum WeatherState {
    #[default]
    Idle,
    Ready(WeatherReport),
    /// Shown as "unable to fetch"; no automatic retry.
    Unavailable(String),
    /// No API key configured, or no geolocation on this device.
    Disabled,
}

/// Weather card of the dashboard.
pub struct WeatherPanel {
    source: Option<Arc<dyn WeatherSource>>,
    state: GuardedState<WeatherState>,
    notices: Notices,
    warned_unsupported: AtomicBool,
}

impl WeatherPanel {
    pub fn new(source: Option<Arc<dyn WeatherSource>>, notices: Notices) -> Self {
        Self {
            source,
            state: GuardedState::new(WeatherState::Idle),
            notices,
            warned_unsupported: AtomicBool::new(false),
        }
    }

    pub fn state(&self) -> WeatherState {
        self.state.get()
    }

    /// Fetches weather for the device position. `None` means the device has
    /// no geolocation: the panel disables itself and warns once.
    ///
    /// Returns whether this call's result was applied.
    pub async fn refresh(&self, position: Option<Coordinates>) -> bool {
        let ticket = self.state.begin();
        let outcome = match (&self.source, position) {
            (None, _) => return self.state.finish(ticket, WeatherState::Disabled),
            (Some(_), None) => Err(ServiceError::Unsupported("Geolocation")),
            (Some(source), Some(at)) => source.current(at).await,
        };

        let next = match outcome {
            Ok(report) => {
                info!(place = %report.place, "Weather updated");
                WeatherState::Ready(report)
            }
            Err(e @ ServiceError::Unsupported(_)) => {
                if !self.warned_unsupported.swap(true, Ordering::SeqCst) {
                    self.notices.failure(e.kind(), e.to_string());
                }
                WeatherState::Disabled
            }
            Err(e) => {
                warn!(error = %e, "Weather fetch failed");
                self.notices.failure(e.kind(), "Failed to fetch weather data");
                WeatherState::Unavailable(e.to_string())
            }
        };
        self.state.finish(ticket, next)
    }
}
