use std::time::Duration;

use moka::future::Cache;
use tracing::debug;

use crate::error::OpenMeteoError;
use crate::types::{ApiErrorResponse, Coordinates, ForecastResponse, GeocodingResponse};

const DEFAULT_GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com";
const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com";
const DEFAULT_USER_AGENT: &str = "open-meteo-client-rs/0.1";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const GEOCODE_CACHE_TTL_SECS: u64 = 86400; // 24 hours
const GEOCODE_CACHE_CAPACITY: u64 = 10_000;

const HOURLY_VARIABLES: &str =
    "relative_humidity_2m,cloudcover,precipitation,precipitation_probability";
const DAILY_VARIABLES: &str = "sunrise,sunset";

/// Connection settings for [`OpenMeteoClient`]
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub geocoding_url: String,
    pub forecast_url: String,
    pub user_agent: String,
    /// Applied to every outbound request
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            geocoding_url: DEFAULT_GEOCODING_URL.to_string(),
            forecast_url: DEFAULT_FORECAST_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Open-Meteo geocoding + forecast client
pub struct OpenMeteoClient {
    client: reqwest::Client,
    geocoding_url: String,
    forecast_url: String,
    geocode_cache: Cache<String, Coordinates>,
}

impl OpenMeteoClient {
    /// Create a client against the public Open-Meteo endpoints
    pub fn new() -> crate::Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    pub fn with_config(config: ClientConfig) -> crate::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent)
            .build()?;

        let geocode_cache = Cache::builder()
            .max_capacity(GEOCODE_CACHE_CAPACITY)
            .time_to_live(Duration::from_secs(GEOCODE_CACHE_TTL_SECS))
            .build();

        Ok(Self {
            client,
            geocoding_url: config.geocoding_url.trim_end_matches('/').to_string(),
            forecast_url: config.forecast_url.trim_end_matches('/').to_string(),
            geocode_cache,
        })
    }

    /// Resolve a free-text place name to the coordinates of the best match
    ///
    /// Returns `Ok(None)` when the geocoder has no result for the name.
    pub async fn geocode(&self, name: &str) -> crate::Result<Option<Coordinates>> {
        let cache_key = name.trim().to_lowercase();
        if let Some(cached) = self.geocode_cache.get(&cache_key).await {
            return Ok(Some(cached));
        }

        let url = format!(
            "{}/v1/search?name={}&count=1",
            self.geocoding_url,
            urlencoding::encode(name)
        );

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(OpenMeteoError::ApiError(format!(
                "Geocoding returned status {}",
                response.status()
            )));
        }

        let data: GeocodingResponse = response.json().await?;
        let Some(best) = data.results.first().copied() else {
            debug!(name, "Geocoding returned no results");
            return Ok(None);
        };

        debug!(
            name,
            lat = best.latitude,
            lon = best.longitude,
            "Geocoded location"
        );

        self.geocode_cache.insert(cache_key, best).await;
        Ok(Some(best))
    }

    /// Fetch current weather, the hourly humidity/cloud/precipitation series
    /// and today's sunrise/sunset, in the location's own timezone
    pub async fn forecast(&self, at: Coordinates) -> crate::Result<ForecastResponse> {
        let url = format!(
            "{}/v1/forecast?latitude={}&longitude={}&current_weather=true&hourly={}&daily={}&timezone=auto",
            self.forecast_url, at.latitude, at.longitude, HOURLY_VARIABLES, DAILY_VARIABLES
        );

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let reason = response
                .json::<ApiErrorResponse>()
                .await
                .ok()
                .and_then(|body| body.reason);
            return Err(OpenMeteoError::ApiError(match reason {
                Some(reason) => format!("Forecast returned status {status}: {reason}"),
                None => format!("Forecast returned status {status}"),
            }));
        }

        Ok(response.json().await?)
    }
}
