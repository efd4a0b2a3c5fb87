use std::env;
use std::time::Duration;

use open_meteo_client::ClientConfig;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com";
const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com";
const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 10;
const DEFAULT_WEATHER_CACHE_TTL_SECS: u64 = 300;
const USER_AGENT: &str = "Weatherboard/0.1";

/// Application configuration parsed from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Postgres connection string; widgets live in memory when unset
    pub database_url: Option<String>,
    pub cors_origins: Vec<String>,
    pub geocoding_url: String,
    pub forecast_url: String,
    pub upstream_timeout: Duration,
    pub weather_cache_ttl: Duration,
}

impl Config {
    /// Parse configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        let port = var("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let database_url = var("DATABASE_URL").filter(|url| !url.trim().is_empty());

        let cors_origins = var("CORS_ORIGINS")
            .map(|s| s.split(',').map(|o| o.trim().to_string()).collect())
            .unwrap_or_else(|| {
                vec![
                    "http://localhost:3000".to_string(),
                    "http://localhost:5173".to_string(),
                ]
            });

        let geocoding_url =
            var("GEOCODING_URL").unwrap_or_else(|| DEFAULT_GEOCODING_URL.to_string());

        let forecast_url = var("FORECAST_URL").unwrap_or_else(|| DEFAULT_FORECAST_URL.to_string());

        let upstream_timeout = Duration::from_secs(
            var("UPSTREAM_TIMEOUT_SECS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_UPSTREAM_TIMEOUT_SECS),
        );

        let weather_cache_ttl = Duration::from_secs(
            var("WEATHER_CACHE_TTL_SECS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_WEATHER_CACHE_TTL_SECS),
        );

        Self {
            port,
            database_url,
            cors_origins,
            geocoding_url,
            forecast_url,
            upstream_timeout,
            weather_cache_ttl,
        }
    }

    /// Settings for the Open-Meteo client
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            geocoding_url: self.geocoding_url.clone(),
            forecast_url: self.forecast_url.clone(),
            user_agent: USER_AGENT.to_string(),
            timeout: self.upstream_timeout,
        }
    }
}
