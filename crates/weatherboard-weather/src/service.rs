use std::time::Duration;

use open_meteo_client::OpenMeteoClient;
use tracing::debug;
use ttl_cache::{CacheStats, TtlCache};

use crate::error::{Result, WeatherError};
use crate::record::WeatherRecord;

/// How long a flattened record is served from cache
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// Cache key for a location: trimmed and lower-cased
pub fn cache_key(location: &str) -> String {
    location.trim().to_lowercase()
}

/// Resolves locations to flattened weather, with a write-through TTL cache
pub struct WeatherService {
    client: OpenMeteoClient,
    cache: TtlCache<String, WeatherRecord>,
    ttl: Duration,
}

impl WeatherService {
    pub fn new(client: OpenMeteoClient) -> Self {
        Self::with_cache(client, TtlCache::new(), DEFAULT_CACHE_TTL)
    }

    /// Build with an explicit cache (and therefore clock) and TTL
    pub fn with_cache(
        client: OpenMeteoClient,
        cache: TtlCache<String, WeatherRecord>,
        ttl: Duration,
    ) -> Self {
        Self { client, cache, ttl }
    }

    /// Current weather for a free-text location
    ///
    /// Served from cache when a fresh entry exists for the normalized key.
    /// Failures are never cached.
    pub async fn get_weather(&self, location: &str) -> Result<WeatherRecord> {
        let key = cache_key(location);
        if let Some(cached) = self.cache.get(&key) {
            debug!(location = %key, "Weather cache hit");
            return Ok(cached);
        }

        let coords = self
            .client
            .geocode(location)
            .await?
            .ok_or_else(|| WeatherError::LocationNotFound(location.trim().to_string()))?;

        let forecast = self.client.forecast(coords).await?;
        let record = WeatherRecord::from_forecast(forecast)?;

        debug!(
            location = %key,
            temperature = record.temperature,
            "Fetched weather"
        );

        self.cache.set(key, record.clone(), self.ttl);
        Ok(record)
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}
