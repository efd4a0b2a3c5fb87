//! Weather normalization for Weatherboard
//!
//! Turns a free-text location into a flat [`WeatherRecord`]: geocode the
//! name, fetch the forecast, line the hourly series up with the current
//! observation, and keep the result in a short-lived cache.

mod alignment;
mod error;
mod record;
mod service;

pub use alignment::pick_hourly_index;
pub use error::{Result, WeatherError};
pub use record::WeatherRecord;
pub use service::{cache_key, WeatherService, DEFAULT_CACHE_TTL};
