//! Open-Meteo Client
//!
//! A small client for the [Open-Meteo](https://open-meteo.com/) geocoding and
//! forecast APIs. Geocoding results are cached with moka so repeated lookups
//! of the same place name skip the network.

mod client;
mod error;
mod types;

pub use client::{ClientConfig, OpenMeteoClient};
pub use error::{OpenMeteoError, Result};
pub use types::{Coordinates, CurrentWeather, DailySeries, ForecastResponse, HourlySeries};
