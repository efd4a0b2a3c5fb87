//! Error types for weather lookups

use std::fmt;

use open_meteo_client::OpenMeteoError;

#[derive(Debug)]
pub enum WeatherError {
    /// The geocoder has no match for the location
    LocationNotFound(String),
    /// The forecast response has no current observation
    Unavailable,
    Upstream(OpenMeteoError),
}

impl fmt::Display for WeatherError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeatherError::LocationNotFound(location) => {
                write!(f, "Location '{}' not found", location)
            }
            WeatherError::Unavailable => write!(f, "Weather data not available"),
            WeatherError::Upstream(err) => write!(f, "Weather service error: {}", err),
        }
    }
}

impl std::error::Error for WeatherError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WeatherError::Upstream(err) => Some(err),
            _ => None,
        }
    }
}

impl From<OpenMeteoError> for WeatherError {
    fn from(err: OpenMeteoError) -> Self {
        WeatherError::Upstream(err)
    }
}

pub type Result<T> = std::result::Result<T, WeatherError>;
