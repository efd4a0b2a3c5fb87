use open_meteo_client::ForecastResponse;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::alignment::pick_hourly_index;
use crate::error::WeatherError;

/// Flattened weather for one location
///
/// Current-observation fields are always present. Hourly-derived fields are
/// `None` (and omitted from JSON) when no hourly slot lines up with the
/// observation, which keeps "unknown" apart from a genuine zero reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct WeatherRecord {
    /// Local observation time, e.g. `2025-08-01T18:30`
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub time: Option<String>,
    /// °C
    pub temperature: f64,
    /// km/h
    pub windspeed: f64,
    /// Degrees
    pub winddirection: f64,
    /// WMO weather interpretation code
    pub weathercode: i32,
    /// 1 during daylight, 0 at night
    pub is_day: i32,

    /// %
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub humidity: Option<f64>,
    /// %
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub cloudcover: Option<f64>,
    /// mm
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub precipitation: Option<f64>,
    /// %
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub precipitation_probability: Option<f64>,

    /// Local ISO time of today's sunrise
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub sunrise: Option<String>,
    /// Local ISO time of today's sunset
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub sunset: Option<String>,
    /// IANA zone name, e.g. `Asia/Tokyo`
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub timezone: Option<String>,
}

fn value_at(series: &[Option<f64>], idx: Option<usize>) -> Option<f64> {
    series.get(idx?).copied().flatten()
}

impl WeatherRecord {
    /// Flatten a forecast response
    ///
    /// Fails with [`WeatherError::Unavailable`] when the response carries no
    /// current observation.
    pub fn from_forecast(forecast: ForecastResponse) -> Result<Self, WeatherError> {
        let current = forecast.current_weather.ok_or(WeatherError::Unavailable)?;
        let hourly = forecast.hourly.unwrap_or_default();
        let daily = forecast.daily.unwrap_or_default();

        let idx = pick_hourly_index(current.time.as_deref(), &hourly.time);

        Ok(Self {
            time: current.time,
            temperature: current.temperature,
            windspeed: current.windspeed,
            winddirection: current.winddirection,
            weathercode: current.weathercode,
            is_day: current.is_day,

            humidity: value_at(&hourly.relative_humidity_2m, idx),
            cloudcover: value_at(&hourly.cloudcover, idx),
            precipitation: value_at(&hourly.precipitation, idx),
            precipitation_probability: value_at(&hourly.precipitation_probability, idx),

            // Index 0 is today
            sunrise: daily.sunrise.into_iter().next(),
            sunset: daily.sunset.into_iter().next(),
            timezone: forecast.timezone,
        })
    }
}
