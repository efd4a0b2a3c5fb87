use serde::Deserialize;

/// A geocoded point
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GeocodingResponse {
    #[serde(default)]
    pub(crate) results: Vec<Coordinates>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorResponse {
    pub(crate) reason: Option<String>,
}

/// Forecast payload as returned by `/v1/forecast`
///
/// Only the blocks requested by [`crate::OpenMeteoClient::forecast`] are
/// modelled. Every block is optional so the caller decides which absences
/// are fatal.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ForecastResponse {
    pub timezone: Option<String>,
    pub current_weather: Option<CurrentWeather>,
    pub hourly: Option<HourlySeries>,
    pub daily: Option<DailySeries>,
}

/// The `current_weather` block
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CurrentWeather {
    /// Local observation time, e.g. `2025-08-01T18:30`
    pub time: Option<String>,
    pub temperature: f64,
    pub windspeed: f64,
    pub winddirection: f64,
    pub weathercode: i32,
    pub is_day: i32,
}

/// Hourly series; value arrays are parallel to `time` and may contain nulls
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HourlySeries {
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(default)]
    pub relative_humidity_2m: Vec<Option<f64>>,
    #[serde(default, alias = "cloud_cover")]
    pub cloudcover: Vec<Option<f64>>,
    #[serde(default)]
    pub precipitation: Vec<Option<f64>>,
    #[serde(default)]
    pub precipitation_probability: Vec<Option<f64>>,
}

/// Daily series, one entry per forecast day starting today
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DailySeries {
    #[serde(default)]
    pub sunrise: Vec<String>,
    #[serde(default)]
    pub sunset: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geocoding_response_without_results() {
        let data: GeocodingResponse =
            serde_json::from_str(r#"{"generationtime_ms": 0.5}"#).unwrap();
        assert!(data.results.is_empty());
    }

    #[test]
    fn test_geocoding_response_ignores_extra_fields() {
        let data: GeocodingResponse = serde_json::from_str(
            r#"{"results":[{"id":2950159,"name":"Berlin","latitude":52.52437,"longitude":13.41053,"country":"Germany"}]}"#,
        )
        .unwrap();
        assert_eq!(
            data.results[0],
            Coordinates {
                latitude: 52.52437,
                longitude: 13.41053
            }
        );
    }

    #[test]
    fn test_forecast_response_with_null_hourly_values() {
        let data: ForecastResponse = serde_json::from_str(
            r#"{
                "timezone": "Europe/Berlin",
                "current_weather": {
                    "time": "2025-08-01T18:30",
                    "temperature": 21.4,
                    "windspeed": 11.2,
                    "winddirection": 250,
                    "weathercode": 3,
                    "is_day": 1
                },
                "hourly": {
                    "time": ["2025-08-01T18:00", "2025-08-01T19:00"],
                    "relative_humidity_2m": [55, null],
                    "cloudcover": [80, 90],
                    "precipitation": [0.0, 0.1],
                    "precipitation_probability": [10, 20]
                },
                "daily": {
                    "sunrise": ["2025-08-01T05:25"],
                    "sunset": ["2025-08-01T21:02"]
                }
            }"#,
        )
        .unwrap();

        let hourly = data.hourly.unwrap();
        assert_eq!(hourly.relative_humidity_2m, vec![Some(55.0), None]);
        assert_eq!(data.current_weather.unwrap().winddirection, 250.0);
        assert_eq!(data.daily.unwrap().sunset[0], "2025-08-01T21:02");
    }

    #[test]
    fn test_forecast_response_accepts_cloud_cover_alias() {
        let data: HourlySeries =
            serde_json::from_str(r#"{"time":["2025-08-01T18:00"],"cloud_cover":[42]}"#).unwrap();
        assert_eq!(data.cloudcover, vec![Some(42.0)]);
    }

    #[test]
    fn test_forecast_response_without_current_block() {
        let data: ForecastResponse =
            serde_json::from_str(r#"{"timezone":"GMT","hourly":{"time":[]}}"#).unwrap();
        assert!(data.current_weather.is_none());
    }
}
