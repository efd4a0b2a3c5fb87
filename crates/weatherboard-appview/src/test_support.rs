//! Helpers shared by route tests

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use open_meteo_client::{ClientConfig, OpenMeteoClient};
use serde_json::{json, Value};
use tower::ServiceExt;
use weatherboard_weather::WeatherService;
use wiremock::matchers::{path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::state::AppState;
use crate::store::WidgetStore;

/// App state whose weather lookups go to `server`
pub fn state_with(store: Arc<dyn WidgetStore>, server: &MockServer) -> AppState {
    let client = OpenMeteoClient::with_config(ClientConfig {
        geocoding_url: server.uri(),
        forecast_url: server.uri(),
        ..ClientConfig::default()
    })
    .unwrap();
    AppState::new(store, WeatherService::new(client))
}

/// Serve geocoding and a forecast for `name` at the given coordinates
pub async fn mount_city(server: &MockServer, name: &str, latitude: f64, longitude: f64) {
    Mock::given(path("/v1/search"))
        .and(query_param("name", name))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{ "name": name, "latitude": latitude, "longitude": longitude }]
        })))
        .mount(server)
        .await;

    Mock::given(path("/v1/forecast"))
        .and(query_param("latitude", latitude.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "timezone": "UTC",
            "current_weather": {
                "time": "2025-08-01T12:00",
                "temperature": 21.5,
                "windspeed": 12.0,
                "winddirection": 270,
                "weathercode": 3,
                "is_day": 1
            },
            "hourly": {
                "time": ["2025-08-01T11:00", "2025-08-01T12:00"],
                "relative_humidity_2m": [60, 58],
                "cloudcover": [75, 80],
                "precipitation": [0.0, 0.1],
                "precipitation_probability": [10, 20]
            },
            "daily": {
                "sunrise": ["2025-08-01T05:20"],
                "sunset": ["2025-08-01T21:05"]
            }
        })))
        .mount(server)
        .await;
}

/// Geocoding for `name` finds nothing
pub async fn mount_unknown_city(server: &MockServer, name: &str) {
    Mock::given(path("/v1/search"))
        .and(query_param("name", name))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(server)
        .await;
}

/// Send one request and decode the JSON body (`Null` when empty)
pub async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap_or(Value::Null)
    };
    (status, json)
}
