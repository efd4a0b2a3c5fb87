use std::sync::Arc;

use chrono::{DateTime, Utc};
use weatherboard_weather::WeatherService;

use crate::store::WidgetStore;

/// Shared application state passed to all route handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn WidgetStore>,
    pub weather: Arc<WeatherService>,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(store: Arc<dyn WidgetStore>, weather: WeatherService) -> Self {
        Self {
            store,
            weather: Arc::new(weather),
            started_at: Utc::now(),
        }
    }
}
