use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use ttl_cache::CacheStats;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    uptime_secs: i64,
    /// Weather cache counters
    cache: CacheStats,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        uptime_secs: (Utc::now() - state.started_at).num_seconds(),
        cache: state.weather.cache_stats(),
    })
}
