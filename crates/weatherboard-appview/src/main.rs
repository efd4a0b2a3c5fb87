//! Weatherboard - city weather widgets over a small REST API
//!
//! Serves the widget API, a health endpoint and the browser dashboard.
//! Widgets persist to PostgreSQL when `DATABASE_URL` is set and to process
//! memory otherwise.

mod config;
mod error;
mod routes;
mod state;
mod store;
#[cfg(test)]
mod test_support;

use std::sync::Arc;

use axum::http::{header, Method};
use open_meteo_client::OpenMeteoClient;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};
use tracing_subscriber::{prelude::*, EnvFilter};
use ttl_cache::TtlCache;
use weatherboard_weather::WeatherService;

use config::Config;
use state::AppState;
use store::{MemoryWidgetStore, PgWidgetStore, WidgetStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let env_filter =
        EnvFilter::from_default_env().add_directive("weatherboard_appview=info".parse()?);

    // JSON output for Cloud Logging when LOG_FORMAT=json
    if std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false)
    {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_stackdriver::layer())
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let config = Config::from_env();
    info!(port = config.port, "Starting weatherboard-appview");

    let client = OpenMeteoClient::with_config(config.client_config())?;
    let weather = WeatherService::with_cache(client, TtlCache::new(), config.weather_cache_ttl);

    let store: Arc<dyn WidgetStore> = match &config.database_url {
        Some(url) => {
            let pool = PgPoolOptions::new()
                .max_connections(10)
                .connect(url)
                .await?;
            weatherboard_db::migrate::run(&pool).await?;
            info!("Connected to database");
            Arc::new(PgWidgetStore::new(pool))
        }
        None => {
            warn!("DATABASE_URL not set, widgets will be kept in memory");
            Arc::new(MemoryWidgetStore::new())
        }
    };

    let cors = if config.cors_origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::DELETE])
            .allow_headers([header::CONTENT_TYPE])
    };

    let app = routes::create_router(AppState::new(store, weather)).layer(cors);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    info!(port = config.port, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "Failed to listen for shutdown signal");
                std::future::pending::<()>().await;
            }
            info!("Shutting down");
        })
        .await?;

    Ok(())
}
