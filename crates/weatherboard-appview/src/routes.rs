pub mod dashboard;
pub mod health;
pub mod widgets;

use axum::routing::{delete, get};
use axum::Router;

use crate::state::AppState;

/// Create the HTTP router (without CORS, which depends on configuration)
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Browser UI
        .route("/", get(dashboard::dashboard))
        // Health
        .route("/health", get(health::health))
        // Widgets
        .route(
            "/api/widgets",
            get(widgets::list_widgets).post(widgets::create_widget),
        )
        .route("/api/widgets/{id}", delete(widgets::delete_widget))
        .with_state(state)
}
