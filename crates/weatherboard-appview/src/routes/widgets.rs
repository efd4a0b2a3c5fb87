use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use ts_rs::TS;
use weatherboard_db::{clean_location, WidgetId, WidgetRow};
use weatherboard_weather::WeatherRecord;

use crate::error::AppError;
use crate::state::AppState;

/// A widget joined with its current weather
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct WidgetResponse {
    pub id: String,
    pub location: String,
    pub created_at: DateTime<Utc>,
    /// When the weather was attached
    pub updated_at: DateTime<Utc>,
    /// `null` when the lookup for this widget failed
    pub weather: Option<WeatherRecord>,
}

impl WidgetResponse {
    fn new(row: WidgetRow, weather: Option<WeatherRecord>) -> Self {
        Self {
            id: row.id,
            location: row.location,
            created_at: row.created_at,
            updated_at: Utc::now(),
            weather,
        }
    }
}

#[derive(Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CreateWidgetRequest {
    #[serde(default)]
    #[ts(optional)]
    location: Option<String>,
}

/// GET /api/widgets
///
/// Lookups run concurrently; one failing city leaves `weather: null` on its
/// own widget and does not fail the listing.
pub async fn list_widgets(
    State(state): State<AppState>,
) -> Result<Json<Vec<WidgetResponse>>, AppError> {
    let rows = state.store.list().await?;

    let widgets = join_all(rows.into_iter().map(|row| {
        let weather = &state.weather;
        async move {
            match weather.get_weather(&row.location).await {
                Ok(record) => WidgetResponse::new(row, Some(record)),
                Err(e) => {
                    warn!(id = %row.id, location = %row.location, error = %e, "Weather lookup failed");
                    WidgetResponse::new(row, None)
                }
            }
        }
    }))
    .await;

    Ok(Json(widgets))
}

/// POST /api/widgets
///
/// The location is checked against the weather service before anything is
/// stored, so an unknown city never becomes a widget.
pub async fn create_widget(
    State(state): State<AppState>,
    body: Result<Json<CreateWidgetRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<WidgetResponse>), AppError> {
    let location = body
        .ok()
        .and_then(|Json(body)| body.location)
        .and_then(|raw| clean_location(&raw).map(str::to_string))
        .ok_or(AppError::LocationRequired)?;

    let weather = state.weather.get_weather(&location).await.map_err(|e| {
        warn!(location = %location, error = %e, "Rejected widget location");
        AppError::Weather(e)
    })?;

    let row = state.store.create(&location).await?;
    info!(id = %row.id, location = %row.location, "Created widget");

    Ok((
        StatusCode::CREATED,
        Json(WidgetResponse::new(row, Some(weather))),
    ))
}

/// DELETE /api/widgets/{id}
pub async fn delete_widget(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = WidgetId::parse(&id).ok_or(AppError::InvalidId)?;

    if !state.store.delete(&id).await? {
        return Err(AppError::NotFound("Widget not found".into()));
    }

    info!(id = %id, "Deleted widget");
    Ok(StatusCode::NO_CONTENT)
}
