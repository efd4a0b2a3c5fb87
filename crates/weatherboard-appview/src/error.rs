use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use ts_rs::TS;
use weatherboard_weather::WeatherError;

use crate::store::StoreError;

/// Machine-readable error code sent alongside every error message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export, export_to = "bindings/")]
pub enum ErrorCode {
    LocationRequired,
    InvalidId,
    LocationNotFound,
    WeatherUnavailable,
    UpstreamError,
    NotFound,
    Internal,
}

/// JSON body of every error response
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ErrorBody {
    pub error: String,
    pub code: ErrorCode,
}

/// Application error type that converts to HTTP responses
#[derive(Debug)]
pub enum AppError {
    LocationRequired,
    InvalidId,
    NotFound(String),
    Weather(WeatherError),
    Store(StoreError),
}

impl AppError {
    fn parts(self) -> (StatusCode, ErrorCode, String) {
        match self {
            AppError::LocationRequired => (
                StatusCode::BAD_REQUEST,
                ErrorCode::LocationRequired,
                "Valid location is required".into(),
            ),
            AppError::InvalidId => (
                StatusCode::BAD_REQUEST,
                ErrorCode::InvalidId,
                "Invalid ID format".into(),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorCode::NotFound, msg),
            AppError::Weather(e) => {
                let code = match &e {
                    WeatherError::LocationNotFound(_) => ErrorCode::LocationNotFound,
                    WeatherError::Unavailable => ErrorCode::WeatherUnavailable,
                    WeatherError::Upstream(_) => ErrorCode::UpstreamError,
                };
                (StatusCode::BAD_REQUEST, code, e.to_string())
            }
            AppError::Store(StoreError::EmptyLocation) => AppError::LocationRequired.parts(),
            AppError::Store(e) => {
                tracing::error!(error = %e, "Widget store error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::Internal,
                    "Internal server error".into(),
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, error) = self.parts();
        (status, axum::Json(ErrorBody { error, code })).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::Store(e)
    }
}

impl From<WeatherError> for AppError {
    fn from(e: WeatherError) -> Self {
        AppError::Weather(e)
    }
}
