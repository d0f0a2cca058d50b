//! Error handling for the weather forecast service
//!
//! Every failure leaving a handler becomes an [`AppError`], rendered as
//! `{"detail": ..., "code": ...}` with a matching status code.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::SeriesError;
use thiserror::Error;

use crate::external::PowerError;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Upstream data errors
    #[error("Data source error: {0}")]
    DataSource(String),

    #[error("{0}")]
    NoData(String),

    // Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    // Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Internal server error")]
    InternalError(#[from] anyhow::Error),
}

/// Error response structure
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
    pub code: String,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::DataSource(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NoData(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) | AppError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::DataSource(_) => "DATA_SOURCE_ERROR",
            AppError::NoData(_) => "NOT_FOUND",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Internal(_) | AppError::InternalError(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            detail: self.to_string(),
            code: self.code().to_string(),
        };

        // Log the error for debugging
        tracing::error!("Error: {:?}", self);

        (status, Json(body)).into_response()
    }
}

impl From<PowerError> for AppError {
    fn from(err: PowerError) -> Self {
        match err {
            PowerError::NoData(inner) => AppError::NoData(inner.to_string()),
            other => AppError::DataSource(other.to_string()),
        }
    }
}

impl From<SeriesError> for AppError {
    fn from(err: SeriesError) -> Self {
        AppError::NoData(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::Internal(format!("Forecast task failed: {}", err))
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
