//! Unified error types for the AutoMaint Reports API
//!
//! This module defines error types for each layer:
//! - `SourceError`: Spreadsheet loading errors
//! - `ChartError`: Chart rendering errors
//! - `WebhookError`: Automation webhook client errors
//! - `AppError`: Application layer errors (wraps the others for HTTP responses)

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Spreadsheet source errors
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("The file '{0}' was not found")]
    NotFound(String),

    #[error("Could not read '{path}': {reason}")]
    Open { path: String, reason: String },

    #[error("Worksheet not found: {0}")]
    SheetMissing(String),

    #[error("Spreadsheet has no header row")]
    EmptySheet,

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("Unsupported spreadsheet format: {0}")]
    UnsupportedFormat(String),
}

impl SourceError {
    /// The input could not be reached at all (as opposed to being malformed)
    pub fn is_unavailable(&self) -> bool {
        matches!(self, SourceError::NotFound(_) | SourceError::Open { .. })
    }
}

/// Chart rendering errors
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("No data to plot for '{0}'")]
    EmptySeries(String),

    #[error("Failed to render '{file}': {message}")]
    Render { file: String, message: String },
}

/// Automation webhook client errors
#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Webhook returned {status}: {message}")]
    Api { status: u16, message: String },
}

/// Application layer errors - used by HTTP handlers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Source(#[from] SourceError),

    #[error("{0}")]
    Chart(#[from] ChartError),

    #[error("{0}")]
    Webhook(#[from] WebhookError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body for JSON responses
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::Source(e) => {
                tracing::error!("Chart generation failed: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error generating charts",
                    Some(e.to_string()),
                )
            }
            AppError::Chart(e) => {
                tracing::error!("Chart generation failed: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error generating charts",
                    Some(e.to_string()),
                )
            }
            AppError::Webhook(e) => {
                tracing::error!("Webhook error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error notifying webhook",
                    Some(e.to_string()),
                )
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "Not found", Some(msg.clone())),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error.to_string(),
            details,
        });

        (status, body).into_response()
    }
}
