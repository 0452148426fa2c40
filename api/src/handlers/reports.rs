//! Report handlers
//!
//! Endpoints to generate the maintenance charts and serve the images.

use std::path::Path as FsPath;

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::app::{GenerationReport, SkippedChart};
use crate::domain::entities::ChartKind;
use crate::error::AppError;
use crate::AppState;

const WELCOME_MESSAGE: &str =
    "Welcome to the AutoMaint Reports API. Use /generate-charts to create reports.";

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// A generated chart and where to fetch it
#[derive(Serialize)]
pub struct ChartLink {
    pub kind: ChartKind,
    pub file: String,
    pub url: String,
    pub bars: usize,
}

#[derive(Serialize)]
pub struct GenerateResponse {
    pub message: String,
    pub run_id: String,
    pub generated: Vec<ChartLink>,
    pub skipped: Vec<SkippedChart>,
    pub notified: bool,
    pub generated_at: String,
}

impl GenerateResponse {
    fn new(report: &GenerationReport, state: &AppState, notified: bool) -> Self {
        let service = &state.report_service;
        let message = if report.is_complete() {
            format!(
                "Charts generated successfully in the '{}' directory.",
                service.report_dir().display()
            )
        } else {
            format!(
                "Generated {} of {} charts; see 'skipped' for details.",
                report.generated.len(),
                ChartKind::ALL.len()
            )
        };

        Self {
            message,
            run_id: report.run_id.to_string(),
            generated: report
                .generated
                .iter()
                .map(|chart| ChartLink {
                    kind: chart.kind,
                    file: chart.file.clone(),
                    url: service.chart_url(&chart.file),
                    bars: chart.bars,
                })
                .collect(),
            skipped: report.skipped.clone(),
            notified,
            generated_at: report.generated_at.to_rfc3339(),
        }
    }
}

/// GET /
pub async fn welcome() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: WELCOME_MESSAGE.to_string(),
    })
}

/// POST /generate-charts
///
/// Renders all charts from the configured spreadsheet, then forwards the
/// chart links to the automation webhook.
pub async fn generate_charts(
    State(state): State<AppState>,
) -> Result<Json<GenerateResponse>, AppError> {
    let service = state.report_service.clone();
    let report = tokio::task::spawn_blocking(move || service.render_charts())
        .await
        .map_err(|e| AppError::Internal(format!("chart generation task failed: {}", e)))??;

    let notified = state.report_service.notify(&report).await?;

    Ok(Json(GenerateResponse::new(&report, &state, notified)))
}

/// GET /report/:filename
///
/// Serve a previously generated report file.
pub async fn get_report(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response, AppError> {
    let not_found = || AppError::NotFound("File not found".to_string());

    let path = state
        .report_service
        .chart_path(&filename)
        .ok_or_else(not_found)?;

    let bytes = tokio::fs::read(&path).await.map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => not_found(),
        _ => AppError::Internal(format!("cannot read '{}': {}", path.display(), e)),
    })?;

    Ok(([(header::CONTENT_TYPE, content_type_for(&path))], bytes).into_response())
}

fn content_type_for(path: &FsPath) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("svg") => "image/svg+xml",
        Some("gif") => "image/gif",
        _ => "application/octet-stream",
    }
}
