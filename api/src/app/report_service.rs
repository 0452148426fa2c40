//! Report service
//!
//! Runs the chart pipeline: load the maintenance table once, aggregate it for
//! each chart, render the charts into the report directory and hand the links
//! to the automation webhook.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::aggregations::aggregate;
use crate::domain::entities::{ChartKind, MaintenanceTable};
use crate::domain::ports::{ChartNotification, ChartNotifier, ChartRenderer, RecordSource};
use crate::error::AppError;

/// A chart written during a run
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedChart {
    pub kind: ChartKind,
    pub file: String,
    pub bars: usize,
}

/// A chart that could not be produced because its input was unavailable
#[derive(Debug, Clone, Serialize)]
pub struct SkippedChart {
    pub kind: ChartKind,
    pub file: String,
    pub reason: String,
}

/// Outcome of one generation run
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub generated: Vec<GeneratedChart>,
    pub skipped: Vec<SkippedChart>,
}

impl GenerationReport {
    fn new() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            generated: Vec::new(),
            skipped: Vec::new(),
        }
    }

    /// Every chart was generated
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty() && self.generated.len() == ChartKind::ALL.len()
    }
}

/// Service producing the maintenance report charts
pub struct ReportService<S, R, N>
where
    S: RecordSource,
    R: ChartRenderer,
    N: ChartNotifier,
{
    source: Arc<S>,
    renderer: Arc<R>,
    notifier: Arc<N>,
    report_dir: PathBuf,
    /// Base of the public chart links, without trailing slash
    public_base_url: String,
}

impl<S, R, N> ReportService<S, R, N>
where
    S: RecordSource,
    R: ChartRenderer,
    N: ChartNotifier,
{
    pub fn new(
        source: Arc<S>,
        renderer: Arc<R>,
        notifier: Arc<N>,
        report_dir: PathBuf,
        public_base_url: String,
    ) -> Self {
        Self {
            source,
            renderer,
            notifier,
            report_dir,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn report_dir(&self) -> &Path {
        &self.report_dir
    }

    /// Create the report directory if it does not exist yet
    pub fn ensure_report_dir(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.report_dir)
    }

    /// Generate every chart (blocking).
    ///
    /// Unavailable input is logged and every chart is reported as skipped.
    /// Malformed input and render failures abort the run.
    pub fn render_charts(&self) -> Result<GenerationReport, AppError> {
        let mut report = GenerationReport::new();
        tracing::info!("Generating charts (run {})...", report.run_id);

        self.ensure_report_dir().map_err(|e| {
            AppError::Internal(format!(
                "cannot create report directory '{}': {}",
                self.report_dir.display(),
                e
            ))
        })?;

        let table = match self.source.load() {
            Ok(table) => table,
            Err(e) if e.is_unavailable() => {
                tracing::error!("Cannot read {}: {}", self.source.describe(), e);
                report.skipped = ChartKind::ALL
                    .iter()
                    .map(|kind| SkippedChart {
                        kind: *kind,
                        file: kind.file_name().to_string(),
                        reason: e.to_string(),
                    })
                    .collect();
                return Ok(report);
            }
            Err(e) => return Err(e.into()),
        };
        if table.is_empty() {
            tracing::warn!("{} contains no records", self.source.describe());
        }

        for kind in ChartKind::ALL {
            report.generated.push(self.render_chart(kind, &table)?);
        }

        tracing::info!("Charts generated successfully.");
        Ok(report)
    }

    fn render_chart(
        &self,
        kind: ChartKind,
        table: &MaintenanceTable,
    ) -> Result<GeneratedChart, AppError> {
        let series = aggregate(kind, table);
        let path = self.report_dir.join(kind.file_name());

        self.renderer.render(kind, &series, &path)?;
        tracing::info!("Chart saved successfully to '{}'", path.display());

        Ok(GeneratedChart {
            kind,
            file: kind.file_name().to_string(),
            bars: series.len(),
        })
    }

    /// Public link to a report file
    pub fn chart_url(&self, file_name: &str) -> String {
        format!(
            "{}/report/{}",
            self.public_base_url,
            urlencoding::encode(file_name)
        )
    }

    /// Webhook payload for a run, carrying the link of every chart
    pub fn notification(&self, report: &GenerationReport) -> ChartNotification {
        let charts: BTreeMap<String, String> = ChartKind::ALL
            .iter()
            .map(|kind| (kind.link_key().to_string(), self.chart_url(kind.file_name())))
            .collect();

        ChartNotification {
            run_id: report.run_id,
            generated_at: report.generated_at,
            charts,
        }
    }

    /// Forward the chart links of a run. Returns whether anything was sent.
    pub async fn notify(&self, report: &GenerationReport) -> Result<bool, AppError> {
        if report.generated.is_empty() {
            tracing::warn!("No charts generated in run {}, webhook not called", report.run_id);
            return Ok(false);
        }
        if !self.notifier.is_enabled() {
            tracing::debug!("Webhook not configured, skipping notification");
            return Ok(false);
        }

        self.notifier.notify(&self.notification(report)).await?;
        Ok(true)
    }

    /// Resolve a requested report file to an existing path.
    ///
    /// Only plain file names inside the report directory resolve.
    pub fn chart_path(&self, file_name: &str) -> Option<PathBuf> {
        let is_plain = !file_name.is_empty()
            && !file_name.contains(['/', '\\'])
            && Path::new(file_name).file_name().and_then(|n| n.to_str()) == Some(file_name);
        if !is_plain {
            return None;
        }

        let path = self.report_dir.join(file_name);
        path.is_file().then_some(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ChartError, SourceError};
    use crate::test_utils::{
        sample_table, InMemoryRecordSource, RecordingNotifier, RecordingRenderer,
    };

    type TestService = ReportService<InMemoryRecordSource, RecordingRenderer, RecordingNotifier>;

    fn service_with(
        source: InMemoryRecordSource,
        renderer: RecordingRenderer,
        notifier: RecordingNotifier,
        dir: &Path,
    ) -> (TestService, Arc<RecordingRenderer>, Arc<RecordingNotifier>) {
        let renderer = Arc::new(renderer);
        let notifier = Arc::new(notifier);
        let service = ReportService::new(
            Arc::new(source),
            renderer.clone(),
            notifier.clone(),
            dir.to_path_buf(),
            "http://reports.local/".to_string(),
        );
        (service, renderer, notifier)
    }

    #[test]
    fn renders_all_three_charts() {
        let dir = tempfile::tempdir().unwrap();
        let (service, renderer, _) = service_with(
            InMemoryRecordSource::new(sample_table()),
            RecordingRenderer::new(),
            RecordingNotifier::new(),
            dir.path(),
        );

        let report = service.render_charts().unwrap();

        assert!(report.is_complete());
        assert_eq!(report.generated.len(), 3);
        let rendered = renderer.rendered();
        assert_eq!(
            rendered.iter().map(|(k, _, _)| *k).collect::<Vec<_>>(),
            ChartKind::ALL.to_vec()
        );
        for (kind, path, series) in &rendered {
            assert_eq!(path, &dir.path().join(kind.file_name()));
            assert!(!series.is_empty());
        }
        assert_eq!(report.generated[0].bars, 3);
    }

    #[test]
    fn creates_missing_report_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested").join("report");
        let (service, _, _) = service_with(
            InMemoryRecordSource::new(sample_table()),
            RecordingRenderer::new(),
            RecordingNotifier::new(),
            &nested,
        );

        service.ensure_report_dir().unwrap();
        service.ensure_report_dir().unwrap();
        assert!(nested.is_dir());
        assert_eq!(service.report_dir(), nested.as_path());
    }

    #[test]
    fn unavailable_source_skips_every_chart() {
        let dir = tempfile::tempdir().unwrap();
        let (service, renderer, _) = service_with(
            InMemoryRecordSource::failing(|| SourceError::NotFound("cmms.xlsx".to_string())),
            RecordingRenderer::new(),
            RecordingNotifier::new(),
            dir.path(),
        );

        let report = service.render_charts().unwrap();

        assert!(report.generated.is_empty());
        assert_eq!(report.skipped.len(), 3);
        assert!(report.skipped[0].reason.contains("cmms.xlsx"));
        assert!(!report.is_complete());
        assert!(renderer.rendered().is_empty());
    }

    #[test]
    fn malformed_source_fails_the_run() {
        let dir = tempfile::tempdir().unwrap();
        let (service, _, _) = service_with(
            InMemoryRecordSource::failing(|| SourceError::MissingColumn("CostOfParts".to_string())),
            RecordingRenderer::new(),
            RecordingNotifier::new(),
            dir.path(),
        );

        let err = service.render_charts().unwrap_err();
        assert!(matches!(err, AppError::Source(SourceError::MissingColumn(_))));
    }

    #[test]
    fn render_failure_fails_the_run() {
        let dir = tempfile::tempdir().unwrap();
        let (service, _, _) = service_with(
            InMemoryRecordSource::new(sample_table()),
            RecordingRenderer::failing_on(ChartKind::ProblemFrequency),
            RecordingNotifier::new(),
            dir.path(),
        );

        let err = service.render_charts().unwrap_err();
        assert!(matches!(err, AppError::Chart(ChartError::Render { .. })));
    }

    #[test]
    fn chart_urls_are_encoded() {
        let dir = tempfile::tempdir().unwrap();
        let (service, _, _) = service_with(
            InMemoryRecordSource::new(sample_table()),
            RecordingRenderer::new(),
            RecordingNotifier::new(),
            dir.path(),
        );

        assert_eq!(
            service.chart_url("cost_of_parts_by_asset_type.png"),
            "http://reports.local/report/cost_of_parts_by_asset_type.png"
        );
        assert_eq!(
            service.chart_url("my chart.png"),
            "http://reports.local/report/my%20chart.png"
        );
    }

    #[tokio::test]
    async fn notify_sends_all_three_links() {
        let dir = tempfile::tempdir().unwrap();
        let (service, _, notifier) = service_with(
            InMemoryRecordSource::new(sample_table()),
            RecordingRenderer::new(),
            RecordingNotifier::new(),
            dir.path(),
        );

        let report = service.render_charts().unwrap();
        assert!(service.notify(&report).await.unwrap());

        let sent = notifier.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].run_id, report.run_id);
        assert_eq!(sent[0].charts.len(), 3);
        assert_eq!(
            sent[0].charts.get("average_repair_time").map(String::as_str),
            Some("http://reports.local/report/average_repair_time_by_asset_type.png")
        );
    }

    #[tokio::test]
    async fn notify_skipped_without_charts() {
        let dir = tempfile::tempdir().unwrap();
        let (service, _, notifier) = service_with(
            InMemoryRecordSource::failing(|| SourceError::NotFound("cmms.xlsx".to_string())),
            RecordingRenderer::new(),
            RecordingNotifier::new(),
            dir.path(),
        );

        let report = service.render_charts().unwrap();
        assert!(!service.notify(&report).await.unwrap());
        assert!(notifier.sent().is_empty());
    }

    #[tokio::test]
    async fn notify_skipped_when_disabled() {
        let dir = tempfile::tempdir().unwrap();
        let (service, _, notifier) = service_with(
            InMemoryRecordSource::new(sample_table()),
            RecordingRenderer::new(),
            RecordingNotifier::disabled(),
            dir.path(),
        );

        let report = service.render_charts().unwrap();
        assert!(!service.notify(&report).await.unwrap());
        assert!(notifier.sent().is_empty());
    }

    #[tokio::test]
    async fn notify_failure_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let (service, _, _) = service_with(
            InMemoryRecordSource::new(sample_table()),
            RecordingRenderer::new(),
            RecordingNotifier::failing(500),
            dir.path(),
        );

        let report = service.render_charts().unwrap();
        let err = service.notify(&report).await.unwrap_err();
        assert!(matches!(err, AppError::Webhook(_)));
    }

    #[test]
    fn chart_path_only_resolves_existing_plain_names() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("chart.png"), b"png").unwrap();
        let (service, _, _) = service_with(
            InMemoryRecordSource::new(sample_table()),
            RecordingRenderer::new(),
            RecordingNotifier::new(),
            dir.path(),
        );

        assert_eq!(
            service.chart_path("chart.png"),
            Some(dir.path().join("chart.png"))
        );
        assert_eq!(service.chart_path("missing.png"), None);
        assert_eq!(service.chart_path(""), None);
        assert_eq!(service.chart_path(".."), None);
        assert_eq!(service.chart_path("../secret.txt"), None);
        assert_eq!(service.chart_path("..\\secret.txt"), None);
    }
}
