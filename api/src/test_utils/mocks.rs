//! Mock implementations of port traits
//!
//! These are in-memory implementations that can be configured for testing.
//! They record what they were asked to do so tests can verify behavior.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::domain::entities::{CategorySeries, ChartKind, MaintenanceTable};
use crate::domain::ports::{ChartNotification, ChartNotifier, ChartRenderer, RecordSource};
use crate::error::{ChartError, SourceError, WebhookError};

// ============================================================================
// In-Memory Record Source
// ============================================================================

type SourceFailure = Box<dyn Fn() -> SourceError + Send + Sync>;

pub struct InMemoryRecordSource {
    table: MaintenanceTable,
    failure: Option<SourceFailure>,
}

impl InMemoryRecordSource {
    pub fn new(table: MaintenanceTable) -> Self {
        Self {
            table,
            failure: None,
        }
    }

    /// A source whose every load fails with the produced error
    pub fn failing(error: impl Fn() -> SourceError + Send + Sync + 'static) -> Self {
        Self {
            table: MaintenanceTable::default(),
            failure: Some(Box::new(error)),
        }
    }
}

impl RecordSource for InMemoryRecordSource {
    fn load(&self) -> Result<MaintenanceTable, SourceError> {
        match &self.failure {
            Some(error) => Err(error()),
            None => Ok(self.table.clone()),
        }
    }

    fn describe(&self) -> String {
        "in-memory records".to_string()
    }
}

// ============================================================================
// Recording Renderer
// ============================================================================

#[derive(Default)]
pub struct RecordingRenderer {
    rendered: RwLock<Vec<(ChartKind, PathBuf, CategorySeries)>>,
    fail_on: Option<ChartKind>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail with a render error when asked to draw `kind`
    pub fn failing_on(kind: ChartKind) -> Self {
        Self {
            fail_on: Some(kind),
            ..Self::default()
        }
    }

    pub fn rendered(&self) -> Vec<(ChartKind, PathBuf, CategorySeries)> {
        self.rendered.read().unwrap().clone()
    }
}

impl ChartRenderer for RecordingRenderer {
    fn render(
        &self,
        kind: ChartKind,
        series: &CategorySeries,
        path: &Path,
    ) -> Result<(), ChartError> {
        if self.fail_on == Some(kind) {
            return Err(ChartError::Render {
                file: path.display().to_string(),
                message: "simulated failure".to_string(),
            });
        }
        self.rendered
            .write()
            .unwrap()
            .push((kind, path.to_path_buf(), series.clone()));
        Ok(())
    }
}

// ============================================================================
// Recording Notifier
// ============================================================================

pub struct RecordingNotifier {
    sent: RwLock<Vec<ChartNotification>>,
    enabled: bool,
    fail_status: Option<u16>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self {
            sent: RwLock::new(Vec::new()),
            enabled: true,
            fail_status: None,
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::new()
        }
    }

    /// Reject every notification as if the webhook answered `status`
    pub fn failing(status: u16) -> Self {
        Self {
            fail_status: Some(status),
            ..Self::new()
        }
    }

    pub fn sent(&self) -> Vec<ChartNotification> {
        self.sent.read().unwrap().clone()
    }
}

#[async_trait]
impl ChartNotifier for RecordingNotifier {
    async fn notify(&self, notification: &ChartNotification) -> Result<(), WebhookError> {
        if let Some(status) = self.fail_status {
            return Err(WebhookError::Api {
                status,
                message: "simulated failure".to_string(),
            });
        }
        self.sent.write().unwrap().push(notification.clone());
        Ok(())
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}
