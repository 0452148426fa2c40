//! Chart notifier port trait
//!
//! Hands the links of freshly generated charts to an external automation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::error::WebhookError;

/// Payload announcing a generation run
#[derive(Debug, Clone, Serialize)]
pub struct ChartNotification {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    /// Link key -> public chart URL
    pub charts: BTreeMap<String, String>,
}

#[async_trait]
pub trait ChartNotifier: Send + Sync {
    /// Deliver the notification
    async fn notify(&self, notification: &ChartNotification) -> Result<(), WebhookError>;

    /// Whether there is anywhere to deliver to
    fn is_enabled(&self) -> bool {
        true
    }
}
