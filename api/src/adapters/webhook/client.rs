//! Automation webhook client implementation

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::domain::ports::{ChartNotification, ChartNotifier};
use crate::error::WebhookError;

/// Delivers chart notifications as a JSON POST
pub struct HttpWebhookNotifier {
    http: Client,
    url: Option<String>,
}

impl HttpWebhookNotifier {
    /// `url: None` disables delivery
    pub fn new(url: Option<String>, timeout: Duration) -> Result<Self, WebhookError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, url })
    }

    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<(), WebhookError> {
        let status = response.status();

        if status.is_success() {
            Ok(())
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(WebhookError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[async_trait]
impl ChartNotifier for HttpWebhookNotifier {
    async fn notify(&self, notification: &ChartNotification) -> Result<(), WebhookError> {
        let Some(url) = &self.url else {
            tracing::debug!("Webhook disabled, not sending run {}", notification.run_id);
            return Ok(());
        };

        tracing::info!(
            "Sending {} chart link(s) for run {} to webhook",
            notification.charts.len(),
            notification.run_id
        );

        let response = self.http.post(url).json(notification).send().await?;
        self.handle_empty_response(response).await
    }

    fn is_enabled(&self) -> bool {
        self.url.is_some()
    }
}
