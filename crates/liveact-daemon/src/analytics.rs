//! Analytics event sink boundary.

use async_trait::async_trait;
use serde_json::Value;

/// Sink for custom analytics events.
#[async_trait]
pub trait AnalyticsSink: Send + Sync {
    async fn log_custom(&self, event: &str, data: Value) -> anyhow::Result<()>;
}

/// Stand-in sink used by the daemon binary: logs each event.
#[derive(Debug, Default)]
pub struct LoggingAnalytics;

#[async_trait]
impl AnalyticsSink for LoggingAnalytics {
    async fn log_custom(&self, event: &str, data: Value) -> anyhow::Result<()> {
        tracing::info!(event = %event, data = %data, "analytics event");
        Ok(())
    }
}
