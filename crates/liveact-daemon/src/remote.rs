//! Remote push backend registration boundary.

use async_trait::async_trait;

use liveact_core::ActivityKind;

/// Registration API on the push backend. While a kind is registered,
/// server-initiated updates for it keep arriving.
#[async_trait]
pub trait RemoteRegistration: Send + Sync {
    /// Start receiving updates for a kind.
    async fn register(&self, kind: ActivityKind) -> anyhow::Result<()>;

    /// Stop receiving updates for a kind.
    async fn end(&self, kind: ActivityKind) -> anyhow::Result<()>;
}

/// Stand-in backend used by the daemon binary: logs each call.
#[derive(Debug, Default)]
pub struct LoggingRegistration;

#[async_trait]
impl RemoteRegistration for LoggingRegistration {
    async fn register(&self, kind: ActivityKind) -> anyhow::Result<()> {
        tracing::info!(kind = %kind, "registered live activity on push backend");
        Ok(())
    }

    async fn end(&self, kind: ActivityKind) -> anyhow::Result<()> {
        tracing::info!(kind = %kind, "ended live activity on push backend");
        Ok(())
    }
}
