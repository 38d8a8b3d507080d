//! Error types for the daemon runtime.

use thiserror::Error;

use liveact_core::DecodeError;

/// Failure while persisting or reading a content state record.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("content serialization failed: {0}")]
    Serde(#[from] serde_json::Error),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Failure while handling one inbound push event. Caught and logged at the
/// receiver boundary; never propagated to the delivery source.
#[derive(Debug, Error)]
pub enum HandlingError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("remote registration failed: {0}")]
    Remote(#[source] anyhow::Error),

    #[error("analytics event failed: {0}")]
    Analytics(#[source] anyhow::Error),
}
