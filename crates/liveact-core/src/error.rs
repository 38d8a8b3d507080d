//! Error types for payload decoding.

use thiserror::Error;

use crate::types::ActivityKind;

/// A push-delivered update that could not be turned into a typed content
/// state. The boundary drops these; the server resends full state on the
/// next push rather than individual deltas.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("unknown live activity kind: {0:?}")]
    UnknownKind(String),

    #[error("malformed {kind} content payload: {source}")]
    MalformedContent {
        kind: ActivityKind,
        #[source]
        source: serde_json::Error,
    },
}
