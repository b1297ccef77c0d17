//! Fatal batch errors. Any of these aborts the whole batch.

use crate::http::TransportError;

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// Request for `entity` never got an HTTP response.
    #[error("request for {entity} failed: {source}")]
    Transport {
        entity: String,
        #[source]
        source: TransportError,
    },
    /// Status other than 200 or 429.
    #[error("unexpected HTTP status {status} for {entity}: {body}")]
    UnexpectedStatus {
        entity: String,
        status: u32,
        body: String,
    },
    /// 200 response whose body is not JSON.
    #[error("invalid JSON body for {entity}: {source}")]
    InvalidBody {
        entity: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid service URL '{base}': {reason}")]
    InvalidUrl { base: String, reason: String },
    /// A lookup worker panicked or was cancelled.
    #[error("lookup task join: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl LookupError {
    /// Indicator value the error belongs to, if it is tied to one request.
    pub fn entity(&self) -> Option<&str> {
        match self {
            LookupError::Transport { entity, .. }
            | LookupError::UnexpectedStatus { entity, .. }
            | LookupError::InvalidBody { entity, .. } => Some(entity),
            LookupError::InvalidUrl { .. } | LookupError::Task(_) => None,
        }
    }
}
