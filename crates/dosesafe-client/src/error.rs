use std::path::PathBuf;
use std::time::Duration;

use dosesafe_core::ValidationError;

use crate::Endpoint;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Cannot connect to {}. Please check if the backend is running.", .endpoint.service())]
    Connect {
        endpoint: Endpoint,
        #[source]
        source: reqwest::Error,
    },

    #[error("The {} did not respond within {}s", .endpoint.service(), .timeout.as_secs())]
    Timeout { endpoint: Endpoint, timeout: Duration },

    /// Non-2xx response; `message` is the server's `error` field when present
    #[error("{message}")]
    Status {
        endpoint: Endpoint,
        status: u16,
        message: String,
    },

    #[error("The {} returned an unreadable response: {source}", .endpoint.service())]
    Decode {
        endpoint: Endpoint,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request to the {} failed: {source}", .endpoint.service())]
    Request {
        endpoint: Endpoint,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to read {}: {source}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error(transparent)]
    History(#[from] dosesafe_core::Error),
}

impl ClientError {
    /// Sort a transport error into connect / timeout / decode / other
    pub(crate) fn from_transport(endpoint: Endpoint, timeout: Duration, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            ClientError::Timeout { endpoint, timeout }
        } else if source.is_connect() {
            ClientError::Connect { endpoint, source }
        } else if source.is_decode() {
            ClientError::Decode { endpoint, source }
        } else {
            ClientError::Request { endpoint, source }
        }
    }

    /// True when no usable response came back at all
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ClientError::Connect { .. } | ClientError::Timeout { .. } | ClientError::Request { .. }
        )
    }
}
