//! Failures of the connection layer.

use std::time::Duration;

use thiserror::Error;

use crate::context::{ErrorObject, Severity, result_code};

/// Errors raised while exchanging a request with the gateway.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// The gateway could not be reached.
    #[error("failed to connect to {host}: {message}")]
    Connect {
        /// Host that was dialled.
        host: String,
        /// Underlying failure.
        message: String,
    },
    /// No reply arrived within the configured timeout.
    #[error("no reply within {0:?}")]
    Timeout(Duration),
    /// The configured proxy was rejected or unreachable.
    #[error("proxy {proxy} could not be used: {message}")]
    Proxy {
        /// Proxy address.
        proxy: String,
        /// Underlying failure.
        message: String,
    },
    /// The gateway answered with a non-success status.
    #[error("gateway returned HTTP status {0}")]
    HttpStatus(u16),
    /// The reply body could not be read.
    #[error("failed to read gateway reply: {0}")]
    Body(String),
}

impl TransportError {
    /// Local result code reported for this failure.
    #[must_use]
    pub const fn result_code(&self) -> i32 {
        match self {
            Self::Connect { .. } => result_code::CONNECT_FAILED,
            Self::Timeout(_) => result_code::TIMEOUT,
            Self::Proxy { .. } => result_code::PROXY_FAILED,
            Self::HttpStatus(_) => result_code::HTTP_STATUS,
            Self::Body(_) => result_code::BAD_RESPONSE,
        }
    }

    /// Convert into the fatal context entry recorded by submission.
    #[must_use]
    pub fn to_error_object(&self) -> ErrorObject {
        ErrorObject::new(Severity::Fatal, self.result_code(), self.to_string())
    }
}
