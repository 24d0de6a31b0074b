//! The connection layer: how a finished request reaches the gateway.
//!
//! Submission only depends on the [`Connection`] trait. [`HttpConnection`]
//! is the production implementation; tests substitute their own.

pub mod config;
pub mod errors;
pub mod http;

use std::{collections::BTreeMap, error::Error as StdError};

use async_trait::async_trait;

pub use config::{ConfigError, ConnectionConfig, CredentialConfig};
pub use errors::TransportError;
pub use http::HttpConnection;

/// Header carrying the idempotency key of a request.
pub const REQUEST_ID_HEADER: &str = "X-VPS-REQUEST-ID";

/// A finished request ready for transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayRequest {
    /// Request body without a trailing delimiter.
    pub body: String,
    /// Idempotency key; resubmitting with the same id is safe.
    pub request_id: String,
    /// Out-of-band headers, including client identification.
    pub headers: BTreeMap<String, String>,
}

/// Sends requests to the gateway and returns its raw reply.
#[async_trait]
pub trait Connection: Send {
    /// Failure type of this connection.
    type Error: StdError + Send + Sync + 'static;

    /// Exchange one request for the gateway's raw reply.
    ///
    /// Each call makes at most one round-trip and returns within the
    /// connection's configured timeout.
    ///
    /// # Errors
    /// Returns an error when no reply could be obtained.
    async fn send(&mut self, request: &GatewayRequest) -> Result<String, Self::Error>;

    /// The exact body most recently written to the wire.
    fn last_request(&self) -> Option<&str>;
}
