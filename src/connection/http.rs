//! HTTPS transport to the gateway.

use async_trait::async_trait;
use reqwest::{Client, Proxy, header::CONTENT_TYPE};
use tracing::{debug, warn};

use super::{Connection, ConnectionConfig, GatewayRequest, REQUEST_ID_HEADER, TransportError};

/// Content type of name/value-pair bodies.
pub const CONTENT_TYPE_NVP: &str = "text/namevalue";
/// Header telling the gateway how long the client will wait, in seconds.
pub const CLIENT_TIMEOUT_HEADER: &str = "X-VPS-CLIENT-TIMEOUT";

/// Posts requests to the gateway over HTTP(S).
#[derive(Debug)]
pub struct HttpConnection {
    client: Client,
    config: ConnectionConfig,
    last_request: Option<String>,
}

impl HttpConnection {
    /// Build a connection from validated configuration.
    ///
    /// # Errors
    /// Returns [`TransportError::Proxy`] if the proxy address is unusable,
    /// or [`TransportError::Connect`] if the HTTP client cannot be built.
    pub fn new(config: ConnectionConfig) -> Result<Self, TransportError> {
        let mut builder = Client::builder().timeout(config.timeout());
        builder = match config.proxy_url() {
            Some(url) => {
                let mut proxy = Proxy::all(&url).map_err(|err| TransportError::Proxy {
                    proxy: url.clone(),
                    message: err.to_string(),
                })?;
                if let Some(user) = &config.proxy_user {
                    proxy = proxy.basic_auth(user, config.proxy_password.as_deref().unwrap_or_default());
                }
                builder.proxy(proxy)
            }
            None => builder.no_proxy(),
        };
        let client = builder.build().map_err(|err| TransportError::Connect {
            host: config.host.clone(),
            message: err.to_string(),
        })?;
        Ok(Self {
            client,
            config,
            last_request: None,
        })
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> &ConnectionConfig { &self.config }

    fn classify(&self, err: &reqwest::Error) -> TransportError {
        if err.is_timeout() {
            return TransportError::Timeout(self.config.timeout());
        }
        match (&self.config.proxy_url(), err.is_connect()) {
            (Some(proxy), true) => TransportError::Proxy {
                proxy: proxy.clone(),
                message: err.to_string(),
            },
            _ => TransportError::Connect {
                host: self.config.host.clone(),
                message: err.to_string(),
            },
        }
    }
}

#[async_trait]
impl Connection for HttpConnection {
    type Error = TransportError;

    async fn send(&mut self, request: &GatewayRequest) -> Result<String, TransportError> {
        let mut builder = self
            .client
            .post(self.config.endpoint())
            .header(CONTENT_TYPE, CONTENT_TYPE_NVP)
            .header(REQUEST_ID_HEADER, request.request_id.as_str())
            .header(CLIENT_TIMEOUT_HEADER, self.config.timeout_secs.to_string());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        self.last_request = Some(request.body.clone());
        debug!(
            request_id = %request.request_id,
            host = %self.config.host,
            bytes = request.body.len(),
            "posting request"
        );
        let reply = builder
            .body(request.body.clone())
            .send()
            .await
            .map_err(|err| self.classify(&err))?;
        let status = reply.status();
        if !status.is_success() {
            warn!(request_id = %request.request_id, %status, "gateway rejected request");
            return Err(TransportError::HttpStatus(status.as_u16()));
        }
        reply
            .text()
            .await
            .map_err(|err| TransportError::Body(err.to_string()))
    }

    fn last_request(&self) -> Option<&str> { self.last_request.as_deref() }
}
