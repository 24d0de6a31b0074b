//! Client identification and custom transport headers.
//!
//! Nothing here is written into the request body; the connection turns it
//! into HTTP headers.

use std::collections::BTreeMap;

use reqwest::header::{HeaderName, HeaderValue};

use crate::context::{Context, ErrorObject};

const CLIENT_VERSION: &str = "X-VPS-VIT-CLIENT-VERSION";
const CLIENT_TYPE: &str = "X-VPS-VIT-CLIENT-TYPE";
const OS_NAME: &str = "X-VPS-VIT-OS-NAME";
const OS_ARCHITECTURE: &str = "X-VPS-VIT-OS-ARCHITECTURE";
const INTEGRATION_PRODUCT: &str = "X-VPS-VIT-INTEGRATION-PRODUCT";
const INTEGRATION_VERSION: &str = "X-VPS-VIT-INTEGRATION-VERSION";

/// Describes the software submitting transactions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientInfo {
    /// SDK version.
    pub client_version: String,
    /// SDK implementation language.
    pub client_type: String,
    /// Host operating system.
    pub os_name: String,
    /// Host CPU architecture.
    pub os_architecture: String,
    /// Product embedding the SDK.
    pub integration_product: Option<String>,
    /// Version of the embedding product.
    pub integration_version: Option<String>,
    headers: BTreeMap<String, String>,
}

impl Default for ClientInfo {
    fn default() -> Self {
        Self {
            client_version: env!("CARGO_PKG_VERSION").to_owned(),
            client_type: "Rust".to_owned(),
            os_name: std::env::consts::OS.to_owned(),
            os_architecture: std::env::consts::ARCH.to_owned(),
            integration_product: None,
            integration_version: None,
            headers: BTreeMap::new(),
        }
    }
}

impl ClientInfo {
    /// Identify an embedding product alongside the SDK defaults.
    #[must_use]
    pub fn with_integration(product: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            integration_product: Some(product.into()),
            integration_version: Some(version.into()),
            ..Self::default()
        }
    }

    /// Set a custom header, replacing any earlier value.
    pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.insert(name.into(), value.into());
    }

    /// Remove a custom header, returning its value.
    pub fn remove_header(&mut self, name: &str) -> Option<String> { self.headers.remove(name) }

    /// Custom headers set on this client.
    #[must_use]
    pub const fn headers(&self) -> &BTreeMap<String, String> { &self.headers }

    /// Every header to send: identification first, then custom headers.
    /// A custom header may override an identification header.
    #[must_use]
    pub fn transport_headers(&self) -> BTreeMap<String, String> {
        let mut all = BTreeMap::new();
        all.insert(CLIENT_VERSION.to_owned(), self.client_version.clone());
        all.insert(CLIENT_TYPE.to_owned(), self.client_type.clone());
        all.insert(OS_NAME.to_owned(), self.os_name.clone());
        all.insert(OS_ARCHITECTURE.to_owned(), self.os_architecture.clone());
        if let Some(product) = &self.integration_product {
            all.insert(INTEGRATION_PRODUCT.to_owned(), product.clone());
        }
        if let Some(version) = &self.integration_version {
            all.insert(INTEGRATION_VERSION.to_owned(), version.clone());
        }
        all.extend(
            self.headers
                .iter()
                .map(|(name, value)| (name.clone(), value.clone())),
        );
        all
    }

    /// Record custom headers that cannot be sent over HTTP.
    pub fn validate(&self, ctx: &mut Context) {
        for (name, value) in &self.headers {
            if HeaderName::from_bytes(name.as_bytes()).is_err() {
                ctx.add_error(ErrorObject::fatal(format!(
                    "transport header name {name:?} is not a valid HTTP token"
                )));
            }
            if HeaderValue::from_str(value).is_err() {
                ctx.add_error(ErrorObject::fatal(format!(
                    "transport header {name} has a value that cannot be sent"
                )));
            }
        }
    }
}
