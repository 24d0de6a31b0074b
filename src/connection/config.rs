//! Layered configuration for the gateway connection and merchant
//! credentials.
//!
//! Values are merged from built-in defaults, then `payflow.toml` in the
//! working directory, then `PAYFLOW_*` environment variables. Later layers
//! win.

use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data_objects::UserInfo;

/// Configuration file read from the working directory.
pub const CONFIG_FILE: &str = "payflow.toml";
/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "PAYFLOW_";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A layer could not be read or had the wrong shape.
    #[error("failed to load configuration: {0}")]
    Extract(#[from] Box<figment::Error>),
    /// The gateway host is empty.
    #[error("gateway host must not be empty")]
    EmptyHost,
    /// The timeout is zero.
    #[error("timeout must be at least one second")]
    ZeroTimeout,
    /// A proxy port was given without a proxy host.
    #[error("proxy port {0} given without a proxy host")]
    ProxyPortWithoutHost(u16),
    /// A required credential is missing.
    #[error("credential {0} is not configured")]
    MissingCredential(&'static str),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self { Self::Extract(Box::new(err)) }
}

/// The default figment: defaults, then [`CONFIG_FILE`], then the
/// environment.
#[must_use]
pub fn figment() -> Figment {
    Figment::from(Serialized::defaults(ConnectionConfig::default()))
        .merge(Toml::file(CONFIG_FILE))
        .merge(Env::prefixed(ENV_PREFIX))
}

/// Where and how to reach the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Gateway host name.
    pub host: String,
    /// Gateway port.
    pub port: u16,
    /// Round-trip timeout in seconds.
    pub timeout_secs: u64,
    /// Use HTTPS. Only tests and local gateways should turn this off.
    pub tls: bool,
    /// Proxy host.
    pub proxy_host: Option<String>,
    /// Proxy port.
    pub proxy_port: Option<u16>,
    /// Proxy user.
    pub proxy_user: Option<String>,
    /// Proxy password.
    pub proxy_password: Option<String>,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host: "pilot-payflowpro.paypal.com".to_owned(),
            port: 443,
            timeout_secs: 45,
            tls: true,
            proxy_host: None,
            proxy_port: None,
            proxy_user: None,
            proxy_password: None,
        }
    }
}

impl ConnectionConfig {
    /// Load from the default layers.
    ///
    /// # Errors
    /// Returns [`ConfigError`] if a layer is malformed or the merged values
    /// are unusable.
    pub fn load() -> Result<Self, ConfigError> { Self::from_figment(&figment()) }

    /// Extract from an explicit figment and check the result.
    ///
    /// # Errors
    /// Returns [`ConfigError`] if extraction or validation fails.
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let cfg: Self = figment.extract()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check the merged values.
    ///
    /// # Errors
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::EmptyHost);
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        if let (None, Some(port)) = (&self.proxy_host, self.proxy_port) {
            return Err(ConfigError::ProxyPortWithoutHost(port));
        }
        Ok(())
    }

    /// The round-trip timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration { Duration::from_secs(self.timeout_secs) }

    /// Gateway URL.
    #[must_use]
    pub fn endpoint(&self) -> String {
        let scheme = if self.tls { "https" } else { "http" };
        format!("{scheme}://{}:{}/", self.host, self.port)
    }

    /// Proxy URL, when a proxy is configured.
    #[must_use]
    pub fn proxy_url(&self) -> Option<String> {
        let host = self.proxy_host.as_deref()?;
        Some(match self.proxy_port {
            Some(port) => format!("http://{host}:{port}"),
            None => format!("http://{host}"),
        })
    }
}

/// Merchant credentials taken from the same layers as [`ConnectionConfig`].
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialConfig {
    /// Login user; defaults to the vendor.
    pub user: Option<String>,
    /// Merchant login id.
    pub vendor: Option<String>,
    /// Reseller id.
    pub partner: Option<String>,
    /// Password, read from `pwd`.
    #[serde(rename = "pwd")]
    pub password: Option<String>,
}

impl std::fmt::Debug for CredentialConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialConfig")
            .field("user", &self.user)
            .field("vendor", &self.vendor)
            .field("partner", &self.partner)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl CredentialConfig {
    /// Load from the default layers.
    ///
    /// # Errors
    /// Returns [`ConfigError::Extract`] if a layer is malformed.
    pub fn load() -> Result<Self, ConfigError> { Self::from_figment(&figment()) }

    /// Extract from an explicit figment.
    ///
    /// # Errors
    /// Returns [`ConfigError::Extract`] if a layer is malformed.
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        Ok(figment.extract()?)
    }

    /// Build credentials, requiring vendor, partner and password.
    ///
    /// # Errors
    /// Returns [`ConfigError::MissingCredential`] naming the first gap.
    pub fn into_user_info(self) -> Result<UserInfo, ConfigError> {
        let vendor = self.vendor.ok_or(ConfigError::MissingCredential("vendor"))?;
        let partner = self.partner.ok_or(ConfigError::MissingCredential("partner"))?;
        let password = self.password.ok_or(ConfigError::MissingCredential("pwd"))?;
        let user = self.user.unwrap_or_else(|| vendor.clone());
        Ok(UserInfo::new(user, vendor, partner, password))
    }
}

#[cfg(test)]
mod tests {
    use figment::Jail;
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn defaults_point_at_pilot() {
        Jail::expect_with(|_j| {
            let cfg = ConnectionConfig::load().expect("load");
            assert_eq!(cfg, ConnectionConfig::default());
            assert_eq!(cfg.endpoint(), "https://pilot-payflowpro.paypal.com:443/");
            Ok(())
        });
    }

    #[rstest]
    fn env_overrides_file() {
        Jail::expect_with(|j| {
            j.create_file(CONFIG_FILE, "host = \"file.example\"\ntimeout_secs = 10")?;
            j.set_env("PAYFLOW_HOST", "env.example");
            let cfg = ConnectionConfig::load().expect("load");
            assert_eq!(cfg.host, "env.example");
            assert_eq!(cfg.timeout(), Duration::from_secs(10));
            Ok(())
        });
    }

    #[rstest]
    fn proxy_port_needs_host() {
        Jail::expect_with(|j| {
            j.set_env("PAYFLOW_PROXY_PORT", "3128");
            let err = ConnectionConfig::load().expect_err("invalid");
            assert!(matches!(err, ConfigError::ProxyPortWithoutHost(3128)));
            Ok(())
        });
    }

    #[rstest]
    fn zero_timeout_is_rejected() {
        let cfg = ConnectionConfig {
            timeout_secs: 0,
            ..ConnectionConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::ZeroTimeout)));
    }

    #[rstest]
    fn credentials_from_env() {
        Jail::expect_with(|j| {
            j.set_env("PAYFLOW_VENDOR", "acme");
            j.set_env("PAYFLOW_PARTNER", "PayPal");
            j.set_env("PAYFLOW_PWD", "s3cret");
            let info = CredentialConfig::load()
                .expect("load")
                .into_user_info()
                .expect("complete");
            assert_eq!(info, UserInfo::new("acme", "acme", "PayPal", "s3cret"));
            Ok(())
        });
    }

    #[rstest]
    fn missing_partner_is_named() {
        let creds = CredentialConfig {
            vendor: Some("acme".to_owned()),
            ..CredentialConfig::default()
        };
        assert!(matches!(
            creds.into_user_info(),
            Err(ConfigError::MissingCredential("partner"))
        ));
    }
}
