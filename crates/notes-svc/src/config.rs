//! Configuration loading and validation for the notes service.
//!
//! All values are read from environment variables at startup. The process will
//! exit with a clear error message if any variable is present but invalid.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::crypto::Scheme;
use crate::server::middleware::DEFAULT_REQUEST_TIMEOUT;

/// Validated notes service configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Address the HTTP server binds to.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Port the HTTP server listens on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Scheme new notes are sealed with: `cbc` or `aead-v1`.
    #[serde(default = "default_seal_scheme")]
    pub seal_scheme: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_bind_addr() -> String {
    "0.0.0.0".into()
}
fn default_port() -> u16 {
    3000
}
fn default_seal_scheme() -> String {
    "cbc".into()
}
fn default_request_timeout() -> u64 {
    DEFAULT_REQUEST_TIMEOUT.as_secs()
}
fn default_log_level() -> String {
    "info".into()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            port: default_port(),
            seal_scheme: default_seal_scheme(),
            request_timeout_secs: default_request_timeout(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if any variable cannot be parsed or fails validation.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::default())
            .build()
            .context("failed to build configuration from environment")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// The parsed sealing scheme.
    ///
    /// # Errors
    ///
    /// Returns an error if `SEAL_SCHEME` names an unknown scheme.
    pub fn scheme(&self) -> Result<Scheme> {
        self.seal_scheme
            .parse()
            .map_err(|e: String| anyhow::anyhow!("SEAL_SCHEME invalid: {e}"))
    }

    /// The socket address the server binds to.
    ///
    /// # Errors
    ///
    /// Returns an error if `BIND_ADDR` is not an IP address.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self
            .bind_addr
            .trim()
            .parse()
            .with_context(|| format!("BIND_ADDR is not an IP address: {}", self.bind_addr))?;
        Ok(SocketAddr::new(ip, self.port))
    }

    /// The per-request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    fn validate(&self) -> Result<()> {
        self.socket_addr()?;
        self.scheme()?;
        if self.request_timeout_secs == 0 {
            anyhow::bail!("REQUEST_TIMEOUT_SECS must be > 0");
        }
        if self.log_level.trim().is_empty() {
            anyhow::bail!("LOG_LEVEL must not be empty");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        assert_eq!(default_bind_addr(), "0.0.0.0");
        assert_eq!(default_port(), 3000);
        assert_eq!(default_seal_scheme(), "cbc");
        assert_eq!(default_request_timeout(), 30);
        assert_eq!(default_log_level(), "info");
    }

    #[test]
    fn default_config_is_valid() {
        let cfg = Config::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.scheme().unwrap(), Scheme::Cbc);
        assert_eq!(cfg.socket_addr().unwrap().port(), 3000);
    }

    #[test]
    fn validate_accepts_aead_scheme() {
        let cfg = Config {
            seal_scheme: "aead-v1".into(),
            ..Config::default()
        };
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.scheme().unwrap(), Scheme::AeadV1);
    }

    #[test]
    fn validate_rejects_unknown_scheme() {
        let cfg = Config {
            seal_scheme: "des".into(),
            ..Config::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let cfg = Config {
            request_timeout_secs: 0,
            ..Config::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_hostname_bind_addr() {
        let cfg = Config {
            bind_addr: "localhost".into(),
            ..Config::default()
        };
        assert!(cfg.validate().is_err());
    }
}
