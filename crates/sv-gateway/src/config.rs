//! Gateway configuration with validation.

use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

/// Main gateway configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// HTTP server configuration.
    pub http: HttpConfig,
    /// Request validation limits.
    pub limits: LimitsConfig,
    /// Timeout configuration.
    pub timeouts: TimeoutConfig,
    /// CORS configuration.
    pub cors: CorsConfig,
    /// Platform wallet receiving posting payments.
    pub treasury_wallet: String,
}

impl GatewayConfig {
    /// Validate configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.limits.max_request_size == 0 {
            return Err(ConfigError::InvalidLimit(
                "max_request_size cannot be 0".into(),
            ));
        }
        if self.limits.max_page_size == 0 {
            return Err(ConfigError::InvalidLimit("max_page_size cannot be 0".into()));
        }
        if self.timeouts.request.as_millis() == 0 {
            return Err(ConfigError::InvalidTimeout(
                "request timeout cannot be 0".into(),
            ));
        }
        if self.treasury_wallet.is_empty() {
            return Err(ConfigError::Invalid("treasury_wallet cannot be empty".into()));
        }
        Ok(())
    }

    /// HTTP server bind address.
    pub fn http_addr(&self) -> SocketAddr {
        SocketAddr::new(self.http.host, self.http.port)
    }

    /// Read overrides from the environment (`SV_HTTP_PORT`,
    /// `SV_DB_PATH` is handled by the server binary, `SV_TREASURY_WALLET`).
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Ok(port) = std::env::var("SV_HTTP_PORT") {
            config.http.port = port
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("bad SV_HTTP_PORT: {port}")))?;
        }
        if let Ok(wallet) = std::env::var("SV_TREASURY_WALLET") {
            config.treasury_wallet = wallet;
        }
        config.validate()?;
        Ok(config)
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Bind address.
    pub host: IpAddr,
    /// Port (default: 5000).
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)),
            port: 5000,
        }
    }
}

/// Request limits configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Max request body size in bytes (default: 1MB).
    pub max_request_size: usize,
    /// Hard cap on page sizes for list endpoints.
    pub max_page_size: u32,
    /// Default feed page size.
    pub default_page_size: u32,
    /// Row cap for unpaginated list endpoints (feedback, history).
    pub list_limit: u32,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_request_size: 1024 * 1024, // 1MB
            max_page_size: 100,
            default_page_size: 20,
            list_limit: 50,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Per-request timeout.
    #[serde(with = "duration_secs")]
    pub request: Duration,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request: Duration::from_secs(10),
        }
    }
}

/// CORS configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Enable CORS.
    pub enabled: bool,
    /// Allowed origins ("*" for all).
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            allowed_origins: vec!["*".to_string()],
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            http: HttpConfig::default(),
            limits: LimitsConfig::default(),
            timeouts: TimeoutConfig::default(),
            cors: CorsConfig::default(),
            treasury_wallet: "platform_treasury".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// Invalid size or count limit.
    #[error("invalid limit: {0}")]
    InvalidLimit(String),
    /// Invalid timeout value.
    #[error("invalid timeout: {0}")]
    InvalidTimeout(String),
    /// General configuration error.
    #[error("invalid configuration: {0}")]
    Invalid(String),
    /// A required secret was not provided.
    #[error("missing credential configuration: {0}")]
    MissingCredential(String),
}

/// Plain-seconds serde for Duration fields.
mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_secs(u64::deserialize(d)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = GatewayConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.http_addr().port(), 5000);
    }

    #[test]
    fn zero_limits_rejected() {
        let mut config = GatewayConfig::default();
        config.limits.max_request_size = 0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidLimit(_))));
    }

    #[test]
    fn empty_treasury_rejected() {
        let mut config = GatewayConfig::default();
        config.treasury_wallet.clear();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }
}
