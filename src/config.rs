//! # Configuration Management Module
//!
//! ## Purpose
//! Centralized configuration for the case search adapter, loaded once at
//! startup and passed to the router as an immutable object. Request
//! handlers never read the environment directly.
//!
//! ## Input/Output Specification
//! - **Input**: Optional TOML file, environment variables
//! - **Output**: Validated configuration struct with defaults and overrides
//! - **Validation**: Type checking, range validation
//!
//! ## Configuration Sources (in order of precedence)
//! 1. Environment variables (`ENV`, `DEBUG`, `HOST`, `PORT`, `JAGRITI_BASE_URL`)
//! 2. Configuration file
//! 3. Default values

use crate::errors::{ApiError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Deployment environment flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

/// Main configuration structure containing all system settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Deployment environment
    pub environment: Environment,
    /// Enable debug behavior (verbose request logging)
    pub debug: bool,
    /// Server and API configuration
    pub server: ServerConfig,
    /// Jagriti portal endpoint settings
    pub portal: PortalConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Server and API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server bind address
    pub host: String,
    /// Server port
    pub port: u16,
    /// Number of HTTP worker threads
    pub workers: usize,
    /// Enable CORS
    pub enable_cors: bool,
}

/// Jagriti portal endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortalConfig {
    /// Portal base URL
    pub base_url: String,
    /// Referer sent with search requests (the portal's advance-search page)
    pub referer_url: String,
    /// User-Agent header for outbound calls
    pub user_agent: String,
    /// Outbound request timeout in seconds
    pub timeout_seconds: u64,
}

impl PortalConfig {
    /// Outbound request timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Enable structured JSON logging
    pub json_format: bool,
}

impl Config {
    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        Self::from_file("config.toml")
    }

    /// Load configuration from a specific file.
    ///
    /// A missing file is not an error; defaults apply and environment
    /// overrides are still honored.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path).map_err(|e| ApiError::Config {
                message: format!("Failed to read config file {:?}: {}", path, e),
            })?;
            toml::from_str(&content).map_err(|e| ApiError::Config {
                message: format!("Failed to parse config file {:?}: {}", path, e),
            })?
        } else {
            tracing::warn!("Configuration file not found: {:?}, using defaults", path);
            Self::default()
        };

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(env) = std::env::var("ENV") {
            self.environment = match env.to_lowercase().as_str() {
                "development" => Environment::Development,
                "production" => Environment::Production,
                other => {
                    return Err(ApiError::Config {
                        message: format!("Invalid ENV value '{}'", other),
                    })
                }
            };
        }
        if let Ok(debug) = std::env::var("DEBUG") {
            self.debug = matches!(debug.to_lowercase().as_str(), "true" | "1" | "yes");
        }
        if let Ok(host) = std::env::var("HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("PORT") {
            self.server.port = port.parse().map_err(|_| ApiError::Config {
                message: "Invalid port number in PORT".to_string(),
            })?;
        }
        if let Ok(base_url) = std::env::var("JAGRITI_BASE_URL") {
            self.portal.base_url = base_url;
        }

        Ok(())
    }

    /// Validate configuration values
    fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(ApiError::Config {
                message: "server.port cannot be zero".to_string(),
            });
        }

        if self.server.workers == 0 {
            return Err(ApiError::Config {
                message: "server.workers must be greater than zero".to_string(),
            });
        }

        if !self.portal.base_url.starts_with("http://") && !self.portal.base_url.starts_with("https://")
        {
            return Err(ApiError::Config {
                message: format!("portal.base_url is not an HTTP URL: {}", self.portal.base_url),
            });
        }

        if self.portal.timeout_seconds == 0 {
            return Err(ApiError::Config {
                message: "portal.timeout_seconds must be greater than zero".to_string(),
            });
        }

        Ok(())
    }

    /// Address the HTTP server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        let base_url = "https://e-jagriti.gov.in".to_string();
        Self {
            environment: Environment::Development,
            debug: true,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
                workers: num_cpus::get(),
                enable_cors: true,
            },
            portal: PortalConfig {
                referer_url: format!("{}/advance-case-search", base_url),
                base_url,
                user_agent:
                    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".to_string(),
                timeout_seconds: 30,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                json_format: false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.bind_addr(), "0.0.0.0:8000");
    }

    #[test]
    fn zero_port_fails_validation() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn non_http_base_url_fails_validation() {
        let mut config = Config::default();
        config.portal.base_url = "ftp://e-jagriti.gov.in".to_string();
        assert!(config.validate().is_err());
    }
}
