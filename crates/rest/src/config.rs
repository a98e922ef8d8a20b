//! Server configuration for the product catalog API.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `ATLAS_SERVER_PORT` | 8080 | Server port |
//! | `ATLAS_SERVER_HOST` | 127.0.0.1 | Host to bind |
//! | `ATLAS_LOG_LEVEL` | info | Log level |
//! | `ATLAS_MAX_BODY_SIZE` | 10485760 | Max request body (bytes) |
//! | `ATLAS_REQUEST_TIMEOUT` | 30 | Request timeout (seconds) |
//! | `ATLAS_ENABLE_CORS` | true | Enable CORS |
//! | `ATLAS_CORS_ORIGINS` | * | Allowed origins |
//! | `ATLAS_CORS_METHODS` | GET,POST,PUT,DELETE,OPTIONS | Allowed methods |
//! | `ATLAS_CORS_HEADERS` | Content-Type,Authorization,Accept | Allowed headers |
//! | `ATLAS_DATABASE_URL` | | PostgreSQL connection string |
//!
//! # Example
//!
//! ```rust
//! use atlas_rest::ServerConfig;
//!
//! let config = ServerConfig {
//!     port: 3000,
//!     host: "0.0.0.0".to_string(),
//!     ..Default::default()
//! };
//! assert_eq!(config.socket_addr(), "0.0.0.0:3000");
//! ```

use clap::Parser;

/// Server configuration.
///
/// Built from command line arguments and environment variables with
/// [`ServerConfig::parse`], from the environment alone with
/// [`ServerConfig::from_env`], or programmatically.
#[derive(Debug, Clone, Parser)]
#[command(name = "atlas")]
#[command(about = "Geospatial product catalog server")]
pub struct ServerConfig {
    /// Port to listen on.
    #[arg(short, long, env = "ATLAS_SERVER_PORT", default_value = "8080")]
    pub port: u16,

    /// Host address to bind to.
    #[arg(long, env = "ATLAS_SERVER_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "ATLAS_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Maximum request body size in bytes.
    #[arg(long, env = "ATLAS_MAX_BODY_SIZE", default_value = "10485760")]
    pub max_body_size: usize,

    /// Request timeout in seconds.
    #[arg(long, env = "ATLAS_REQUEST_TIMEOUT", default_value = "30")]
    pub request_timeout: u64,

    /// Enable CORS.
    #[arg(long, env = "ATLAS_ENABLE_CORS", default_value = "true")]
    pub enable_cors: bool,

    /// Allowed CORS origins (comma-separated, or * for all).
    #[arg(long, env = "ATLAS_CORS_ORIGINS", default_value = "*")]
    pub cors_origins: String,

    /// Allowed CORS methods (comma-separated, or * for all).
    #[arg(
        long,
        env = "ATLAS_CORS_METHODS",
        default_value = "GET,POST,PUT,DELETE,OPTIONS"
    )]
    pub cors_methods: String,

    /// Allowed CORS headers (comma-separated, or * for all).
    #[arg(
        long,
        env = "ATLAS_CORS_HEADERS",
        default_value = "Content-Type,Authorization,Accept"
    )]
    pub cors_headers: String,

    /// PostgreSQL connection string. Falls back to `ATLAS_PG_*` variables.
    #[arg(long, env = "ATLAS_DATABASE_URL")]
    pub database_url: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "127.0.0.1".to_string(),
            log_level: "info".to_string(),
            max_body_size: 10 * 1024 * 1024, // 10MB
            request_timeout: 30,
            enable_cors: true,
            cors_origins: "*".to_string(),
            cors_methods: "GET,POST,PUT,DELETE,OPTIONS".to_string(),
            cors_headers: "Content-Type,Authorization,Accept".to_string(),
            database_url: None,
        }
    }
}

impl ServerConfig {
    /// Creates a new ServerConfig from environment variables.
    ///
    /// Command line arguments are not consulted; invalid values fall back to
    /// the defaults.
    pub fn from_env() -> Self {
        Self::try_parse_from(["atlas"]).unwrap_or_default()
    }

    /// Returns the socket address to bind to.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.port == 0 {
            errors.push("Port cannot be 0".to_string());
        }

        if self.max_body_size == 0 {
            errors.push("Max body size cannot be 0".to_string());
        }

        if self.request_timeout == 0 {
            errors.push("Request timeout cannot be 0".to_string());
        }

        if let Some(url) = &self.database_url {
            if url.trim().is_empty() {
                errors.push("Database URL cannot be empty".to_string());
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Creates a configuration suitable for testing.
    ///
    /// This uses ephemeral port 0 and disables CORS.
    pub fn for_testing() -> Self {
        Self {
            port: 0, // Let OS assign port
            host: "127.0.0.1".to_string(),
            log_level: "debug".to_string(),
            max_body_size: 1024 * 1024,
            request_timeout: 5, // Shorter timeout for tests
            enable_cors: false,
            cors_origins: "*".to_string(),
            cors_methods: "*".to_string(),
            cors_headers: "*".to_string(),
            database_url: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.max_body_size, 10_485_760);
        assert!(config.enable_cors);
        assert!(config.database_url.is_none());
    }

    #[test]
    fn test_parse_matches_default() {
        let parsed = ServerConfig::try_parse_from(["atlas", "--port", "9000"]).unwrap();
        assert_eq!(parsed.port, 9000);
        assert_eq!(parsed.cors_methods, ServerConfig::default().cors_methods);
    }

    #[test]
    fn test_socket_addr() {
        let config = ServerConfig {
            port: 3000,
            host: "0.0.0.0".to_string(),
            ..Default::default()
        };
        assert_eq!(config.socket_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn test_validate_valid() {
        let config = ServerConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_invalid_port() {
        let config = ServerConfig {
            port: 0,
            ..Default::default()
        };
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().iter().any(|e| e.contains("Port")));
    }

    #[test]
    fn test_validate_collects_every_error() {
        let config = ServerConfig {
            max_body_size: 0,
            request_timeout: 0,
            database_url: Some("  ".to_string()),
            ..Default::default()
        };
        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_for_testing() {
        let config = ServerConfig::for_testing();
        assert_eq!(config.port, 0);
        assert!(!config.enable_cors);
        assert_eq!(config.request_timeout, 5);
    }
}
