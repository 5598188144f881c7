use serde::{Deserialize, Serialize};

use super::cache::CacheConfig;
use super::directory::DirectoryConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::server::ServerConfig;

/// Main configuration structure for Endpoint DNS
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Server configuration (bind address, port, workers)
    #[serde(default)]
    pub server: ServerConfig,

    /// Service-directory client configuration
    #[serde(default)]
    pub directory: DirectoryConfig,

    /// Resolution cache configuration
    #[serde(default)]
    pub cache: CacheConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. endpoint-dns.toml in current directory
    /// 3. /etc/endpoint-dns/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new("endpoint-dns.toml").exists() {
            Self::from_file("endpoint-dns.toml")?
        } else if std::path::Path::new("/etc/endpoint-dns/config.toml").exists() {
            Self::from_file("/etc/endpoint-dns/config.toml")?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(port) = overrides.dns_port {
            self.server.dns_port = port;
        }
        if let Some(workers) = overrides.worker_threads {
            self.server.worker_threads = workers;
        }
        if let Some(namespace) = overrides.namespace {
            self.directory.namespace = namespace;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.dns_port == 0 {
            return Err(ConfigError::Validation("DNS port cannot be 0".to_string()));
        }
        if self.server.worker_threads == 0 {
            return Err(ConfigError::Validation(
                "worker_threads must be at least 1".to_string(),
            ));
        }
        if self.directory.namespace.is_empty() {
            return Err(ConfigError::Validation(
                "Directory namespace cannot be empty".to_string(),
            ));
        }
        if self.cache.ttl_secs == 0 {
            return Err(ConfigError::Validation(
                "Cache TTL cannot be 0".to_string(),
            ));
        }
        if self.cache.max_entries == 0 {
            return Err(ConfigError::Validation(
                "Cache capacity cannot be 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub bind_address: Option<String>,
    pub dns_port: Option<u16>,
    pub worker_threads: Option<usize>,
    pub namespace: Option<String>,
    pub log_level: Option<String>,
}
