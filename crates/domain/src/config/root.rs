use serde::{Deserialize, Serialize};
use std::path::Path;

use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::probe::ProbeConfig;
use super::resolver::ResolverConfig;
use crate::server_pool::validate_server;

/// Main configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub resolver: ResolverConfig,

    #[serde(default)]
    pub probe: ProbeConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Values given on the command line; they win over the config file.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub query_timeout: Option<u64>,
    pub queries_per_server: Option<usize>,
    pub log_level: Option<String>,
    pub bootstrap_servers: Vec<String>,
}

impl Config {
    /// Loads the configuration from `config_path` (defaults when `None`)
    /// and applies the CLI overrides on top.
    pub fn load(config_path: Option<&str>, overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match config_path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        config.apply_overrides(overrides);
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
            path: path.display().to_string(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    fn apply_overrides(&mut self, overrides: CliOverrides) {
        if let Some(timeout) = overrides.query_timeout {
            self.probe.query_timeout = timeout;
        }
        if let Some(queries) = overrides.queries_per_server {
            self.probe.queries_per_server = queries;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if !overrides.bootstrap_servers.is_empty() {
            self.resolver.bootstrap_servers = overrides.bootstrap_servers;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.probe.queries_per_server == 0 {
            return Err(ConfigError::Validation(
                "probe.queries_per_server must be at least 1".to_string(),
            ));
        }
        if self.probe.query_timeout == 0 {
            return Err(ConfigError::Validation(
                "probe.query_timeout must be greater than 0".to_string(),
            ));
        }

        for server in self
            .resolver
            .bootstrap_servers
            .iter()
            .chain(self.resolver.fallback_servers.iter())
        {
            validate_server(server).map_err(|e| ConfigError::Validation(e.to_string()))?;
        }

        Ok(())
    }
}
