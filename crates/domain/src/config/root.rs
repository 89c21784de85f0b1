use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};

use super::errors::ConfigError;
use super::logging::{LogFormat, LoggingConfig};
use super::policy::PolicyConfig;
use super::server::ServerConfig;
use super::transport::TransportConfig;
use crate::policy::{PolicyAction, PolicyRule, Ruleset};

const LOCAL_CONFIG_PATH: &str = "stub-dns.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/stub-dns/config.toml";

/// Main configuration structure for the stub DNS server
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Listener configuration (address, port, socket options)
    #[serde(default)]
    pub server: ServerConfig,

    /// Response policy (rules and default action)
    #[serde(default)]
    pub policy: PolicyConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. stub-dns.toml in current directory
    /// 3. /etc/stub-dns/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new(LOCAL_CONFIG_PATH).exists() {
            Self::from_file(LOCAL_CONFIG_PATH)?
        } else if std::path::Path::new(SYSTEM_CONFIG_PATH).exists() {
            Self::from_file(SYSTEM_CONFIG_PATH)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply command-line overrides to configuration
    ///
    /// Rules given on the command line are placed ahead of file rules, so they
    /// win when both name the same domain.
    pub fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.dns_port {
            self.server.dns_port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(reuse) = overrides.reuse_address {
            self.server.reuse_address = reuse;
        }
        if let Some(workers) = overrides.workers {
            self.server.workers = workers;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if let Some(format) = overrides.log_format {
            self.logging.format = format;
        }
        if let Some(action) = overrides.default_action {
            self.policy.default_action = action;
        }
        if !overrides.rules.is_empty() {
            let mut rules = overrides.rules;
            rules.append(&mut self.policy.rules);
            self.policy.rules = rules;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.dns_port == 0 {
            return Err(ConfigError::Validation("DNS port cannot be 0".to_string()));
        }

        self.bind_ip()?;

        if self.server.workers == 0 {
            return Err(ConfigError::Validation(
                "workers must be at least 1".to_string(),
            ));
        }

        if self.server.workers > 1 && !self.server.reuse_address {
            return Err(ConfigError::Validation(format!(
                "{} workers need reuse_address = true to share port {}",
                self.server.workers, self.server.dns_port
            )));
        }

        for rule in &self.policy.rules {
            if !rule.name.ends_with('.') {
                return Err(ConfigError::Validation(format!(
                    "Rule name '{}' must be fully qualified (end with '.')",
                    rule.name
                )));
            }
        }

        Ok(())
    }

    /// Socket settings for the listener
    pub fn transport(&self) -> Result<TransportConfig, ConfigError> {
        let addr = SocketAddr::new(self.bind_ip()?, self.server.dns_port);
        Ok(TransportConfig::udp(addr)
            .with_reuse_address(self.server.reuse_address)
            .with_workers(self.server.workers)
            .with_recv_buffer_size(self.server.recv_buffer_size))
    }

    /// The immutable rule table handed to the policy engine
    pub fn ruleset(&self) -> Ruleset {
        self.policy.to_ruleset()
    }

    fn bind_ip(&self) -> Result<IpAddr, ConfigError> {
        self.server.bind_address.parse::<IpAddr>().map_err(|e| {
            ConfigError::Validation(format!(
                "Invalid bind address '{}': {}",
                self.server.bind_address, e
            ))
        })
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub dns_port: Option<u16>,
    pub bind_address: Option<String>,
    pub reuse_address: Option<bool>,
    pub workers: Option<usize>,
    pub log_level: Option<String>,
    pub log_format: Option<LogFormat>,
    pub rules: Vec<PolicyRule>,
    pub default_action: Option<PolicyAction>,
}
