use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config file '{path}': {reason}")]
    FileRead { path: String, reason: String },

    #[error("Invalid TOML in config: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    Validation(String),
}
