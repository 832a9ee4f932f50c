use std::path::PathBuf;

/// Failures while locating, reading, writing, or checking `config.toml`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("no platform config directory available")]
    NoConfigDir,

    #[error("failed to read config {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    #[error("failed to write config {path}: {reason}")]
    WriteFailed { path: PathBuf, reason: String },

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}
