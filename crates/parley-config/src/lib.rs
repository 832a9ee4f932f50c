//! Parley configuration system.
//!
//! Provides TOML-based configuration for the completion engine with
//! validation and `tracing` setup. All config sections use sensible
//! defaults so partial configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use parley_config::{init_tracing, load_config};
//!
//! let config = load_config().expect("failed to load config");
//! init_tracing(&config.logging);
//! ```

pub mod error;
pub mod logging;
pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use error::ConfigError;
pub use logging::init_tracing;
pub use schema::{
    FunctionStyle, LogLevel, LoggingConfig, ParleyConfig, ProviderConfig, SeedMode,
    SessionConfig, StructuredConfig,
};
pub use toml_loader::{load_default, load_from_path};

/// Load config from the platform default path and validate it.
///
/// Creates a commented default `config.toml` if none exists.
pub fn load_config() -> Result<ParleyConfig, ConfigError> {
    let config = toml_loader::load_default()?;
    validation::validate(&config)?;
    Ok(config)
}
