//! Configuration schema types for Parley.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod logging;
mod provider;
mod session;
mod structured;

pub use logging::*;
pub use provider::*;
pub use session::*;
pub use structured::*;

use serde::{Deserialize, Serialize};

/// Root configuration for Parley.
///
/// Only override what you want to change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct ParleyConfig {
    pub provider: ProviderConfig,
    pub session: SessionConfig,
    pub structured: StructuredConfig,
    pub logging: LoggingConfig,
}

// =============================================================================
// Tests
// =============================================================================
