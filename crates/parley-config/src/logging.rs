//! `tracing` subscriber setup driven by `[logging]`.

use tracing::warn;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

use crate::schema::LoggingConfig;

/// Build the `EnvFilter` for a logging config.
///
/// `RUST_LOG` wins when set; otherwise the configured level applies to
/// the parley crates, followed by any extra directives. Directives that
/// fail to parse are left out of the filter and returned alongside it.
pub fn env_filter(config: &LoggingConfig) -> (EnvFilter, Vec<String>) {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return (filter, Vec::new());
    }

    let level = config.level.as_str();
    let mut filter = EnvFilter::new(format!("warn,parley_ai={level},parley_config={level}"));
    let mut rejected = Vec::new();
    for raw in &config.directives {
        match raw.parse::<Directive>() {
            Ok(directive) => filter = filter.add_directive(directive),
            Err(_) => rejected.push(raw.clone()),
        }
    }
    (filter, rejected)
}

/// Install a global fmt subscriber.
///
/// Returns `false` if a subscriber was already installed, in which case
/// the existing one is left in place. Rejected directives are reported
/// through the new subscriber once it is active.
pub fn init_tracing(config: &LoggingConfig) -> bool {
    let (filter, rejected) = env_filter(config);
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_ok();
    for directive in &rejected {
        warn!(%directive, "ignoring invalid log directive");
    }
    installed
}
