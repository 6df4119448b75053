//! crates/logging/src/tracing_bridge.rs
//! Subscriber installation for the command-line tools.
//!
//! Events go to stderr through a `tracing-subscriber` fmt layer. The filter
//! comes from `RUST_LOG` when it is set and parses, and from the
//! [`VerbosityConfig`] otherwise.
//!
//! # Usage
//!
//! ```rust,no_run
//! use logging::{VerbosityConfig, init_tracing};
//!
//! init_tracing(VerbosityConfig::from_verbose_level(2));
//! tracing::debug!(target: "phmd5sum", "hashing operands");
//! ```

use std::env;

use tracing_subscriber::EnvFilter;

use super::config::VerbosityConfig;

/// Builds the filter for `config`, preferring a valid `rust_log` directive.
#[must_use]
pub fn build_filter(config: VerbosityConfig, rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(config.directive()))
}

/// Installs the global subscriber.
///
/// Returns `false` when a subscriber was already installed, in which case the
/// existing one is left in place.
pub fn init_tracing(config: VerbosityConfig) -> bool {
    let rust_log = env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(config, rust_log.as_deref());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init()
        .is_ok()
}
