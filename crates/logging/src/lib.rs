#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` turns the verbosity flags of the phmd5 command-line tools into a
//! `tracing` subscriber. Library crates only emit `tracing` events; binaries
//! call [`init_tracing`] once at startup.
//!
//! # Verbosity mapping
//!
//! | flags        | filter  |
//! |--------------|---------|
//! | `--quiet`    | `error` |
//! | (none)       | `warn`  |
//! | `-v`         | `info`  |
//! | `-vv`        | `debug` |
//! | `-vvv` and up | `trace` |
//!
//! A non-empty, valid `RUST_LOG` replaces the mapping entirely.
//!
//! # Examples
//!
//! ```
//! use logging::VerbosityConfig;
//!
//! let config = VerbosityConfig::from_verbose_level(1);
//! assert_eq!(config.directive(), "info");
//! ```

mod config;
mod tracing_bridge;

pub use config::VerbosityConfig;
pub use tracing_bridge::{build_filter, init_tracing};
