//! crates/logging/src/config.rs
//! Verbosity configuration derived from `-v` and `--quiet`.

use tracing::level_filters::LevelFilter;

/// Verbosity requested on the command line.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VerbosityConfig {
    /// Number of `-v` flags.
    pub verbose: u8,
    /// `--quiet` was given; overrides `verbose`.
    pub quiet: bool,
}

impl VerbosityConfig {
    /// Configuration for `level` repetitions of `-v`.
    #[must_use]
    pub const fn from_verbose_level(level: u8) -> Self {
        Self {
            verbose: level,
            quiet: false,
        }
    }

    /// Configuration that only reports errors.
    #[must_use]
    pub const fn quiet() -> Self {
        Self {
            verbose: 0,
            quiet: true,
        }
    }

    /// Most verbose level that passes the filter.
    #[must_use]
    pub const fn level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::ERROR;
        }
        match self.verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }

    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[must_use]
    pub fn directive(&self) -> String {
        self.level().to_string().to_lowercase()
    }
}
