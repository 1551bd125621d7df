//! Tracing setup.
//!
//! `RUST_LOG` wins when set. Otherwise the verbosity chosen on the command
//! line applies to this crate and to the HTTP request traces emitted by
//! `tower_http`.

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Targets covered by the default filter.
const LOG_TARGETS: [&str; 2] = ["parkslot", "tower_http"];

/// How much the process logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Errors only.
    Quiet,
    /// Info and above.
    #[default]
    Normal,
    /// Debug and above.
    Verbose,
    /// Everything.
    Trace,
}

impl Verbosity {
    /// Map `-v` occurrences and `-q` to a verbosity. Quiet wins.
    #[must_use]
    pub fn from_flags(verbose: u8, quiet: bool) -> Self {
        match (quiet, verbose) {
            (true, _) => Self::Quiet,
            (false, 0) => Self::Normal,
            (false, 1) => Self::Verbose,
            (false, _) => Self::Trace,
        }
    }

    /// The most detailed level that is emitted.
    #[must_use]
    pub fn level(self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::INFO,
            Self::Verbose => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }

    /// Filter directive used when `RUST_LOG` is unset.
    #[must_use]
    pub fn default_directive(self) -> String {
        let level = self.level();
        LOG_TARGETS
            .iter()
            .map(|target| format!("{target}={level}"))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Install the global subscriber.
///
/// Calling it again is harmless: the first subscriber stays in place.
///
/// ```no_run
/// use parkslot::{init_logging, logging::Verbosity};
///
/// init_logging(Verbosity::from_flags(1, false));
/// ```
pub fn init_logging(verbosity: Verbosity) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.default_directive()));

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).with_thread_ids(false))
        .try_init();
}
