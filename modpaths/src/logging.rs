//! Logging infrastructure for the modpaths library.
//!
//! This module provides a simple stderr-based logger with configurable
//! verbosity. Library code emits records through the `log` macros;
//! [`init_logger`] installs a [`Logger`] as the global sink.

use std::env;
use std::fmt;

use log::{LevelFilter, Metadata, Record};

/// Environment variable consulted by [`init_logger`].
pub const ENV_LOG_MODE: &str = "MODPATHS_LOG_MODE";

/// Logging level for controlling output verbosity.
///
/// Log levels are ordered from least verbose (Quiet) to most verbose (Verbose).
///
/// # Examples
///
/// ```
/// use modpaths::LogLevel;
///
/// assert!(LogLevel::Quiet < LogLevel::Normal);
/// assert!(LogLevel::Normal < LogLevel::Verbose);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Suppress all non-essential output.
    Quiet,
    /// Normal output level (errors and warnings).
    Normal,
    /// Verbose output (errors, warnings, info, and debug messages).
    Verbose,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quiet => write!(f, "quiet"),
            Self::Normal => write!(f, "normal"),
            Self::Verbose => write!(f, "verbose"),
        }
    }
}

impl LogLevel {
    /// Parses a log level from a string.
    ///
    /// Recognizes: "quiet", "normal", "verbose" (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not recognized.
    ///
    /// # Examples
    ///
    /// ```
    /// use modpaths::LogLevel;
    ///
    /// assert_eq!(LogLevel::parse("quiet").unwrap(), LogLevel::Quiet);
    /// assert_eq!(LogLevel::parse("VERBOSE").unwrap(), LogLevel::Verbose);
    /// assert!(LogLevel::parse("invalid").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "quiet" => Ok(Self::Quiet),
            "normal" => Ok(Self::Normal),
            "verbose" => Ok(Self::Verbose),
            _ => Err(format!("invalid log level: {s}")),
        }
    }

    /// The `log` crate filter matching this level.
    #[must_use]
    pub const fn filter(self) -> LevelFilter {
        match self {
            Self::Quiet => LevelFilter::Off,
            Self::Normal => LevelFilter::Warn,
            Self::Verbose => LevelFilter::Trace,
        }
    }
}

/// A simple stderr-based logger.
///
/// Records below the configured level are dropped. Quiet suppresses
/// everything.
///
/// # Examples
///
/// ```
/// use modpaths::{Logger, LogLevel};
///
/// let logger = Logger::new(LogLevel::Normal);
/// assert_eq!(logger.level(), LogLevel::Normal);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Logger {
    level: LogLevel,
}

impl Logger {
    /// Creates a new logger with the specified log level.
    #[must_use]
    pub const fn new(level: LogLevel) -> Self {
        Self { level }
    }

    /// Returns the current log level.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(LogLevel::Normal)
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level.filter()
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            eprintln!("{}: {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

/// Resolves the log level from CLI flags and the environment.
///
/// The priority order is:
/// 1. CLI flags (verbose/quiet, verbose wins if both are set)
/// 2. `MODPATHS_LOG_MODE` environment variable
/// 3. Default (Normal)
#[must_use]
pub fn resolve_level(verbose: bool, quiet: bool) -> LogLevel {
    if verbose {
        return LogLevel::Verbose;
    }
    if quiet {
        return LogLevel::Quiet;
    }

    if let Ok(env_value) = env::var(ENV_LOG_MODE) {
        if let Ok(level) = LogLevel::parse(&env_value) {
            return level;
        }
    }

    LogLevel::Normal
}

/// Initializes the global logger based on environment variables and CLI
/// flags.
///
/// See [`resolve_level`] for how the level is chosen. If a global logger
/// is already installed it is left in place; the maximum level is still
/// updated.
///
/// # Examples
///
/// ```
/// use modpaths::{init_logger, LogLevel};
///
/// let logger = init_logger(false, true);
/// assert_eq!(logger.level(), LogLevel::Quiet);
/// ```
pub fn init_logger(verbose: bool, quiet: bool) -> Logger {
    let logger = Logger::new(resolve_level(verbose, quiet));
    if log::set_boxed_logger(Box::new(logger)).is_err() {
        log::debug!("Global logger already installed");
    }
    log::set_max_level(logger.level.filter());
    logger
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::{Level, Log};
    use serial_test::serial;

    struct EnvGuard {
        old_value: Option<String>,
    }

    impl EnvGuard {
        fn set(value: Option<&str>) -> Self {
            let old_value = env::var(ENV_LOG_MODE).ok();
            match value {
                Some(v) => env::set_var(ENV_LOG_MODE, v),
                None => env::remove_var(ENV_LOG_MODE),
            }
            Self { old_value }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            match &self.old_value {
                Some(val) => env::set_var(ENV_LOG_MODE, val),
                None => env::remove_var(ENV_LOG_MODE),
            }
        }
    }

    #[test]
    fn test_log_level_display() {
        assert_eq!(format!("{}", LogLevel::Quiet), "quiet");
        assert_eq!(format!("{}", LogLevel::Normal), "normal");
        assert_eq!(format!("{}", LogLevel::Verbose), "verbose");
    }

    #[test]
    fn test_log_level_parse() {
        assert_eq!(LogLevel::parse("Normal").unwrap(), LogLevel::Normal);
        assert!(LogLevel::parse("").is_err());
    }

    #[test]
    fn test_logger_enabled() {
        let metadata = |level| Metadata::builder().level(level).build();

        let normal = Logger::default();
        assert!(normal.enabled(&metadata(Level::Warn)));
        assert!(!normal.enabled(&metadata(Level::Debug)));

        let quiet = Logger::new(LogLevel::Quiet);
        assert!(!quiet.enabled(&metadata(Level::Error)));

        let verbose = Logger::new(LogLevel::Verbose);
        assert!(verbose.enabled(&metadata(Level::Trace)));
    }

    #[test]
    #[serial]
    fn test_resolve_level_defaults() {
        let _guard = EnvGuard::set(None);
        assert_eq!(resolve_level(false, false), LogLevel::Normal);
        assert_eq!(resolve_level(true, true), LogLevel::Verbose);
        assert_eq!(resolve_level(false, true), LogLevel::Quiet);
    }

    #[test]
    #[serial]
    fn test_resolve_level_from_env() {
        let _guard = EnvGuard::set(Some("verbose"));
        assert_eq!(resolve_level(false, false), LogLevel::Verbose);
        assert_eq!(resolve_level(false, true), LogLevel::Quiet);
    }

    #[test]
    #[serial]
    fn test_resolve_level_env_invalid_fallback() {
        let _guard = EnvGuard::set(Some("loud"));
        assert_eq!(resolve_level(false, false), LogLevel::Normal);
    }
}
