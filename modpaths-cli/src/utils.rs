//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands,
//! including configuration loading, filesystem selection and output
//! formatting.

use crate::cli::PathStyle;
use crate::error::CliError;
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use modpaths::{
    AbsolutePath, Config, ConfigBuilder, FileSystem, FileSystemRef, InMemoryFileSystem,
    PathFormat, RealFileSystem,
};
use std::path::{Path, PathBuf};

/// Global CLI options shared across all commands.
///
/// Verbosity is handled by the logger installed in `main`.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the user configuration directory.
    pub config_dir: Option<PathBuf>,

    /// Path format used to parse and print paths.
    pub style: PathStyle,
}

/// Output format for commands that print structured data.
#[derive(Clone, Copy, Debug, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON
    Json,
}

/// Load hierarchical configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Environment variables
/// 2. Project configuration files
/// 3. User configuration (from `--config-dir` if given)
/// 4. Built-in defaults (lowest priority)
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let mut builder = ConfigBuilder::new();
    if let Some(ref dir) = global.config_dir {
        builder = builder.with_data_dir(dir);
    }

    builder
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

/// The filesystem commands operate on.
///
/// The native style uses the real filesystem with the configured retry
/// policy, wrapped in an overlay when the configuration maps any paths.
/// Other styles parse paths on an empty in-memory filesystem.
pub fn file_system(global: &GlobalOptions, config: &Config) -> Result<FileSystemRef, CliError> {
    let format = match global.style {
        PathStyle::Native => {
            let real = RealFileSystem::new()?
                .with_retry_policy(config.retry_policy())
                .handle();
            let mappings = config.overlay_mappings(&real);
            if mappings.is_empty() {
                return Ok(real);
            }
            log::debug!("Applying {} overlay mapping(s)", mappings.len());
            return Ok(real.create_overlay_file_system(mappings));
        }
        PathStyle::Unix => PathFormat::Unix,
        PathStyle::Windows => PathFormat::Windows,
    };
    Ok(InMemoryFileSystem::new(format).handle())
}

/// Rejects styles other than native for commands that touch real storage.
pub fn require_native(global: &GlobalOptions, command: &str) -> Result<(), CliError> {
    if global.style == PathStyle::Native {
        Ok(())
    } else {
        Err(CliError::InvalidArguments(format!(
            "'{command}' operates on the real filesystem and requires --style native"
        )))
    }
}

/// Parses `text` as a rooted path on `fs`.
pub fn parse_rooted(fs: &FileSystemRef, text: &str) -> Result<AbsolutePath, CliError> {
    let format = fs.path_format();
    if format.root_length(text) == 0 {
        return Err(CliError::InvalidArguments(format!(
            "'{text}' is not a rooted {format} path"
        )));
    }
    Ok(fs.from_full_path(text))
}

/// Format a timestamp for display.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Shorten a path for display.
///
/// If the path is within the home directory, show it as ~/...
/// Otherwise, show the full path.
pub fn shorten_path(path: &Path) -> String {
    if let Some(home) = home::home_dir() {
        if let Ok(relative) = path.strip_prefix(&home) {
            return format!("~/{}", relative.display());
        }
    }
    path.display().to_string()
}
