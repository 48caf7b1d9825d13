//! Configuration system for modpaths.
//!
//! This module provides hierarchical configuration with support for:
//! - YAML configuration files (user config and project files)
//! - Environment variable overrides
//! - Programmatic configuration via builder pattern
//! - Validation of the merged result
//!
//! # Configuration Precedence
//!
//! Configuration is merged from multiple sources with the following precedence
//! (highest to lowest):
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_config`)
//! 2. Environment variables (`MODPATHS_*`)
//! 3. Private project config (`modpaths.local.yaml`)
//! 4. Project config (`modpaths.yaml`)
//! 5. User config (`~/.modpaths/config.yaml`)
//! 6. Built-in defaults
//!
//! # Examples
//!
//! Loading from a specific directory:
//!
//! ```no_run
//! use modpaths::config::ConfigBuilder;
//! use std::path::Path;
//!
//! let config = ConfigBuilder::new()
//!     .with_working_dir(Path::new("/path/to/mod"))
//!     .build()
//!     .unwrap();
//!
//! println!("Move retries: {}", config.retry_policy().move_retries);
//! ```
//!
//! Programmatic configuration:
//!
//! ```
//! use modpaths::config::{Config, ConfigBuilder, RetryConfig};
//!
//! let custom = Config {
//!     retry: Some(RetryConfig {
//!         delete_attempts: Some(3),
//!         ..Default::default()
//!     }),
//!     ..Default::default()
//! };
//!
//! let config = ConfigBuilder::new()
//!     .skip_files()
//!     .skip_env()
//!     .with_config(custom)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.retry_policy().delete_attempts, 3);
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

// Re-export key types at module root
pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{default_data_dir, ConfigLoader, ConfigSource};
pub use merger::ConfigMerger;
pub use schema::{Config, OverlayMapping, RetryConfig};
pub use validator::ConfigValidator;
