//! CLI command implementations.
//!
//! This module contains the implementations of all CLI commands:
//! - `split`: Split a full path into directory, file name and extension
//! - `combine`: Join a relative path onto a base directory
//! - `relative`: Express a path relative to a base directory
//! - `in_folder`: Check folder containment
//! - `extension`: Print a path's extension
//! - `list`: Enumerate files or directories by pattern
//! - `temp`: Create temporary files and folders
//! - `show_config`: Print the merged configuration
//! - `completions`: Generate shell completion scripts

pub mod combine;
pub mod completions;
pub mod extension;
pub mod in_folder;
pub mod list;
pub mod relative;
pub mod show_config;
pub mod split;
pub mod temp;

pub use combine::CombineCommand;
pub use completions::CompletionsCommand;
pub use extension::ExtensionCommand;
pub use in_folder::InFolderCommand;
pub use list::ListCommand;
pub use relative::RelativeCommand;
pub use show_config::ShowConfigCommand;
pub use split::SplitCommand;
pub use temp::TempCommand;
