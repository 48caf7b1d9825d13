//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    CombineCommand, CompletionsCommand, ExtensionCommand, InFolderCommand, ListCommand,
    RelativeCommand, ShowConfigCommand, SplitCommand, TempCommand,
};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Inspect paths and filesystems the way mod managers see them.
#[derive(Parser)]
#[command(name = "modpaths")]
#[command(
    version,
    about = "Inspect case-insensitive game and mod paths",
    long_about = None
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Directory holding the user configuration file
    #[arg(long, value_name = "PATH", global = true, env = "MODPATHS_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    /// Path format used to parse and print paths
    #[arg(
        long,
        value_enum,
        global = true,
        default_value = "native",
        ignore_case = true
    )]
    pub style: PathStyle,

    #[command(subcommand)]
    pub command: Command,
}

/// Which path format to apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum PathStyle {
    /// The format of the running platform, backed by the real filesystem
    Native,
    /// Forward-slash paths rooted at `/`
    Unix,
    /// Drive-letter paths such as `C:\`
    Windows,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// Split a full path into directory, file name and extension
    Split(SplitCommand),

    /// Join a relative path onto a base directory
    Combine(CombineCommand),

    /// Print a path relative to a base directory
    Relative(RelativeCommand),

    /// Check whether a path lies inside a folder
    InFolder(InFolderCommand),

    /// Print the extension of a path
    Extension(ExtensionCommand),

    /// List files or directories matching a pattern
    List(ListCommand),

    /// Create a temporary file or folder
    Temp(TempCommand),

    /// Print the merged configuration
    ShowConfig(ShowConfigCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
