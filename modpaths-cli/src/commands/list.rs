//! List command implementation.
//!
//! This module implements the `list` command, which enumerates files or
//! directories under a folder, filtered by a glob pattern, in text or JSON
//! form.

use crate::error::CliError;
use crate::utils::{
    file_system, format_timestamp, load_configuration, parse_rooted, require_native,
    shorten_path, GlobalOptions, OutputFormat,
};
use clap::Args;
use modpaths::{AbsolutePath, FileEntry};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// List files or directories under a folder.
#[derive(Args)]
pub struct ListCommand {
    /// Rooted folder to list
    #[arg(value_name = "DIR")]
    pub directory: String,

    /// Glob pattern matched case-insensitively against names
    #[arg(long, default_value = "*")]
    pub pattern: String,

    /// Descend into subdirectories
    #[arg(long)]
    pub recursive: bool,

    /// List directories instead of files
    #[arg(long)]
    pub dirs: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "text", ignore_case = true)]
    pub format: OutputFormat,

    /// Show full paths instead of shortened forms
    #[arg(long)]
    pub show_full_paths: bool,
}

/// One listed entry in JSON output.
#[derive(Serialize)]
struct ListedEntry {
    path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    modified: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    read_only: Option<bool>,
}

impl ListCommand {
    /// Execute the list command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        require_native(global, "list")?;
        let config = load_configuration(global)?;
        let fs = file_system(global, &config)?;
        let directory = parse_rooted(&fs, &self.directory)?;

        if !directory.directory_exists() {
            return Err(modpaths::Error::DirectoryNotFound {
                path: directory.full_path(),
            }
            .into());
        }

        let paths = if self.dirs {
            directory.enumerate_directories(&self.pattern, self.recursive)?
        } else {
            directory.enumerate_files(&self.pattern, self.recursive)?
        };

        let entries = paths
            .iter()
            .map(|path| self.describe(path))
            .collect::<Result<Vec<_>, CliError>>()?;

        match self.format {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(&entries)
                    .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
                println!("{json}");
            }
            OutputFormat::Text => self.write_text(&entries, global.quiet)?,
        }
        Ok(())
    }

    fn describe(&self, path: &AbsolutePath) -> Result<ListedEntry, CliError> {
        if self.dirs {
            return Ok(ListedEntry {
                path: path.full_path(),
                size: None,
                modified: None,
                read_only: None,
            });
        }
        let FileEntry {
            size,
            last_write_time,
            is_read_only,
            ..
        } = path.file_entry()?;
        Ok(ListedEntry {
            path: path.full_path(),
            size: Some(size.bytes()),
            modified: Some(format_timestamp(last_write_time)),
            read_only: Some(is_read_only),
        })
    }

    fn write_text(&self, entries: &[ListedEntry], quiet: bool) -> Result<(), CliError> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();

        for entry in entries {
            let shown = if self.show_full_paths {
                entry.path.clone()
            } else {
                shorten_path(Path::new(&entry.path))
            };
            match (entry.size, &entry.modified) {
                (Some(size), Some(modified)) => {
                    let flag = if entry.read_only == Some(true) { "r" } else { "-" };
                    writeln!(out, "{size:>12}\t{modified}\t{flag}\t{shown}")?;
                }
                _ => writeln!(out, "{shown}")?,
            }
        }

        if !quiet {
            eprintln!("{} entries", entries.len());
        }
        Ok(())
    }
}
