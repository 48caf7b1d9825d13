//! Command to split a full path into its parts.

use crate::error::CliError;
use crate::utils::{file_system, load_configuration, GlobalOptions, OutputFormat};
use clap::Args;
use modpaths::FileSystem;

/// Show how a full path is split into directory, file name and extension.
#[derive(Args)]
pub struct SplitCommand {
    /// Full path to split
    #[arg(value_name = "PATH")]
    pub path: String,

    /// Output format
    #[arg(long, value_enum, default_value = "text", ignore_case = true)]
    pub format: OutputFormat,
}

impl SplitCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let fs = file_system(global, &config)?;
        let path = fs.from_full_path(&self.path);

        match self.format {
            OutputFormat::Text => {
                println!("directory: {}", path.directory().unwrap_or(""));
                println!("file_name: {}", path.file_name());
                println!("extension: {}", path.extension());
                println!("depth: {}", path.depth());
            }
            OutputFormat::Json => {
                let value = serde_json::json!({
                    "full_path": path.full_path(),
                    "directory": path.directory(),
                    "file_name": path.file_name(),
                    "extension": path.extension(),
                    "depth": path.depth(),
                });
                println!("{value}");
            }
        }
        Ok(())
    }
}
