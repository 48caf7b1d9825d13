//! Command to check folder containment.
//!
//! Exits with code 0 if the path is inside the folder and 1 otherwise, so
//! it can be used directly in shell conditionals.

use crate::error::CliError;
use crate::utils::{file_system, load_configuration, parse_rooted, GlobalOptions};
use clap::Args;

/// Check whether PATH is FOLDER or lies beneath it.
#[derive(Args)]
pub struct InFolderCommand {
    /// Rooted path to test
    #[arg(value_name = "PATH")]
    pub path: String,

    /// Rooted folder
    #[arg(value_name = "FOLDER")]
    pub folder: String,
}

impl InFolderCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let fs = file_system(global, &config)?;
        let path = parse_rooted(&fs, &self.path)?;
        let folder = parse_rooted(&fs, &self.folder)?;

        if path.in_folder(&folder) {
            if !global.quiet {
                println!("{path} is in {folder}");
            }
            Ok(())
        } else {
            Err(CliError::SemanticFailure(format!(
                "{path} is not in {folder}"
            )))
        }
    }
}
