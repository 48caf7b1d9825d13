//! Command to print a path's extension.

use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::Args;
use modpaths::Extension;

/// Print the extension of the final segment of PATH.
///
/// Prints an empty line when the name has no extension.
#[derive(Args)]
pub struct ExtensionCommand {
    /// Path or file name; either separator is accepted
    #[arg(value_name = "PATH")]
    pub path: String,

    /// Exit with code 1 unless the extension equals this one (case-insensitive)
    #[arg(long, value_name = "EXT")]
    pub expect: Option<String>,
}

impl ExtensionCommand {
    pub fn execute(self, _global: &GlobalOptions) -> Result<(), CliError> {
        let extension = Extension::from_path(&self.path);
        println!("{extension}");

        if let Some(expected) = self.expect {
            let expected = Extension::new(expected)?;
            if expected != extension {
                return Err(CliError::SemanticFailure(format!(
                    "expected extension '{expected}', found '{extension}'"
                )));
            }
        }
        Ok(())
    }
}
