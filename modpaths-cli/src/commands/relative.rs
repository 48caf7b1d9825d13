//! Command to express a path relative to a base directory.

use crate::error::CliError;
use crate::utils::{file_system, load_configuration, parse_rooted, GlobalOptions};
use clap::Args;

/// Print PATH relative to BASE.
///
/// Fails with exit code 1 if PATH is not inside BASE.
#[derive(Args)]
pub struct RelativeCommand {
    /// Rooted path to express
    #[arg(value_name = "PATH")]
    pub path: String,

    /// Rooted base directory
    #[arg(value_name = "BASE")]
    pub base: String,
}

impl RelativeCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let fs = file_system(global, &config)?;
        let path = parse_rooted(&fs, &self.path)?;
        let base = parse_rooted(&fs, &self.base)?;

        let relative = path.relative_to(&base)?;
        println!("{relative}");
        Ok(())
    }
}
