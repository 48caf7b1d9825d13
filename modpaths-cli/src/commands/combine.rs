//! Command to join a relative path onto a base directory.

use crate::error::CliError;
use crate::utils::{file_system, load_configuration, parse_rooted, GlobalOptions};
use clap::Args;
use modpaths::RelativePath;

/// Join a relative path onto a base directory.
#[derive(Args)]
pub struct CombineCommand {
    /// Rooted base directory
    #[arg(value_name = "BASE")]
    pub base: String,

    /// Relative path to append; either separator is accepted
    #[arg(value_name = "RELATIVE")]
    pub relative: String,

    /// Correct each segment's case to match existing entries
    #[arg(long)]
    pub checked: bool,
}

impl CombineCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let fs = file_system(global, &config)?;
        let base = parse_rooted(&fs, &self.base)?;
        let relative = RelativePath::from(self.relative);

        let combined = if self.checked {
            base.combine_checked(&relative)
        } else {
            base.combine_unchecked(&relative)
        };

        println!("{combined}");
        Ok(())
    }
}
