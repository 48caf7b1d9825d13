//! Command to print the merged configuration.

use crate::error::CliError;
use crate::utils::{load_configuration, GlobalOptions};
use clap::Args;

/// Print the configuration after merging files, environment and defaults.
#[derive(Args)]
pub struct ShowConfigCommand {
    /// Print the effective retry policy instead of the raw configuration
    #[arg(long)]
    pub retry_policy: bool,
}

impl ShowConfigCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;

        if self.retry_policy {
            let policy = config.retry_policy();
            println!("move_retries: {}", policy.move_retries);
            println!("move_delay_ms: {}", policy.move_delay.as_millis());
            println!("delete_attempts: {}", policy.delete_attempts);
            println!("delete_delay_ms: {}", policy.delete_delay.as_millis());
            return Ok(());
        }

        let yaml = serde_yaml::to_string(&config)
            .map_err(|e| CliError::Config(e.to_string()))?;
        print!("{yaml}");
        Ok(())
    }
}
