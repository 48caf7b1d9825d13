//! Main entry point for the modpaths CLI.
//!
//! This is the command-line interface to the modpaths library. It provides
//! commands for inspecting paths and the filesystem:
//! - `split`, `combine`, `relative`, `in-folder`, `extension`: path algebra
//! - `list`: pattern-based enumeration
//! - `temp`: scoped temporary files and folders
//! - `show-config`: the merged configuration

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let _logger = modpaths::init_logger(cli.verbose, cli.quiet);

    // Convert CLI args to GlobalOptions
    let global = GlobalOptions {
        quiet: cli.quiet,
        config_dir: cli.config_dir,
        style: cli.style,
    };

    // Execute the command
    let result = match cli.command {
        cli::Command::Split(cmd) => cmd.execute(&global),
        cli::Command::Combine(cmd) => cmd.execute(&global),
        cli::Command::Relative(cmd) => cmd.execute(&global),
        cli::Command::InFolder(cmd) => cmd.execute(&global),
        cli::Command::Extension(cmd) => cmd.execute(&global),
        cli::Command::List(cmd) => cmd.execute(&global),
        cli::Command::Temp(cmd) => cmd.execute(&global),
        cli::Command::ShowConfig(cmd) => cmd.execute(&global),
        cli::Command::Completions(cmd) => cmd.execute(&global),
    };

    // Handle errors and set exit code
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
