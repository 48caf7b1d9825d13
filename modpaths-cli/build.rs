//! Build script for modpaths-cli.
//!
//! This script generates man pages at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// IMPORTANT: Keep this structure synchronized with src/cli.rs
/// When adding/removing/modifying commands, update both files.
fn build_cli() -> Command {
    Command::new("modpaths")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Inspect case-insensitive game and mod paths")
        .long_about(
            "Command-line tool for splitting, joining and comparing paths the way mod managers \
             see them, and for listing files and creating temporary files through the same layer",
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Enable verbose output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress non-essential output")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config-dir")
                .long("config-dir")
                .help("Directory holding the user configuration file")
                .value_name("PATH")
                .global(true)
                .env("MODPATHS_CONFIG_DIR"),
        )
        .arg(
            Arg::new("style")
                .long("style")
                .help("Path format used to parse and print paths")
                .value_parser(["native", "unix", "windows"])
                .default_value("native")
                .global(true),
        )
        .subcommands(vec![
            Command::new("split")
                .about("Split a full path into directory, file name and extension")
                .long_about("Print the directory, file name, extension and depth of a path"),
            Command::new("combine")
                .about("Join a relative path onto a base directory")
                .long_about(
                    "Join a relative path onto a base directory, optionally correcting case \
                     against existing entries",
                ),
            Command::new("relative")
                .about("Print a path relative to a base directory")
                .long_about("Express a path relative to a folder that contains it"),
            Command::new("in-folder")
                .about("Check whether a path lies inside a folder")
                .long_about("Exit with status 0 if the path is inside the folder and 1 otherwise"),
            Command::new("extension")
                .about("Print the extension of a path")
                .long_about("Print the extension of a path and optionally compare it to another"),
            Command::new("list")
                .about("List files or directories matching a pattern")
                .long_about("Enumerate files or directories below a folder by glob pattern"),
            Command::new("temp")
                .about("Create a temporary file or folder")
                .long_about("Create a uniquely named temporary file or folder and print its path"),
            Command::new("show-config")
                .about("Print the merged configuration")
                .long_about("Print the configuration after merging files, environment and defaults"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() {
    // Generate man pages at build time
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    // Generate main modpaths.1 man page
    let app = build_cli();
    let man = Man::new(app);
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();

    fs::write(man_dir.join("modpaths.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
