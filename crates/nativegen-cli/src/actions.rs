//! Action type definitions for CLI commands.

use clap::Subcommand;
use std::path::PathBuf;

/// Configuration management actions.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the effective configuration
    ///
    /// Prints the configuration after file discovery, without command-line
    /// overrides applied.
    Show,

    /// Write a configuration file with default values
    Init {
        /// Destination file
        #[arg(long, default_value = "nativegen.toml")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
