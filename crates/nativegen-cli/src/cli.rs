//! CLI argument definitions and parsing.
//!
//! Defines the command-line interface structure using clap:
//! - `Cli` - Main CLI entry point
//! - `Commands` - Available subcommands

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::actions::ConfigAction;

/// nativegen - TypeScript declarations and loader scripts for native addons.
///
/// Assembles `.d.ts` files from the intermediate type-definition records
/// emitted while compiling a native addon, and generates the JavaScript
/// loaders that pick the right binary (or the wasm fallback) at runtime.
#[derive(Parser, Debug)]
#[command(name = "nativegen")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (json, text, pretty)
    #[arg(long = "format", global = true, default_value = "pretty")]
    pub format: String,

    /// Configuration file
    ///
    /// Defaults to `./nativegen.toml`, then the user config directory.
    #[arg(long, global = true, env = "NATIVEGEN_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Assemble a TypeScript declaration file.
    ///
    /// Reads the intermediate type-definition file (one JSON record per
    /// line, optionally prefixed with `crate:`), merges impl blocks into
    /// their classes, groups by namespace and writes the `.d.ts` document.
    ///
    /// # Examples
    ///
    /// ```bash
    /// nativegen typedef target/type-def.jsonl --output index.d.ts
    ///
    /// # Also save the runtime export list for the loader
    /// nativegen typedef target/type-def.jsonl --exports exports.json
    /// ```
    Typedef {
        /// Intermediate type-definition file
        input: PathBuf,

        /// Declaration file to write
        #[arg(short, long, default_value = "index.d.ts")]
        output: PathBuf,

        /// Write the export list as a JSON array to this file
        #[arg(long)]
        exports: Option<PathBuf>,

        /// Render string enums as union types instead of const enums
        #[arg(long)]
        no_const_enum: bool,

        /// Header text replacing the default banner
        #[arg(long)]
        header: Option<String>,
    },

    /// Generate JavaScript loader scripts.
    ///
    /// Writes the native host loader and the wasm loaders for Node.js and
    /// browsers into the output directory.
    ///
    /// # Examples
    ///
    /// ```bash
    /// nativegen loader --binary-name image --package-name @demo/image \
    ///     --exports-from exports.json --output-dir .
    ///
    /// # Only the Node.js loader, for two platforms
    /// nativegen loader --binary-name image --package-name @demo/image \
    ///     --target native-host --platform linux-x64-gnu --platform darwin-arm64
    /// ```
    Loader {
        /// Base name of the native binary files
        #[arg(long)]
        binary_name: String,

        /// npm package name; platform packages are `<name>-<triple>`
        #[arg(long)]
        package_name: String,

        /// Export names re-exported by the loaders
        #[arg(long = "export", num_args = 1)]
        exports: Vec<String>,

        /// JSON array of export names, as written by `typedef --exports`
        #[arg(long)]
        exports_from: Option<PathBuf>,

        /// Initializer exports invoked after wasm instantiation
        #[arg(long = "initializer", num_args = 1)]
        initializers: Vec<String>,

        /// Loader targets to generate (default: all)
        #[arg(long = "target", num_args = 1)]
        targets: Vec<String>,

        /// Platform triples to support (default: all known)
        #[arg(long = "platform", num_args = 1)]
        platforms: Vec<String>,

        /// Include the in-memory filesystem bridge in browser targets
        #[arg(long, overrides_with = "no_fs")]
        fs: bool,

        /// Leave the filesystem bridge out even if the config enables it
        #[arg(long, overrides_with = "fs")]
        no_fs: bool,

        /// Initial wasm memory in 64 KiB pages
        #[arg(long)]
        initial_memory: Option<u32>,

        /// Maximum wasm memory in 64 KiB pages
        #[arg(long)]
        maximum_memory: Option<u32>,

        /// Default async work pool size
        #[arg(long)]
        async_work_pool_size: Option<u32>,

        /// Directory to write the loaders into
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,
    },

    /// Manage the configuration file.
    Config {
        /// Configuration action
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions.
    ///
    /// # Examples
    ///
    /// ```bash
    /// nativegen completions bash > /etc/bash_completion.d/nativegen
    /// ```
    Completions {
        /// Target shell for completion generation
        #[arg(value_enum)]
        shell: Shell,
    },
}
