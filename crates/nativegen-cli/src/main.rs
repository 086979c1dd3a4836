//! nativegen command-line tool.
//!
//! Generates TypeScript declarations and JavaScript loaders for native
//! Node.js addons.
//!
//! # Architecture
//!
//! The CLI is organized around subcommands:
//! - `typedef` - Assemble a `.d.ts` file from intermediate records
//! - `loader` - Generate native host and wasm loader scripts
//! - `config` - Show or initialize `nativegen.toml`
//! - `completions` - Generate shell completions
//!
//! # Examples
//!
//! ```bash
//! nativegen typedef target/type-def.jsonl --exports exports.json
//! nativegen loader --binary-name image --package-name @demo/image --exports-from exports.json
//! ```

use anyhow::Result;
use clap::Parser;
use nativegen_cli::Cli;
use nativegen_cli::runner::{execute_command, init_logging};
use nativegen_core::cli::OutputFormat;

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose)?;

    let output_format = cli
        .format
        .parse::<OutputFormat>()
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    let exit_code = execute_command(cli.command, output_format, cli.config.as_deref())?;

    std::process::exit(exit_code.as_i32());
}
