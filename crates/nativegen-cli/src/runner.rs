//! Logging setup and command dispatch.

use anyhow::Result;
use clap::CommandFactory;
use nativegen_core::cli::{ExitCode, OutputFormat};
use std::path::Path;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Commands};
use crate::commands;
use crate::commands::loader::LoaderOptions;
use crate::commands::typedef::TypedefOptions;

/// Initializes logging infrastructure.
///
/// `--verbose` forces the debug level; otherwise `RUST_LOG` applies, falling
/// back to `info`. Logs go to stderr so stdout stays parseable.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()?;

    Ok(())
}

/// Executes the specified CLI command.
///
/// Routes commands to their respective handlers and returns an exit code.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or the command
/// fails.
pub fn execute_command(
    command: Commands,
    output_format: OutputFormat,
    config_path: Option<&Path>,
) -> Result<ExitCode> {
    match command {
        Commands::Typedef {
            input,
            output,
            exports,
            no_const_enum,
            header,
        } => {
            let loaded = commands::common::load_config(config_path)?;
            let options = TypedefOptions {
                input,
                output,
                exports,
                no_const_enum,
                header,
            };
            commands::typedef::run(&options, &loaded.config.typedef, output_format)
        }
        Commands::Loader {
            binary_name,
            package_name,
            exports,
            exports_from,
            initializers,
            targets,
            platforms,
            fs,
            no_fs,
            initial_memory,
            maximum_memory,
            async_work_pool_size,
            output_dir,
        } => {
            let loaded = commands::common::load_config(config_path)?;
            let options = LoaderOptions {
                binary_name,
                package_name,
                exports,
                exports_from,
                initializers,
                targets,
                platforms,
                fs: (fs || no_fs).then_some(fs),
                initial_memory,
                maximum_memory,
                async_work_pool_size,
                output_dir,
            };
            commands::loader::run(&options, &loaded.config.loader, output_format)
        }
        Commands::Config { action } => {
            let loaded = commands::common::load_config(config_path)?;
            commands::config::run(action, &loaded, output_format)
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            commands::completions::run(shell, &mut cmd)
        }
    }
}
