//! Shell completion generation command.
//!
//! Generates shell completion scripts for bash, zsh, fish, elvish and
//! `PowerShell`.

use anyhow::Result;
use clap::Command;
use clap_complete::{Shell, generate};
use nativegen_core::cli::ExitCode;
use std::io::{self, Write};
use tracing::info;

/// Writes the completion script for `shell` into `out`.
///
/// # Examples
///
/// ```
/// use clap::Command;
/// use clap_complete::Shell;
/// use nativegen_cli::commands::completions;
///
/// let mut cmd = Command::new("nativegen").subcommand(Command::new("typedef"));
/// let mut script = Vec::new();
/// completions::generate_completions(Shell::Bash, &mut cmd, &mut script);
/// assert!(String::from_utf8(script).unwrap().contains("nativegen"));
/// ```
pub fn generate_completions(shell: Shell, cmd: &mut Command, out: &mut dyn Write) {
    let name = cmd.get_name().to_string();
    generate(shell, cmd, name, out);
}

/// Runs the completions command, printing the script to stdout.
///
/// # Errors
///
/// Returns an error if stdout cannot be flushed.
pub fn run(shell: Shell, cmd: &mut Command) -> Result<ExitCode> {
    info!("Generating {shell} completions");
    let mut stdout = io::stdout().lock();
    generate_completions(shell, cmd, &mut stdout);
    stdout.flush()?;
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::CommandFactory;

    fn script(shell: Shell) -> String {
        let mut out = Vec::new();
        generate_completions(shell, &mut Cli::command(), &mut out);
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_bash_lists_subcommands() {
        let script = script(Shell::Bash);
        for sub in ["typedef", "loader", "config", "completions"] {
            assert!(script.contains(sub), "missing {sub}");
        }
    }

    #[test]
    fn test_zsh_includes_loader_flags() {
        let script = script(Shell::Zsh);
        assert!(script.contains("--binary-name"));
        assert!(script.contains("--package-name"));
    }

    #[test]
    fn test_fish_and_powershell_non_empty() {
        assert!(!script(Shell::Fish).is_empty());
        assert!(!script(Shell::PowerShell).is_empty());
    }
}
