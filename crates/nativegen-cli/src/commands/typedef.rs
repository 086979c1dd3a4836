//! Typedef command implementation.
//!
//! Assembles a `.d.ts` document from the intermediate type-definition file
//! and optionally saves the runtime export list as JSON.

use super::common::write_file;
use anyhow::{Context, Result};
use nativegen_codegen::TypeDefAssembler;
use nativegen_core::TypegenConfig;
use nativegen_core::cli::{ExitCode, OutputFormat};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Result of declaration assembly.
#[derive(Debug, Serialize)]
struct TypedefResult {
    /// Intermediate file that was read
    input: String,
    /// Declaration file that was written
    output: String,
    /// Export list file, if requested
    exports_file: Option<String>,
    /// Number of runtime exports
    export_count: usize,
    /// Runtime exports in document order
    exports: Vec<String>,
}

/// Options for the typedef command after flag parsing.
#[derive(Debug, Clone)]
pub struct TypedefOptions {
    /// Intermediate type-definition file
    pub input: PathBuf,
    /// Declaration file to write
    pub output: PathBuf,
    /// Optional export list destination
    pub exports: Option<PathBuf>,
    /// `--no-const-enum`
    pub no_const_enum: bool,
    /// `--header`
    pub header: Option<String>,
}

/// Applies command-line overrides on top of the file configuration.
#[must_use]
pub fn effective_config(base: &TypegenConfig, options: &TypedefOptions) -> TypegenConfig {
    let mut config = base.clone();
    if options.no_const_enum {
        config.const_enum = false;
    }
    if let Some(header) = &options.header {
        let mut header = header.clone();
        if !header.ends_with('\n') {
            header.push('\n');
        }
        config.header = Some(header);
    }
    config
}

fn write_exports(path: &Path, exports: &[String]) -> Result<()> {
    let json = serde_json::to_string_pretty(exports).context("failed to serialize exports")?;
    write_file(path, &(json + "\n"))
}

/// Runs the typedef command.
///
/// A malformed intermediate file yields [`ExitCode::PARSE_ERROR`] and no
/// output is written.
///
/// # Errors
///
/// Returns an error if the input cannot be read or an output cannot be
/// written.
pub fn run(
    options: &TypedefOptions,
    base: &TypegenConfig,
    output_format: OutputFormat,
) -> Result<ExitCode> {
    info!("Assembling declarations from {}", options.input.display());

    let assembler = TypeDefAssembler::new(effective_config(base, options));
    let assembled = match assembler.assemble_file(&options.input) {
        Ok(assembled) => assembled,
        Err(e) if e.is_parse_error() => {
            error!("{}: {e}", options.input.display());
            return Ok(ExitCode::for_error(&e));
        }
        Err(e) => {
            return Err(e).with_context(|| {
                format!("failed to assemble declarations from {}", options.input.display())
            });
        }
    };

    write_file(&options.output, &assembled.dts)?;
    if let Some(path) = &options.exports {
        write_exports(path, &assembled.exports)?;
    }

    let result = TypedefResult {
        input: options.input.display().to_string(),
        output: options.output.display().to_string(),
        exports_file: options.exports.as_ref().map(|p| p.display().to_string()),
        export_count: assembled.exports.len(),
        exports: assembled.exports,
    };

    let formatted = crate::formatters::format_output(&result, output_format)?;
    println!("{formatted}");

    info!(
        "Wrote {} with {} exports",
        result.output, result.export_count
    );

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn options(dir: &Path) -> TypedefOptions {
        TypedefOptions {
            input: dir.join("type-def.jsonl"),
            output: dir.join("index.d.ts"),
            exports: None,
            no_const_enum: false,
            header: None,
        }
    }

    #[test]
    fn test_effective_config_overrides() {
        let temp_dir = TempDir::new().unwrap();
        let mut opts = options(temp_dir.path());
        opts.no_const_enum = true;
        opts.header = Some("// banner".to_string());

        let config = effective_config(&TypegenConfig::default(), &opts);
        assert!(!config.const_enum);
        assert_eq!(config.header.as_deref(), Some("// banner\n"));
    }

    #[test]
    fn test_effective_config_keeps_file_values() {
        let temp_dir = TempDir::new().unwrap();
        let base = TypegenConfig {
            const_enum: false,
            header: Some("// from file\n".to_string()),
        };
        let config = effective_config(&base, &options(temp_dir.path()));
        assert_eq!(config, base);
    }

    #[test]
    fn test_run_writes_declarations_and_exports() {
        let temp_dir = TempDir::new().unwrap();
        let mut opts = options(temp_dir.path());
        opts.exports = Some(temp_dir.path().join("exports.json"));
        std::fs::write(
            &opts.input,
            "{\"kind\":\"fn\",\"name\":\"sum\",\"def\":\"function sum(a: number, b: number): number\"}\n",
        )
        .unwrap();

        let code = run(&opts, &TypegenConfig::default(), OutputFormat::Json).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);

        let dts = std::fs::read_to_string(&opts.output).unwrap();
        assert!(dts.contains("export declare function sum(a: number, b: number): number"));

        let exports: Vec<String> =
            serde_json::from_str(&std::fs::read_to_string(temp_dir.path().join("exports.json")).unwrap())
                .unwrap();
        assert_eq!(exports, ["sum"]);
    }

    #[test]
    fn test_run_malformed_input_returns_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let opts = options(temp_dir.path());
        std::fs::write(&opts.input, "{\"kind\":\"fn\"\n").unwrap();

        let code = run(&opts, &TypegenConfig::default(), OutputFormat::Text).unwrap();
        assert_eq!(code, ExitCode::PARSE_ERROR);
        assert!(!opts.output.exists());
    }

    #[test]
    fn test_run_missing_input_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let opts = options(temp_dir.path());
        assert!(run(&opts, &TypegenConfig::default(), OutputFormat::Text).is_err());
    }
}
