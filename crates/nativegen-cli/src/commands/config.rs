//! Config command implementation.
//!
//! Shows the effective configuration or writes a default `nativegen.toml`.
//!
//! ```toml
//! [typedef]
//! const_enum = true
//!
//! [loader]
//! initial_memory = 4000
//! maximum_memory = 65536
//! fs = false
//! async_work_pool_size = 4
//!
//! [loader.env]
//! native_library_path = "NAPI_RS_NATIVE_LIBRARY_PATH"
//! force_wasi = "NAPI_RS_FORCE_WASI"
//! async_work_pool_size = "NAPI_RS_ASYNC_WORK_POOL_SIZE"
//! libuv_threadpool_size = "UV_THREADPOOL_SIZE"
//! ```

use super::common::{LoadedConfig, write_file};
use crate::actions::ConfigAction;
use anyhow::{Result, bail};
use nativegen_core::NativegenConfig;
use nativegen_core::cli::{ExitCode, OutputFormat};
use serde::Serialize;
use std::path::Path;
use tracing::info;

/// Effective configuration and where it came from.
#[derive(Debug, Serialize)]
struct ConfigReport<'a> {
    /// Source file, or "defaults"
    source: String,
    config: &'a NativegenConfig,
}

/// Result of `config init`.
#[derive(Debug, Serialize)]
struct InitResult {
    path: String,
}

/// Runs the config command.
///
/// # Errors
///
/// Returns an error if the configuration cannot be serialized or written,
/// or if `init` would overwrite a file without `--force`.
pub fn run(action: ConfigAction, loaded: &LoadedConfig, output_format: OutputFormat) -> Result<ExitCode> {
    match action {
        ConfigAction::Show => show(loaded, output_format),
        ConfigAction::Init { path, force } => init(&path, force, output_format),
    }
}

fn show(loaded: &LoadedConfig, output_format: OutputFormat) -> Result<ExitCode> {
    let source = loaded
        .source
        .as_ref()
        .map_or_else(|| "defaults".to_string(), |p| p.display().to_string());

    if output_format == OutputFormat::Text {
        // text mode prints the file as it would be written
        println!("# source: {source}");
        print!("{}", loaded.config.to_toml_string()?);
        return Ok(ExitCode::SUCCESS);
    }

    let report = ConfigReport {
        source,
        config: &loaded.config,
    };
    let formatted = crate::formatters::format_output(&report, output_format)?;
    println!("{formatted}");
    Ok(ExitCode::SUCCESS)
}

fn init(path: &Path, force: bool, output_format: OutputFormat) -> Result<ExitCode> {
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    let content = NativegenConfig::default().to_toml_string()?;
    write_file(path, &content)?;
    info!("Initialized config at {}", path.display());

    let result = InitResult {
        path: path.display().to_string(),
    };
    let formatted = crate::formatters::format_output(&result, output_format)?;
    println!("{formatted}");
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_writes_parseable_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nativegen.toml");

        let code = init(&path, false, OutputFormat::Json).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);

        let written = NativegenConfig::load(&path).unwrap();
        assert_eq!(written, NativegenConfig::default());
    }

    #[test]
    fn test_init_refuses_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nativegen.toml");
        std::fs::write(&path, "# keep me\n").unwrap();

        let err = init(&path, false, OutputFormat::Json).unwrap_err();
        assert!(err.to_string().contains("already exists"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# keep me\n");
    }

    #[test]
    fn test_init_force_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nativegen.toml");
        std::fs::write(&path, "# old\n").unwrap();

        init(&path, true, OutputFormat::Json).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("[loader]"));
    }

    #[test]
    fn test_show_defaults() {
        let loaded = LoadedConfig::default();
        for format in [OutputFormat::Json, OutputFormat::Text, OutputFormat::Pretty] {
            assert_eq!(show(&loaded, format).unwrap(), ExitCode::SUCCESS);
        }
    }

    #[test]
    fn test_report_serializes_source() {
        let config = NativegenConfig::default();
        let report = ConfigReport {
            source: "defaults".to_string(),
            config: &config,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["source"], "defaults");
        assert_eq!(json["config"]["typedef"]["const_enum"], true);
        assert_eq!(json["config"]["loader"]["maximum_memory"], 65536);
    }
}
