//! Loader command implementation.
//!
//! Builds [`LoaderTemplateParams`] from the configuration file and the
//! command-line flags, renders the requested targets and writes them into
//! the output directory.

use anyhow::{Context, Result};
use nativegen_codegen::loader::{LoaderGenerator, LoaderTarget, LoaderTemplateParams, Platform};
use nativegen_core::cli::{ExitCode, OutputFormat};
use nativegen_core::{BinaryName, LoaderConfig, MemoryPages, PackageName};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Result of loader generation.
#[derive(Debug, Serialize)]
struct LoaderResult {
    /// Package the loaders belong to
    package_name: String,
    /// Directory the files were written to
    output_dir: String,
    /// Generated file names
    files: Vec<String>,
    /// Number of platforms the native loader dispatches to
    platform_count: usize,
}

/// Options for the loader command after flag parsing.
#[derive(Debug, Clone, Default)]
pub struct LoaderOptions {
    /// `--binary-name`
    pub binary_name: String,
    /// `--package-name`
    pub package_name: String,
    /// Repeated `--export`
    pub exports: Vec<String>,
    /// `--exports-from`
    pub exports_from: Option<PathBuf>,
    /// Repeated `--initializer`
    pub initializers: Vec<String>,
    /// Repeated `--target`; empty means all
    pub targets: Vec<String>,
    /// Repeated `--platform`; empty means all
    pub platforms: Vec<String>,
    /// `--fs` or `--no-fs`; unset keeps the configured value
    pub fs: Option<bool>,
    /// `--initial-memory`
    pub initial_memory: Option<u32>,
    /// `--maximum-memory`
    pub maximum_memory: Option<u32>,
    /// `--async-work-pool-size`
    pub async_work_pool_size: Option<u32>,
    /// `--output-dir`
    pub output_dir: PathBuf,
}

/// Applies command-line overrides on top of the file configuration.
///
/// # Errors
///
/// Returns an error if a memory size is out of range.
pub fn effective_config(base: &LoaderConfig, options: &LoaderOptions) -> Result<LoaderConfig> {
    let mut config = base.clone();
    if let Some(pages) = options.initial_memory {
        config.initial_memory = MemoryPages::new(pages)?;
    }
    if let Some(pages) = options.maximum_memory {
        config.maximum_memory = MemoryPages::new(pages)?;
    }
    if let Some(size) = options.async_work_pool_size {
        config.async_work_pool_size = size;
    }
    if let Some(fs) = options.fs {
        config.fs = fs;
    }
    Ok(config)
}

/// Reads a JSON array of export names.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a string array.
pub fn read_exports_file(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read exports file {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("exports file {} is not a JSON string array", path.display()))
}

/// Parses target names; no names selects every target.
///
/// # Errors
///
/// Returns an error naming the first unknown target.
pub fn parse_targets(names: &[String]) -> Result<Vec<LoaderTarget>> {
    if names.is_empty() {
        return Ok(LoaderTarget::ALL.to_vec());
    }
    let mut targets = Vec::with_capacity(names.len());
    for name in names {
        let target: LoaderTarget = name.parse()?;
        if !targets.contains(&target) {
            targets.push(target);
        }
    }
    Ok(targets)
}

/// Parses platform triples.
///
/// # Errors
///
/// Returns an error naming the first unknown triple.
pub fn parse_platforms(triples: &[String]) -> Result<Vec<Platform>> {
    triples
        .iter()
        .map(|triple| triple.parse::<Platform>().map_err(anyhow::Error::from))
        .collect()
}

/// Builds template params from options and configuration.
///
/// # Errors
///
/// Returns an error if a name, triple, memory size or export file is
/// invalid.
pub fn build_params(options: &LoaderOptions, config: &LoaderConfig) -> Result<LoaderTemplateParams> {
    let binary_name = BinaryName::new(options.binary_name.as_str())?;
    let package_name = PackageName::new(options.package_name.as_str())?;

    let mut exports = match &options.exports_from {
        Some(path) => read_exports_file(path)?,
        None => Vec::new(),
    };
    for name in &options.exports {
        if !exports.contains(name) {
            exports.push(name.clone());
        }
    }

    let mut params = LoaderTemplateParams::from_config(binary_name, package_name, config)
        .with_exports(exports)
        .with_initializers(options.initializers.clone());
    if !options.platforms.is_empty() {
        params = params.with_platforms(parse_platforms(&options.platforms)?);
    }
    Ok(params)
}

/// Runs the loader command.
///
/// Invalid names, triples or sizes yield [`ExitCode::INVALID_INPUT`] and
/// nothing is written.
///
/// # Errors
///
/// Returns an error if the templates fail to render or a file cannot be
/// written.
pub fn run(
    options: &LoaderOptions,
    base: &LoaderConfig,
    output_format: OutputFormat,
) -> Result<ExitCode> {
    info!("Generating loaders for {}", options.package_name);

    let prepared = effective_config(base, options).and_then(|config| {
        let params = build_params(options, &config)?;
        params.validate()?;
        let targets = parse_targets(&options.targets)?;
        Ok((config, params, targets))
    });
    let (config, params, targets) = match prepared {
        Ok(prepared) => prepared,
        Err(e) => {
            error!("{e:#}");
            let code = e
                .downcast_ref::<nativegen_core::Error>()
                .map_or(ExitCode::INVALID_INPUT, ExitCode::for_error);
            return Ok(code);
        }
    };

    let generator = LoaderGenerator::new()
        .context("failed to initialize loader generator")?
        .with_env(config.env);
    let code = generator
        .generate_targets(&targets, &params)
        .context("failed to generate loaders")?;
    code.write_to(&options.output_dir)
        .with_context(|| format!("failed to write loaders to {}", options.output_dir.display()))?;

    let result = LoaderResult {
        package_name: params.package_name.to_string(),
        output_dir: options.output_dir.display().to_string(),
        files: code.files().map(|f| f.path().to_string()).collect(),
        platform_count: params.platforms.len(),
    };

    let formatted = crate::formatters::format_output(&result, output_format)?;
    println!("{formatted}");

    info!("Wrote {} loader file(s)", result.files.len());

    Ok(ExitCode::SUCCESS)
}
