//! Shared helpers for command implementations.
//!
//! Configuration is looked up in this order:
//! 1. the `--config` flag (or `NATIVEGEN_CONFIG`)
//! 2. `nativegen.toml` in the current directory
//! 3. `nativegen/config.toml` in the user config directory
//!
//! When none exists the defaults are used.

use anyhow::{Context, Result};
use nativegen_core::NativegenConfig;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "nativegen.toml";

/// Configuration together with the file it came from.
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    /// Parsed configuration
    pub config: NativegenConfig,
    /// Source file, `None` when defaults are used
    pub source: Option<PathBuf>,
}

/// Returns the per-user configuration path.
///
/// - Linux: `~/.config/nativegen/config.toml`
/// - macOS: `~/Library/Application Support/nativegen/config.toml`
/// - Windows: `%APPDATA%\nativegen\config.toml`
#[must_use]
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("nativegen").join("config.toml"))
}

/// Resolves which configuration file applies, if any.
///
/// An explicit path is returned as is, even if it does not exist, so that
/// loading it reports the missing file.
#[must_use]
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.is_file() {
        return Some(local);
    }

    user_config_path().filter(|path| path.is_file())
}

/// Loads the configuration using the lookup order above.
///
/// # Errors
///
/// Returns an error if the selected file cannot be read or is invalid.
pub fn load_config(explicit: Option<&Path>) -> Result<LoadedConfig> {
    let Some(path) = resolve_config_path(explicit) else {
        debug!("No config file found, using defaults");
        return Ok(LoadedConfig::default());
    };

    let config = NativegenConfig::load(&path)
        .with_context(|| format!("failed to load config from {}", path.display()))?;

    Ok(LoadedConfig {
        config,
        source: Some(path),
    })
}

/// Writes `content` to `path`, creating parent directories.
///
/// # Errors
///
/// Returns an error if a directory or the file cannot be written.
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    std::fs::write(path, content)
        .with_context(|| format!("failed to write {}", path.display()))?;
    debug!("Wrote {} ({} bytes)", path.display(), content.len());
    Ok(())
}
