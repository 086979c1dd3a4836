//! Configuration types for nativegen.
//!
//! Holds the knobs consumed by the type-definition assembler and the loader
//! generator. Every section has a `Default`, and a whole configuration can
//! be read from a `nativegen.toml` file.
//!
//! # Examples
//!
//! ```
//! use nativegen_core::{NativegenConfig, MemoryPages};
//!
//! let config = NativegenConfig::from_toml_str(r#"
//! [typedef]
//! const_enum = false
//!
//! [loader]
//! initial_memory = 1024
//! fs = true
//! "#).unwrap();
//!
//! assert!(!config.typedef.const_enum);
//! assert_eq!(config.loader.initial_memory, MemoryPages::new(1024).unwrap());
//! assert_eq!(config.loader.maximum_memory, MemoryPages::MAX);
//! ```

use crate::{Error, MemoryPages, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Header written at the top of every generated declaration file unless a
/// custom header is configured.
pub const DEFAULT_TYPE_DEF_HEADER: &str = "/* auto-generated by NAPI-RS */\n/* eslint-disable */\n";

/// Default async work pool size for wasm targets.
pub const DEFAULT_ASYNC_WORK_POOL_SIZE: u32 = 4;

/// Settings for the type-definition assembler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypegenConfig {
    /// Render enums as `const enum`.
    ///
    /// When disabled, string enums collapse into string-literal union
    /// type aliases.
    /// Default: true
    pub const_enum: bool,

    /// Custom header replacing [`DEFAULT_TYPE_DEF_HEADER`].
    pub header: Option<String>,
}

impl Default for TypegenConfig {
    fn default() -> Self {
        Self {
            const_enum: true,
            header: None,
        }
    }
}

impl TypegenConfig {
    /// Returns the header text to prepend to generated declarations.
    ///
    /// # Examples
    ///
    /// ```
    /// use nativegen_core::{TypegenConfig, DEFAULT_TYPE_DEF_HEADER};
    ///
    /// assert_eq!(TypegenConfig::default().header_text(), DEFAULT_TYPE_DEF_HEADER);
    ///
    /// let custom = TypegenConfig { header: Some("// custom\n".into()), ..Default::default() };
    /// assert_eq!(custom.header_text(), "// custom\n");
    /// ```
    #[must_use]
    pub fn header_text(&self) -> &str {
        self.header.as_deref().unwrap_or(DEFAULT_TYPE_DEF_HEADER)
    }
}

/// Names of the environment variables consulted by generated loaders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvVarNames {
    /// Absolute path override for the native library.
    pub native_library_path: String,
    /// Forces the WebAssembly fallback even when a native binary loads.
    pub force_wasi: String,
    /// Overrides the wasm async work pool size.
    pub async_work_pool_size: String,
    /// Secondary pool size override shared with libuv.
    pub libuv_threadpool_size: String,
}

impl Default for EnvVarNames {
    fn default() -> Self {
        Self {
            native_library_path: "NAPI_RS_NATIVE_LIBRARY_PATH".to_string(),
            force_wasi: "NAPI_RS_FORCE_WASI".to_string(),
            async_work_pool_size: "NAPI_RS_ASYNC_WORK_POOL_SIZE".to_string(),
            libuv_threadpool_size: "UV_THREADPOOL_SIZE".to_string(),
        }
    }
}

/// Settings for the loader generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Initial shared linear memory.
    /// Default: 4000 pages
    pub initial_memory: MemoryPages,

    /// Maximum shared linear memory.
    /// Default: 65536 pages
    pub maximum_memory: MemoryPages,

    /// Include the in-memory filesystem bridge in browser targets.
    /// Default: false
    pub fs: bool,

    /// Worker pool size used when no env override is set.
    /// Default: 4
    pub async_work_pool_size: u32,

    /// Environment variable names baked into generated scripts.
    pub env: EnvVarNames,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            initial_memory: MemoryPages::DEFAULT_INITIAL,
            maximum_memory: MemoryPages::MAX,
            fs: false,
            async_work_pool_size: DEFAULT_ASYNC_WORK_POOL_SIZE,
            env: EnvVarNames::default(),
        }
    }
}

impl LoaderConfig {
    /// Checks cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the initial memory exceeds the
    /// maximum, the pool size is zero, or an env var name is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use nativegen_core::{LoaderConfig, MemoryPages};
    ///
    /// assert!(LoaderConfig::default().validate().is_ok());
    ///
    /// let bad = LoaderConfig {
    ///     initial_memory: MemoryPages::new(200).unwrap(),
    ///     maximum_memory: MemoryPages::new(100).unwrap(),
    ///     ..Default::default()
    /// };
    /// assert!(bad.validate().unwrap_err().is_config_error());
    /// ```
    pub fn validate(&self) -> Result<()> {
        if self.initial_memory > self.maximum_memory {
            return Err(Error::ConfigError {
                message: format!(
                    "initial memory ({} pages) exceeds maximum memory ({} pages)",
                    self.initial_memory, self.maximum_memory
                ),
            });
        }

        if self.async_work_pool_size == 0 {
            return Err(Error::ConfigError {
                message: "async work pool size must be at least 1".to_string(),
            });
        }

        let env = &self.env;
        for (key, value) in [
            ("native_library_path", &env.native_library_path),
            ("force_wasi", &env.force_wasi),
            ("async_work_pool_size", &env.async_work_pool_size),
            ("libuv_threadpool_size", &env.libuv_threadpool_size),
        ] {
            if value.is_empty() || !value.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                return Err(Error::ConfigError {
                    message: format!("env.{key} must be a non-empty identifier, got '{value}'"),
                });
            }
        }

        Ok(())
    }
}

/// Complete configuration file contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NativegenConfig {
    /// `[typedef]` section
    pub typedef: TypegenConfig,
    /// `[loader]` section
    pub loader: LoaderConfig,
}

impl NativegenConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the TOML is malformed or fails
    /// [`LoaderConfig::validate`].
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| Error::ConfigError {
            message: format!("failed to parse config: {e}"),
        })?;
        config.loader.validate()?;
        Ok(config)
    }

    /// Reads a configuration file from disk.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read, or the errors of
    /// [`NativegenConfig::from_toml_str`].
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("Loaded config from {}", path.display());
        Self::from_toml_str(&content)
    }

    /// Serializes the configuration as pretty TOML.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if serialization fails.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::ConfigError {
            message: format!("failed to serialize config: {e}"),
        })
    }
}
