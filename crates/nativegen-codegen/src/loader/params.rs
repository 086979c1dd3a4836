//! Loader generation inputs.

use crate::loader::platform::Platform;
use nativegen_core::{
    BinaryName, DEFAULT_ASYNC_WORK_POOL_SIZE, Error, LoaderConfig, MemoryPages, PackageName,
    Result,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static JS_IDENTIFIER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("valid regex"));

/// Everything a loader template needs for one package.
///
/// # Examples
///
/// ```
/// use nativegen_codegen::loader::LoaderTemplateParams;
/// use nativegen_core::{BinaryName, PackageName};
///
/// let params = LoaderTemplateParams::new(
///     BinaryName::new("addon").unwrap(),
///     PackageName::new("@scope/addon").unwrap(),
/// )
/// .with_initializers(vec!["__napi_register__Counter_0".into()])
/// .with_exports(vec!["Counter".into()]);
///
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoaderTemplateParams {
    /// Base name of the binary files
    pub binary_name: BinaryName,
    /// npm package name, used as the prefix of platform packages
    pub package_name: PackageName,
    /// Wasm exports to call once before module init, in order
    pub initializers: Vec<String>,
    /// Identifiers re-exported from the loaded binding, in order
    pub exports: Vec<String>,
    /// Initial shared memory
    pub initial_memory: MemoryPages,
    /// Maximum shared memory
    pub maximum_memory: MemoryPages,
    /// Include the in-memory filesystem bridge in browser targets
    pub fs: bool,
    /// Default async work pool size for wasm targets
    pub async_work_pool_size: u32,
    /// Native platforms the native host loader dispatches to
    pub platforms: Vec<Platform>,
}

impl LoaderTemplateParams {
    /// Creates params with default memory bounds and every platform enabled.
    #[must_use]
    pub fn new(binary_name: BinaryName, package_name: PackageName) -> Self {
        Self {
            binary_name,
            package_name,
            initializers: Vec::new(),
            exports: Vec::new(),
            initial_memory: MemoryPages::DEFAULT_INITIAL,
            maximum_memory: MemoryPages::MAX,
            fs: false,
            async_work_pool_size: DEFAULT_ASYNC_WORK_POOL_SIZE,
            platforms: Platform::ALL.to_vec(),
        }
    }

    /// Creates params taking memory, filesystem and pool settings from
    /// `config`.
    #[must_use]
    pub fn from_config(
        binary_name: BinaryName,
        package_name: PackageName,
        config: &LoaderConfig,
    ) -> Self {
        Self {
            initial_memory: config.initial_memory,
            maximum_memory: config.maximum_memory,
            fs: config.fs,
            async_work_pool_size: config.async_work_pool_size,
            ..Self::new(binary_name, package_name)
        }
    }

    /// Sets the initializer export names.
    #[must_use]
    pub fn with_initializers(mut self, initializers: Vec<String>) -> Self {
        self.initializers = initializers;
        self
    }

    /// Sets the re-exported identifiers.
    #[must_use]
    pub fn with_exports(mut self, exports: Vec<String>) -> Self {
        self.exports = exports;
        self
    }

    /// Sets the memory bounds.
    #[must_use]
    pub const fn with_memory(mut self, initial: MemoryPages, maximum: MemoryPages) -> Self {
        self.initial_memory = initial;
        self.maximum_memory = maximum;
        self
    }

    /// Enables or disables the filesystem bridge.
    #[must_use]
    pub const fn with_fs(mut self, fs: bool) -> Self {
        self.fs = fs;
        self
    }

    /// Restricts the native platforms. Order follows [`Platform::ALL`]
    /// regardless of the order given.
    #[must_use]
    pub fn with_platforms(mut self, platforms: Vec<Platform>) -> Self {
        self.platforms = Platform::ALL
            .iter()
            .copied()
            .filter(|platform| platforms.contains(platform))
            .collect();
        self
    }

    /// Checks that the params produce valid scripts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] for inconsistent memory bounds or a
    /// zero pool size, and [`Error::ValidationError`] for an initializer or
    /// export that is not a JavaScript identifier.
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

        check_identifiers("initializers", &self.initializers)?;
        check_identifiers("exports", &self.exports)?;

        Ok(())
    }
}

fn check_identifiers(field: &str, names: &[String]) -> Result<()> {
    match names.iter().find(|name| !JS_IDENTIFIER_REGEX.is_match(name)) {
        Some(name) => Err(Error::ValidationError {
            field: field.to_string(),
            reason: format!("'{name}' is not a valid JavaScript identifier"),
        }),
        None => Ok(()),
    }
}

/// Loader script kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoaderTarget {
    /// CommonJS loader for Node.js hosts with native and wasm fallback
    NativeHost,
    /// CommonJS wasm instantiation for Node.js
    WasiNode,
    /// ES module wasm instantiation for browsers
    WasiBrowser,
    /// Node.js worker script for wasm threads
    Worker,
    /// Browser worker script for wasm threads
    BrowserWorker,
}

impl LoaderTarget {
    /// All targets, in generation order.
    pub const ALL: [Self; 5] = [
        Self::NativeHost,
        Self::WasiNode,
        Self::WasiBrowser,
        Self::Worker,
        Self::BrowserWorker,
    ];

    /// Returns the command-line name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NativeHost => "native-host",
            Self::WasiNode => "wasi-node",
            Self::WasiBrowser => "wasi-browser",
            Self::Worker => "worker",
            Self::BrowserWorker => "browser-worker",
        }
    }

    /// Returns the registered template name.
    #[must_use]
    pub const fn template_name(&self) -> &'static str {
        match self {
            Self::NativeHost => "loader/native-host",
            Self::WasiNode => "loader/wasi-node",
            Self::WasiBrowser => "loader/wasi-browser",
            Self::Worker => "loader/wasi-worker",
            Self::BrowserWorker => "loader/wasi-worker-browser",
        }
    }

    /// Returns the output file name.
    ///
    /// # Examples
    ///
    /// ```
    /// use nativegen_codegen::loader::LoaderTarget;
    ///
    /// assert_eq!(LoaderTarget::NativeHost.file_name("addon"), "index.js");
    /// assert_eq!(LoaderTarget::WasiNode.file_name("addon"), "addon.wasi.cjs");
    /// ```
    #[must_use]
    pub fn file_name(&self, binary_name: &str) -> String {
        match self {
            Self::NativeHost => "index.js".to_string(),
            Self::WasiNode => format!("{binary_name}.wasi.cjs"),
            Self::WasiBrowser => "wasi-browser.js".to_string(),
            Self::Worker => "wasi-worker.mjs".to_string(),
            Self::BrowserWorker => "wasi-worker-browser.mjs".to_string(),
        }
    }
}

impl fmt::Display for LoaderTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LoaderTarget {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|target| target.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                Error::InvalidArgument(format!(
                    "unknown loader target '{s}' (expected one of: native-host, wasi-node, wasi-browser, worker, browser-worker)"
                ))
            })
    }
}
