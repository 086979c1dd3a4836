//! Loader script generator.
//!
//! One render function per target. Each validates the params, builds a
//! template context, and renders the matching Handlebars template.

use crate::common::{GeneratedCode, GeneratedFile};
use crate::loader::dispatch::{render_initializer_stub, render_require_native};
use crate::loader::params::{LoaderTarget, LoaderTemplateParams};
use crate::template_engine::TemplateEngine;
use nativegen_core::{EnvVarNames, Result};
use serde::Serialize;

/// Values visible to every loader template.
#[derive(Debug, Serialize)]
struct LoaderContext<'p> {
    binary_name: &'p str,
    package_name: &'p str,
    exports: &'p [String],
    initial_memory: u32,
    maximum_memory: u32,
    fs: bool,
    async_work_pool_size: u32,
    env: &'p EnvVarNames,
    /// `requireNative` function; empty outside the native host loader
    dispatch: String,
    initializer_stub: String,
}

/// Generates loader scripts from [`LoaderTemplateParams`].
///
/// # Examples
///
/// ```
/// use nativegen_codegen::loader::{LoaderGenerator, LoaderTemplateParams};
/// use nativegen_core::{BinaryName, PackageName};
///
/// let generator = LoaderGenerator::new().unwrap();
/// let params = LoaderTemplateParams::new(
///     BinaryName::new("addon").unwrap(),
///     PackageName::new("addon").unwrap(),
/// )
/// .with_exports(vec!["sum".into()]);
///
/// let code = generator.generate_all(&params).unwrap();
/// assert_eq!(code.file_count(), 5);
///
/// let index = code.get("index.js").unwrap();
/// assert!(index.content().contains("module.exports.sum = nativeBinding.sum"));
/// ```
#[derive(Debug)]
pub struct LoaderGenerator<'a> {
    engine: TemplateEngine<'a>,
    env: EnvVarNames,
}

impl LoaderGenerator<'_> {
    /// Creates a generator using the default environment variable names.
    ///
    /// # Errors
    ///
    /// Returns an error if the built-in templates fail to register.
    pub fn new() -> Result<Self> {
        Ok(Self {
            engine: TemplateEngine::new()?,
            env: EnvVarNames::default(),
        })
    }

    /// Replaces the environment variable names baked into scripts.
    #[must_use]
    pub fn with_env(mut self, env: EnvVarNames) -> Self {
        self.env = env;
        self
    }

    /// Returns the environment variable names in use.
    #[must_use]
    pub const fn env(&self) -> &EnvVarNames {
        &self.env
    }

    fn context<'p>(
        &'p self,
        params: &'p LoaderTemplateParams,
        dispatch: String,
    ) -> LoaderContext<'p> {
        LoaderContext {
            binary_name: params.binary_name.as_str(),
            package_name: params.package_name.as_str(),
            exports: &params.exports,
            initial_memory: params.initial_memory.get(),
            maximum_memory: params.maximum_memory.get(),
            fs: params.fs,
            async_work_pool_size: params.async_work_pool_size,
            env: &self.env,
            dispatch,
            initializer_stub: render_initializer_stub(&params.initializers),
        }
    }

    fn render_target(
        &self,
        target: LoaderTarget,
        params: &LoaderTemplateParams,
        dispatch: String,
    ) -> Result<String> {
        params.validate()?;
        let rendered = self
            .engine
            .render(target.template_name(), &self.context(params, dispatch))?;
        tracing::debug!("Rendered {} loader ({} bytes)", target, rendered.len());
        Ok(rendered)
    }

    /// Renders the CommonJS loader for Node.js hosts.
    ///
    /// The script detects the host platform, tries native candidates, then
    /// the wasm fallbacks, and throws with every collected failure as
    /// `cause` when nothing loads.
    ///
    /// # Errors
    ///
    /// Returns an error if `params` fail validation or rendering fails.
    pub fn render_native_host(&self, params: &LoaderTemplateParams) -> Result<String> {
        let dispatch = render_require_native(params, &self.env);
        self.render_target(LoaderTarget::NativeHost, params, dispatch)
    }

    /// Renders the Node.js wasm instantiation script.
    ///
    /// # Errors
    ///
    /// Returns an error if `params` fail validation or rendering fails.
    pub fn render_wasi_node(&self, params: &LoaderTemplateParams) -> Result<String> {
        self.render_target(LoaderTarget::WasiNode, params, String::new())
    }

    /// Renders the browser ES module. Browsers only load the wasm binary.
    ///
    /// # Errors
    ///
    /// Returns an error if `params` fail validation or rendering fails.
    pub fn render_wasi_browser(&self, params: &LoaderTemplateParams) -> Result<String> {
        self.render_target(LoaderTarget::WasiBrowser, params, String::new())
    }

    /// Renders the Node.js wasm thread worker.
    ///
    /// # Errors
    ///
    /// Returns an error if `params` fail validation or rendering fails.
    pub fn render_worker(&self, params: &LoaderTemplateParams) -> Result<String> {
        self.render_target(LoaderTarget::Worker, params, String::new())
    }

    /// Renders the browser wasm thread worker.
    ///
    /// # Errors
    ///
    /// Returns an error if `params` fail validation or rendering fails.
    pub fn render_browser_worker(&self, params: &LoaderTemplateParams) -> Result<String> {
        self.render_target(LoaderTarget::BrowserWorker, params, String::new())
    }

    /// Renders one target into a file named by its convention.
    ///
    /// # Errors
    ///
    /// Returns an error if `params` fail validation or rendering fails.
    pub fn generate(
        &self,
        target: LoaderTarget,
        params: &LoaderTemplateParams,
    ) -> Result<GeneratedFile> {
        let content = match target {
            LoaderTarget::NativeHost => self.render_native_host(params)?,
            LoaderTarget::WasiNode => self.render_wasi_node(params)?,
            LoaderTarget::WasiBrowser => self.render_wasi_browser(params)?,
            LoaderTarget::Worker => self.render_worker(params)?,
            LoaderTarget::BrowserWorker => self.render_browser_worker(params)?,
        };

        Ok(GeneratedFile::new(
            target.file_name(params.binary_name.as_str()),
            content,
        ))
    }

    /// Renders every target.
    ///
    /// # Errors
    ///
    /// Returns the first validation or rendering error.
    pub fn generate_all(&self, params: &LoaderTemplateParams) -> Result<GeneratedCode> {
        self.generate_targets(&LoaderTarget::ALL, params)
    }

    /// Renders the given targets in order.
    ///
    /// # Errors
    ///
    /// Returns the first validation or rendering error.
    pub fn generate_targets(
        &self,
        targets: &[LoaderTarget],
        params: &LoaderTemplateParams,
    ) -> Result<GeneratedCode> {
        tracing::info!(
            "Generating {} loader file(s) for {}",
            targets.len(),
            params.package_name
        );

        let mut code = GeneratedCode::new();
        for target in targets {
            code.add_file(self.generate(*target, params)?);
        }
        Ok(code)
    }
}
