//! Generated JavaScript fragments that depend on the platform table or on
//! per-package lists.
//!
//! Fixed script skeletons live in the Handlebars templates; the pieces here
//! vary in shape with their input and are easier to build line by line.

use crate::loader::params::LoaderTemplateParams;
use crate::loader::platform::{ArchBranch, Os, Platform, arch_branches, platform_candidates, universal_platform};
use nativegen_core::EnvVarNames;

/// Line writer with two-space block indentation.
#[derive(Debug, Default)]
struct ScriptWriter {
    out: String,
    depth: usize,
}

impl ScriptWriter {
    fn line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.out.push_str("  ");
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    /// Writes a line ending in `{` and indents what follows.
    fn open(&mut self, text: &str) {
        self.line(text);
        self.depth += 1;
    }

    /// Writes `} ... {` at the enclosing level.
    fn reopen(&mut self, text: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.open(text);
    }

    fn close(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.line("}");
    }

    fn finish(self) -> String {
        self.out
    }
}

/// Writes one `try { return require(...) } catch` pair per candidate.
fn write_attempts(w: &mut ScriptWriter, params: &LoaderTemplateParams, platform: &Platform) {
    for candidate in platform_candidates(params, platform) {
        w.open("try {");
        w.line(&format!("return require('{}')", candidate.specifier));
        w.reopen("} catch (e) {");
        w.line("loadErrors.push(e)");
        w.close();
    }
}

fn write_arch_branch(w: &mut ScriptWriter, params: &LoaderTemplateParams, branch: &ArchBranch) {
    match (branch.default, branch.musl) {
        (Some(default), Some(musl)) => {
            w.open("if (isMusl()) {");
            write_attempts(w, params, &musl);
            w.reopen("} else {");
            write_attempts(w, params, &default);
            w.close();
        }
        _ => {
            if let Some(platform) = branch.select(false) {
                write_attempts(w, params, &platform);
            }
        }
    }
}

fn write_os_branch(w: &mut ScriptWriter, params: &LoaderTemplateParams, os: Os, branches: &[ArchBranch]) {
    if let Some(universal) = universal_platform(params, os) {
        write_attempts(w, params, &universal);
    }

    if branches.is_empty() {
        return;
    }

    for (index, branch) in branches.iter().enumerate() {
        let condition = format!("(process.arch === '{}') {{", branch.arch);
        if index == 0 {
            w.open(&format!("if {condition}"));
        } else {
            w.reopen(&format!("}} else if {condition}"));
        }
        write_arch_branch(w, params, branch);
    }

    w.reopen("} else {");
    w.line(&format!(
        "loadErrors.push(new Error(`Unsupported architecture on {}: ${{process.arch}}`))",
        os.label()
    ));
    w.close();
}

/// Builds the `requireNative` function of the native host loader.
///
/// The native library path override, when set at runtime, is the only
/// native attempt. Otherwise the host's OS and architecture select
/// candidates from the enabled platforms, in the order reported by
/// [`candidates_for`](crate::loader::candidates_for).
///
/// # Examples
///
/// ```
/// use nativegen_codegen::loader::{LoaderTemplateParams, render_require_native};
/// use nativegen_core::{BinaryName, EnvVarNames, PackageName};
///
/// let params = LoaderTemplateParams::new(
///     BinaryName::new("addon").unwrap(),
///     PackageName::new("addon").unwrap(),
/// );
/// let js = render_require_native(&params, &EnvVarNames::default());
///
/// assert!(js.starts_with("function requireNative() {\n"));
/// assert!(js.contains("return require('./addon.linux-x64-gnu.node')"));
/// ```
#[must_use]
pub fn render_require_native(params: &LoaderTemplateParams, env: &EnvVarNames) -> String {
    let mut w = ScriptWriter::default();
    let override_var = format!("process.env.{}", env.native_library_path);

    w.open("function requireNative() {");
    w.open(&format!("if ({override_var}) {{"));
    w.open("try {");
    w.line(&format!("return require({override_var})"));
    w.reopen("} catch (err) {");
    w.line("loadErrors.push(err)");
    w.close();

    for os in Os::ALL {
        let branches = arch_branches(params, os);
        if branches.is_empty() && universal_platform(params, os).is_none() {
            continue;
        }
        w.reopen(&format!("}} else if (process.platform === '{os}') {{"));
        write_os_branch(&mut w, params, os, &branches);
    }

    w.reopen("} else {");
    w.line("loadErrors.push(new Error(`Unsupported OS: ${process.platform}, architecture: ${process.arch}`))");
    w.close();
    w.close();

    w.finish()
}

/// Builds the function that runs every initializer export once.
///
/// With no initializers the function is still complete and calls nothing.
///
/// # Examples
///
/// ```
/// use nativegen_codegen::loader::render_initializer_stub;
///
/// assert_eq!(
///     render_initializer_stub(&[]),
///     "function __napi_rs_initialize_modules(__napiInstance) {\n}"
/// );
/// assert_eq!(
///     render_initializer_stub(&["init_a".to_string()]),
///     "function __napi_rs_initialize_modules(__napiInstance) {\n  __napiInstance.exports['init_a']?.()\n}"
/// );
/// ```
#[must_use]
pub fn render_initializer_stub(initializers: &[String]) -> String {
    let mut w = ScriptWriter::default();
    w.open("function __napi_rs_initialize_modules(__napiInstance) {");
    for name in initializers {
        w.line(&format!("__napiInstance.exports['{name}']?.()"));
    }
    w.close();

    let mut stub = w.finish();
    stub.truncate(stub.trim_end_matches('\n').len());
    stub
}
