//! Template engine for loader generation using Handlebars.
//!
//! Wraps Handlebars with the built-in loader templates pre-registered.
//! Output is JavaScript, so HTML escaping is disabled.
//!
//! # Examples
//!
//! ```
//! use nativegen_codegen::template_engine::TemplateEngine;
//! use serde_json::json;
//!
//! let mut engine = TemplateEngine::new().unwrap();
//! engine.register_template_string("banner", "// {{name}} <generated>").unwrap();
//!
//! let out = engine.render("banner", &json!({"name": "addon"})).unwrap();
//! assert_eq!(out, "// addon <generated>");
//! ```

use handlebars::Handlebars;
use nativegen_core::{Error, Result};
use serde::Serialize;

/// Built-in loader templates: (registered name, source).
const LOADER_TEMPLATES: &[(&str, &str)] = &[
    (
        "loader/native-host",
        include_str!("../templates/loader/native-host.cjs.hbs"),
    ),
    (
        "loader/wasi-node",
        include_str!("../templates/loader/wasi-node.cjs.hbs"),
    ),
    (
        "loader/wasi-browser",
        include_str!("../templates/loader/wasi-browser.js.hbs"),
    ),
    (
        "loader/wasi-worker",
        include_str!("../templates/loader/wasi-worker.mjs.hbs"),
    ),
    (
        "loader/wasi-worker-browser",
        include_str!("../templates/loader/wasi-worker-browser.mjs.hbs"),
    ),
];

/// Template engine for code generation.
///
/// # Thread Safety
///
/// This type is `Send` and `Sync`; one engine can be shared across threads.
#[derive(Debug)]
pub struct TemplateEngine<'a> {
    handlebars: Handlebars<'a>,
}

impl<'a> TemplateEngine<'a> {
    /// Creates a new template engine with the loader templates registered.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TemplateError`] if a built-in template fails to
    /// parse.
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();

        // Strict mode: fail on missing variables
        handlebars.set_strict_mode(true);
        handlebars.register_escape_fn(handlebars::no_escape);

        Self::register_loader_templates(&mut handlebars)?;

        Ok(Self { handlebars })
    }

    fn register_loader_templates(handlebars: &mut Handlebars<'a>) -> Result<()> {
        for (name, source) in LOADER_TEMPLATES {
            handlebars
                .register_template_string(name, source)
                .map_err(|e| Error::TemplateError {
                    template: (*name).to_string(),
                    message: format!("failed to register template: {e}"),
                })?;
        }

        tracing::debug!("Registered {} loader templates", LOADER_TEMPLATES.len());

        Ok(())
    }

    /// Renders a template with the given context.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TemplateError`] if the template is not registered,
    /// references a missing variable, or fails to render.
    pub fn render<T: Serialize>(&self, template_name: &str, context: &T) -> Result<String> {
        self.handlebars
            .render(template_name, context)
            .map_err(|e| Error::TemplateError {
                template: template_name.to_string(),
                message: e.to_string(),
            })
    }

    /// Registers an additional template, replacing any template of the same
    /// name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TemplateError`] if the template string is invalid.
    pub fn register_template_string(&mut self, name: &str, template: &str) -> Result<()> {
        self.handlebars
            .register_template_string(name, template)
            .map_err(|e| Error::TemplateError {
                template: name.to_string(),
                message: format!("failed to register template: {e}"),
            })
    }

    /// Returns `true` if a template with this name is registered.
    #[must_use]
    pub fn has_template(&self, name: &str) -> bool {
        self.handlebars.has_template(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // ========================================================================
    // Registration Tests
    // ========================================================================

    #[test]
    fn test_builtin_templates_registered() {
        let engine = TemplateEngine::new().unwrap();
        for (name, _) in LOADER_TEMPLATES {
            assert!(engine.has_template(name), "missing template {name}");
        }
    }

    #[test]
    fn test_register_invalid_template_syntax() {
        let mut engine = TemplateEngine::new().unwrap();
        let err = engine
            .register_template_string("invalid", "Hello {{name")
            .unwrap_err();
        assert!(err.is_template_error());
    }

    #[test]
    fn test_custom_template_override() {
        let mut engine = TemplateEngine::new().unwrap();
        engine.register_template_string("t", "one").unwrap();
        engine.register_template_string("t", "two").unwrap();
        assert_eq!(engine.render("t", &json!({})).unwrap(), "two");
    }

    // ========================================================================
    // Rendering Tests
    // ========================================================================

    #[test]
    fn test_render_nonexistent_template() {
        let engine = TemplateEngine::new().unwrap();
        let err = engine.render("loader/missing", &json!({})).unwrap_err();
        assert!(matches!(err, Error::TemplateError { ref template, .. } if template == "loader/missing"));
    }

    #[test]
    fn test_output_is_not_html_escaped() {
        let mut engine = TemplateEngine::new().unwrap();
        engine
            .register_template_string("js", "const s = '{{value}}'")
            .unwrap();
        let out = engine.render("js", &json!({"value": "a<b && c>'d'"})).unwrap();
        assert_eq!(out, "const s = 'a<b && c>'d''");
    }

    #[test]
    fn test_strict_mode_fails_on_missing_variable() {
        let mut engine = TemplateEngine::new().unwrap();
        engine
            .register_template_string("strict", "Value: {{missing_var}}")
            .unwrap();
        let result = engine.render("strict", &json!({"other_var": "value"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_concurrent_template_usage() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TemplateEngine>();
    }
}
