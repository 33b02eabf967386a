//! Template engine for code generation using Handlebars.
//!
//! Wraps Handlebars with the built-in Java and Python templates registered.
//! HTML escaping is disabled: generated sources contain `<`, `>` and `&`
//! which must reach the output unchanged.
//!
//! # Examples
//!
//! ```
//! use svcgen_codegen::template_engine::TemplateEngine;
//! use serde_json::json;
//!
//! let mut engine = TemplateEngine::new().unwrap();
//! engine.register_template_string("greeting", "{{kind}}<{{name}}>").unwrap();
//! let rendered = engine.render("greeting", &json!({"kind": "List", "name": "Query"})).unwrap();
//! assert_eq!(rendered, "List<Query>");
//! ```

use handlebars::Handlebars;
use serde::Serialize;
use svcgen_core::{Error, Result};

/// Template rendering a Java contract interface.
pub const JAVA_CONTRACT: &str = "java/contract";
/// Template rendering a Java default implementation class.
pub const JAVA_DEFAULT_IMPL: &str = "java/default_impl";
/// Template rendering a Python service binding.
pub const PYTHON_SERVICE: &str = "python/service";

/// Template engine for code generation.
///
/// # Thread Safety
///
/// This type is `Send` and `Sync`; generators share one instance.
#[derive(Debug)]
pub struct TemplateEngine<'a> {
    handlebars: Handlebars<'a>,
}

impl<'a> TemplateEngine<'a> {
    /// Creates a new template engine with the built-in templates registered.
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

        Self::register_java_templates(&mut handlebars)?;
        Self::register_python_templates(&mut handlebars)?;

        Ok(Self { handlebars })
    }

    fn register_java_templates(handlebars: &mut Handlebars<'a>) -> Result<()> {
        register(
            handlebars,
            JAVA_CONTRACT,
            include_str!("../templates/java/contract.java.hbs"),
        )?;
        register(
            handlebars,
            JAVA_DEFAULT_IMPL,
            include_str!("../templates/java/default_impl.java.hbs"),
        )
    }

    fn register_python_templates(handlebars: &mut Handlebars<'a>) -> Result<()> {
        register(
            handlebars,
            PYTHON_SERVICE,
            include_str!("../templates/python/service.py.hbs"),
        )
    }

    /// Renders a template with the given context.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TemplateError`] if the template is not registered,
    /// the context cannot be serialized, or a referenced variable is
    /// missing.
    pub fn render<T: Serialize>(&self, template_name: &str, context: &T) -> Result<String> {
        self.handlebars
            .render(template_name, context)
            .map_err(|e| Error::TemplateError {
                template: template_name.to_string(),
                message: e.to_string(),
            })
    }

    /// Registers a custom template, replacing any template of that name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TemplateError`] if the template string is invalid.
    pub fn register_template_string(&mut self, name: &str, template: &str) -> Result<()> {
        register(&mut self.handlebars, name, template)
    }

    /// Returns `true` if a template of that name is registered.
    #[must_use]
    pub fn has_template(&self, name: &str) -> bool {
        self.handlebars.has_template(name)
    }
}

fn register(handlebars: &mut Handlebars<'_>, name: &str, template: &str) -> Result<()> {
    handlebars
        .register_template_string(name, template)
        .map_err(|e| Error::TemplateError {
            template: name.to_string(),
            message: format!("failed to register: {e}"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_template_engine_creation() {
        let engine = TemplateEngine::new().unwrap();
        assert!(engine.has_template(JAVA_CONTRACT));
        assert!(engine.has_template(JAVA_DEFAULT_IMPL));
        assert!(engine.has_template(PYTHON_SERVICE));
    }

    #[test]
    fn test_render_contract_template() {
        let engine = TemplateEngine::new().unwrap();
        let context = json!({
            "namespace": "com.acme",
            "class_name": "SearchService",
            "methods": [
                {"declaration": "com.acme.Hit find(com.acme.Query input)", "body": []}
            ]
        });

        let rendered = engine.render(JAVA_CONTRACT, &context).unwrap();
        assert!(rendered.trim_start().starts_with("package com.acme;"));
        assert!(rendered.contains("public interface SearchService {"));
        assert!(rendered.contains("    com.acme.Hit find(com.acme.Query input);"));
    }

    #[test]
    fn test_render_contract_without_namespace() {
        let engine = TemplateEngine::new().unwrap();
        let context = json!({"namespace": "", "class_name": "S", "methods": []});

        let rendered = engine.render(JAVA_CONTRACT, &context).unwrap();
        assert!(!rendered.contains("package"));
        assert!(rendered.contains("public interface S {"));
    }

    #[test]
    fn test_generics_are_not_escaped() {
        let mut engine = TemplateEngine::new().unwrap();
        engine.register_template_string("t", "{{value}}").unwrap();

        let rendered = engine
            .render("t", &json!({"value": "java.util.Map<java.lang.String, java.lang.String> & more"}))
            .unwrap();
        assert_eq!(rendered, "java.util.Map<java.lang.String, java.lang.String> & more");
    }

    #[test]
    fn test_render_nonexistent_template() {
        let engine = TemplateEngine::new().unwrap();
        let err = engine.render("nonexistent/template", &json!({})).unwrap_err();
        assert!(err.is_template_error());
        assert!(err.to_string().contains("nonexistent/template"));
    }

    #[test]
    fn test_strict_mode_fails_on_missing_variable() {
        let engine = TemplateEngine::new().unwrap();
        let result = engine.render(PYTHON_SERVICE, &json!({"class_name": "X"}));
        assert!(result.is_err());
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
    fn test_engine_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TemplateEngine>();
    }
}
