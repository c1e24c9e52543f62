//! MiniJinja-backed template engine.

use minijinja::{Environment, Value};

use std::collections::HashMap;

use super::TemplateEngine;
use crate::context::{TemplateContext, YIELD_VARIABLE};
use crate::error::RenderError;

/// MiniJinja-based template engine.
///
/// This is the default engine for `.jinja`, `.jinja2` and `.j2` files:
/// - Jinja2-compatible syntax
/// - Loops, conditionals, macros
/// - Custom filters and functions via [`environment_mut`](Self::environment_mut)
///
/// Layouts embed the page body with `{{ yield }}`.
///
/// # Example
///
/// ```rust
/// use folio_render::engine::{MiniJinjaEngine, TemplateEngine};
/// use serde_json::json;
///
/// let engine = MiniJinjaEngine::new();
/// let output = engine
///     .render_template("<main>{{ yield }}</main>", &json!({"yield": "Hello"}))
///     .unwrap();
/// assert_eq!(output, "<main>Hello</main>");
/// assert!(engine.embeds_content("<main>{{ yield }}</main>").unwrap());
/// ```
pub struct MiniJinjaEngine {
    env: Environment<'static>,
}

impl MiniJinjaEngine {
    /// Creates a new MiniJinja engine with default filters registered.
    pub fn new() -> Self {
        let mut env = Environment::new();
        register_filters(&mut env);
        Self { env }
    }

    /// Returns a reference to the underlying MiniJinja environment.
    pub fn environment(&self) -> &Environment<'static> {
        &self.env
    }

    /// Returns a mutable reference to the underlying MiniJinja environment.
    ///
    /// This allows registering custom filters, functions, or configuring
    /// the environment directly before the engine is handed to a registry.
    pub fn environment_mut(&mut self) -> &mut Environment<'static> {
        &mut self.env
    }
}

impl Default for MiniJinjaEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateEngine for MiniJinjaEngine {
    fn render_template(
        &self,
        template: &str,
        data: &serde_json::Value,
    ) -> Result<String, RenderError> {
        let value = Value::from_serialize(data);
        Ok(self.env.render_str(template, value)?)
    }

    fn render_with_context(
        &self,
        template: &str,
        data: &serde_json::Value,
        context: HashMap<String, serde_json::Value>,
    ) -> Result<String, RenderError> {
        // Merge data into context (data takes precedence)
        let mut combined = HashMap::new();
        for (key, value) in context {
            combined.insert(key, Value::from_serialize(&value));
        }

        if let serde_json::Value::Object(map) = data {
            for (key, value) in map {
                combined.insert(key.clone(), Value::from_serialize(value));
            }
        }

        Ok(self.env.render_str(template, &combined)?)
    }

    fn embeds_content(&self, template: &str) -> Result<bool, RenderError> {
        let tmpl = self.env.template_from_str(template)?;
        Ok(tmpl.undeclared_variables(false).contains(YIELD_VARIABLE))
    }

    fn init_context(&self, context: &mut TemplateContext) {
        if let Some(locale) = context.locale().map(str::to_string) {
            context.add_helper("current_locale", serde_json::Value::String(locale));
        }
    }
}

/// Registers folio's filters with a MiniJinja environment.
///
/// This is called automatically by [`MiniJinjaEngine::new`].
pub fn register_filters(env: &mut Environment<'static>) {
    // Strip one trailing file extension: "style.css.scss" -> "style.css"
    env.add_filter("without_ext", |value: String| -> String {
        match value.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() && !stem.ends_with('/') => stem.to_string(),
            _ => value,
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;
    use serde_json::json;
    use std::sync::Arc;

    #[derive(Serialize)]
    struct TestData {
        name: String,
        count: usize,
    }

    #[test]
    fn test_minijinja_engine_simple() {
        let engine = MiniJinjaEngine::new();
        let data = TestData {
            name: "World".into(),
            count: 42,
        };
        let data_value = serde_json::to_value(&data).unwrap();
        let output = engine
            .render_template("Hello, {{ name }}! ({{ count }})", &data_value)
            .unwrap();
        assert_eq!(output, "Hello, World! (42)");
    }

    #[test]
    fn test_minijinja_engine_with_loop() {
        let engine = MiniJinjaEngine::new();
        let data = json!({"items": ["a", "b", "c"]});
        let output = engine
            .render_template("{% for item in items %}{{ item }},{% endfor %}", &data)
            .unwrap();
        assert_eq!(output, "a,b,c,");
    }

    #[test]
    fn test_minijinja_engine_template_error() {
        let engine = MiniJinjaEngine::new();
        let result = engine.render_template("{{ unclosed", &serde_json::Value::Null);
        assert!(matches!(result, Err(RenderError::TemplateError(_))));
    }

    #[test]
    fn test_minijinja_engine_with_context() {
        let engine = MiniJinjaEngine::new();

        let mut context = HashMap::new();
        context.insert("version".to_string(), json!("1.0.0"));
        context.insert("name".to_string(), json!("shadowed"));

        let output = engine
            .render_with_context("{{ name }} v{{ version }}", &json!({"name": "Test"}), context)
            .unwrap();
        assert_eq!(output, "Test v1.0.0");
    }

    #[test]
    fn test_body_is_not_escaped() {
        let engine = MiniJinjaEngine::new();
        let output = engine
            .render_template("<body>{{ yield }}</body>", &json!({"yield": "<h1>Hi</h1>"}))
            .unwrap();
        assert_eq!(output, "<body><h1>Hi</h1></body>");
    }

    #[test]
    fn test_embeds_content() {
        let engine = MiniJinjaEngine::new();
        assert!(engine.embeds_content("<main>{{ yield }}</main>").unwrap());
        assert!(engine
            .embeds_content("{% if yield %}{{ yield }}{% endif %}")
            .unwrap());
        assert!(!engine.embeds_content("<h1>{{ title }}</h1>").unwrap());
    }

    #[test]
    fn test_embeds_content_reports_syntax_errors() {
        let engine = MiniJinjaEngine::new();
        assert!(engine.embeds_content("{% if %}").is_err());
    }

    #[test]
    fn test_init_context_exposes_locale() {
        let engine = MiniJinjaEngine::new();
        let mut ctx = TemplateContext::new(
            Arc::new(serde_json::Map::new()),
            crate::options::RenderOptions::new(),
            Some("de".to_string()),
        );
        engine.init_context(&mut ctx);
        assert_eq!(ctx.helper("current_locale"), Some(&json!("de")));
    }

    #[test]
    fn test_only_site_filters_registered() {
        let engine = MiniJinjaEngine::new();
        let data = json!({"path": "a.txt"});
        assert!(engine.render_template("{{ path | without_ext }}", &data).is_ok());
        assert!(matches!(
            engine.render_template("{{ path | nl }}", &data),
            Err(RenderError::TemplateError(_))
        ));
    }

    #[test]
    fn test_without_ext_filter() {
        let engine = MiniJinjaEngine::new();
        let output = engine
            .render_template("{{ path | without_ext }}", &json!({"path": "style.css.scss"}))
            .unwrap();
        assert_eq!(output, "style.css");
    }
}
