//! Simple template engine using format-string style substitution.
//!
//! This module provides [`SimpleEngine`], a lightweight template engine that uses
//! `{variable}` syntax for variable substitution. It is meant for `.tmpl` files
//! that only need values dropped into place.
//!
//! # Syntax
//!
//! - `{name}` - Simple variable substitution
//! - `{user.name}` - Nested property access via dot notation
//! - `{items.0}` - Array index access
//! - `{yield}` - The page body, in layouts
//! - `{{` and `}}` - Escaped braces (renders as `{` and `}`)
//!
//! # Example
//!
//! ```rust
//! use folio_render::engine::{SimpleEngine, TemplateEngine};
//! use serde_json::json;
//!
//! let engine = SimpleEngine::new();
//! let data = json!({"name": "World", "user": {"email": "test@example.com"}});
//!
//! let output = engine.render_template(
//!     "Hello, {name}! Contact: {user.email}",
//!     &data,
//! ).unwrap();
//!
//! assert_eq!(output, "Hello, World! Contact: test@example.com");
//! ```

use std::collections::HashMap;

use crate::context::YIELD_VARIABLE;
use crate::error::RenderError;

use super::TemplateEngine;

/// A parsed piece of a simple template.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Variable(String),
}

/// A lightweight template engine using format-string style substitution.
///
/// No loops, conditionals, filters or includes. Missing variables are left in
/// place (`{missing}`) so they are easy to spot in generated pages.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleEngine;

impl SimpleEngine {
    /// Creates a new SimpleEngine.
    pub fn new() -> Self {
        Self
    }

    /// Splits a template into literal text and variable references.
    fn parse(template: &str) -> Result<Vec<Segment>, RenderError> {
        let mut segments = Vec::new();
        let mut text = String::with_capacity(template.len());
        let mut chars = template.chars().peekable();

        while let Some(ch) = chars.next() {
            match ch {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    text.push('{');
                }
                '{' => {
                    let mut var_name = String::new();
                    let mut found_close = false;

                    for inner_ch in chars.by_ref() {
                        if inner_ch == '}' {
                            found_close = true;
                            break;
                        }
                        var_name.push(inner_ch);
                    }

                    if !found_close {
                        return Err(RenderError::TemplateError(format!(
                            "Unclosed variable substitution: {{{}",
                            var_name
                        )));
                    }

                    let var_name = var_name.trim();
                    if var_name.is_empty() {
                        return Err(RenderError::TemplateError(
                            "Empty variable name in template".to_string(),
                        ));
                    }

                    if !text.is_empty() {
                        segments.push(Segment::Text(std::mem::take(&mut text)));
                    }
                    segments.push(Segment::Variable(var_name.to_string()));
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    text.push('}');
                }
                _ => text.push(ch),
            }
        }

        if !text.is_empty() {
            segments.push(Segment::Text(text));
        }

        Ok(segments)
    }

    /// Resolves a dotted path in a JSON value.
    fn resolve_path<'a>(value: &'a serde_json::Value, path: &str) -> Option<&'a serde_json::Value> {
        let mut current = value;

        for part in path.split('.') {
            current = match current {
                serde_json::Value::Object(map) => map.get(part)?,
                serde_json::Value::Array(arr) => {
                    let index: usize = part.parse().ok()?;
                    arr.get(index)?
                }
                _ => return None,
            };
        }

        Some(current)
    }

    /// Formats a JSON value as a string for output.
    fn format_value(value: &serde_json::Value) -> String {
        match value {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Number(n) => n.to_string(),
            serde_json::Value::Bool(b) => b.to_string(),
            serde_json::Value::Null => String::new(),
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => value.to_string(),
        }
    }

    fn lookup<'a>(
        var_name: &str,
        data: &'a serde_json::Value,
        context: Option<&'a HashMap<String, serde_json::Value>>,
    ) -> Option<&'a serde_json::Value> {
        if let Some(found) = Self::resolve_path(data, var_name) {
            return Some(found);
        }

        let ctx = context?;
        let (first, rest) = match var_name.split_once('.') {
            Some((first, rest)) => (first, Some(rest)),
            None => (var_name, None),
        };
        let value = ctx.get(first)?;
        match rest {
            Some(rest) => Self::resolve_path(value, rest),
            None => Some(value),
        }
    }

    fn render_impl(
        &self,
        template: &str,
        data: &serde_json::Value,
        context: Option<&HashMap<String, serde_json::Value>>,
    ) -> Result<String, RenderError> {
        let mut result = String::with_capacity(template.len());

        for segment in Self::parse(template)? {
            match segment {
                Segment::Text(text) => result.push_str(&text),
                Segment::Variable(name) => match Self::lookup(&name, data, context) {
                    Some(v) => result.push_str(&Self::format_value(v)),
                    // Leave the placeholder for debugging
                    None => result.push_str(&format!("{{{}}}", name)),
                },
            }
        }

        Ok(result)
    }
}

impl TemplateEngine for SimpleEngine {
    fn render_template(
        &self,
        template: &str,
        data: &serde_json::Value,
    ) -> Result<String, RenderError> {
        self.render_impl(template, data, None)
    }

    fn render_with_context(
        &self,
        template: &str,
        data: &serde_json::Value,
        context: HashMap<String, serde_json::Value>,
    ) -> Result<String, RenderError> {
        self.render_impl(template, data, Some(&context))
    }

    fn embeds_content(&self, template: &str) -> Result<bool, RenderError> {
        Ok(Self::parse(template)?
            .iter()
            .any(|segment| matches!(segment, Segment::Variable(name) if name == YIELD_VARIABLE)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_simple_substitution() {
        let engine = SimpleEngine::new();
        let data = json!({"name": "World"});

        let output = engine.render_template("Hello, {name}!", &data).unwrap();
        assert_eq!(output, "Hello, World!");
    }

    #[test]
    fn test_nested_access() {
        let engine = SimpleEngine::new();
        let data = json!({
            "user": {
                "name": "Alice",
                "profile": {
                    "email": "alice@example.com"
                }
            }
        });

        let output = engine
            .render_template("Name: {user.name}, Email: {user.profile.email}", &data)
            .unwrap();
        assert_eq!(output, "Name: Alice, Email: alice@example.com");
    }

    #[test]
    fn test_array_object_access() {
        let engine = SimpleEngine::new();
        let data = json!({
            "users": [
                {"name": "Alice"},
                {"name": "Bob"}
            ]
        });

        let output = engine
            .render_template("{users.0.name} and {users.1.name}", &data)
            .unwrap();
        assert_eq!(output, "Alice and Bob");
    }

    #[test]
    fn test_scalar_values() {
        let engine = SimpleEngine::new();
        let data = json!({"count": 42, "active": true, "value": null});

        let output = engine
            .render_template("{count} {active} [{value}]", &data)
            .unwrap();
        assert_eq!(output, "42 true []");
    }

    #[test]
    fn test_escaped_braces() {
        let engine = SimpleEngine::new();
        let data = json!({"name": "test"});

        let output = engine
            .render_template("Use {{name}} for {name}", &data)
            .unwrap();
        assert_eq!(output, "Use {name} for test");
    }

    #[test]
    fn test_missing_variable() {
        let engine = SimpleEngine::new();
        let output = engine.render_template("Hello {missing}!", &json!({})).unwrap();
        assert_eq!(output, "Hello {missing}!");
    }

    #[test]
    fn test_unclosed_variable() {
        let engine = SimpleEngine::new();
        let result = engine.render_template("Hello {name", &json!({}));
        assert!(result.unwrap_err().to_string().contains("Unclosed"));
    }

    #[test]
    fn test_empty_variable_name() {
        let engine = SimpleEngine::new();
        let result = engine.render_template("Hello {}!", &json!({}));
        assert!(result.unwrap_err().to_string().contains("Empty variable"));
    }

    #[test]
    fn test_whitespace_in_variable() {
        let engine = SimpleEngine::new();
        let output = engine
            .render_template("Hello { name }!", &json!({"name": "World"}))
            .unwrap();
        assert_eq!(output, "Hello World!");
    }

    #[test]
    fn test_data_shadows_context() {
        let engine = SimpleEngine::new();
        let mut context = HashMap::new();
        context.insert("value".to_string(), json!("from_context"));
        context.insert("site".to_string(), json!({"name": "folio"}));

        let output = engine
            .render_with_context("{value} @ {site.name}", &json!({"value": "from_data"}), context)
            .unwrap();
        assert_eq!(output, "from_data @ folio");
    }

    #[test]
    fn test_layout_yield() {
        let engine = SimpleEngine::new();
        let output = engine
            .render_template("<main>{yield}</main>", &json!({"yield": "body"}))
            .unwrap();
        assert_eq!(output, "<main>body</main>");
    }

    #[test]
    fn test_embeds_content() {
        let engine = SimpleEngine::new();
        assert!(engine.embeds_content("<main>{ yield }</main>").unwrap());
        assert!(!engine.embeds_content("<main>{{yield}}</main>").unwrap());
        assert!(!engine.embeds_content("{title}").unwrap());
    }
}
