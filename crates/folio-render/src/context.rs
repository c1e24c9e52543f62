//! Per-call evaluation context handed to template engines.
//!
//! Every [`TemplateRenderer::render`](crate::TemplateRenderer::render) call
//! creates one fresh [`TemplateContext`] and drops it when the call returns.
//! It carries the caller's locals (frozen behind an `Arc`), a snapshot of the
//! render options, the locale in effect and any helper values engines add
//! through [`TemplateEngine::init_context`](crate::engine::TemplateEngine::init_context).
//!
//! Helpers sit underneath locals: when both define a key, the local wins.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::options::RenderOptions;

/// Template-visible variables.
pub type Locals = Map<String, Value>;

/// Name under which a layout receives the body it wraps.
pub const YIELD_VARIABLE: &str = "yield";

/// Isolated evaluation context for one render call.
#[derive(Debug, Clone)]
pub struct TemplateContext {
    locals: Arc<Locals>,
    options: RenderOptions,
    locale: Option<String>,
    helpers: HashMap<String, Value>,
}

impl TemplateContext {
    /// Creates a context for one render call.
    pub fn new(locals: Arc<Locals>, options: RenderOptions, locale: Option<String>) -> Self {
        Self {
            locals,
            options,
            locale,
            helpers: HashMap::new(),
        }
    }

    /// The caller's locals.
    pub fn locals(&self) -> &Locals {
        &self.locals
    }

    /// The options the render call started with.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// The locale in effect for this call.
    ///
    /// This is passed explicitly so engines never need to read global state.
    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    /// Adds a helper value visible to templates unless a local shadows it.
    pub fn add_helper(&mut self, name: impl Into<String>, value: Value) {
        self.helpers.insert(name.into(), value);
    }

    /// Gets a helper value by name.
    pub fn helper(&self, name: &str) -> Option<&Value> {
        self.helpers.get(name)
    }

    /// Helper values, used as the engine's outer context.
    pub fn helpers(&self) -> &HashMap<String, Value> {
        &self.helpers
    }

    /// Builds the data object a template renders against.
    ///
    /// Locals first, then the yielded body (if any) under [`YIELD_VARIABLE`].
    pub fn template_data(&self, body: Option<&str>) -> Value {
        let mut data = (*self.locals).clone();
        if let Some(body) = body {
            data.insert(YIELD_VARIABLE.to_string(), Value::String(body.to_string()));
        }
        Value::Object(data)
    }
}
