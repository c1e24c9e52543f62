//! Template engine abstraction and the extension registry.
//!
//! A template's file extension decides which engine renders it. The
//! [`EngineRegistry`] maps extensions to engine ids and engine ids to
//! [`TemplateEngine`] implementations, and answers the two queries the
//! locator needs: "which engine handles this extension" and "which
//! extensions belong to this engine".
//!
//! # Default Engines
//!
//! | Engine id | Extensions | Implementation |
//! |-----------|------------|----------------|
//! | `jinja` | `.jinja`, `.jinja2`, `.j2` | [`MiniJinjaEngine`] |
//! | `simple` | `.tmpl` | [`SimpleEngine`] |
//!
//! Extensions are tried in registration order when an engine is preferred.
//! One extension may belong to several engines (`.md` for two markdown
//! renderers): the first engine registered for it renders the file, and
//! [`EngineRegistry::prefer`] moves another engine to the front.
//!
//! # Layouts
//!
//! Layouts embed the page body through the [`YIELD_VARIABLE`](crate::context::YIELD_VARIABLE).
//! Engines report whether a template does so via
//! [`TemplateEngine::embeds_content`], which lets the renderer reject a layout
//! rendered as a page before evaluating it.

mod jinja;
mod simple;

pub use jinja::MiniJinjaEngine;
pub use simple::SimpleEngine;

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::context::TemplateContext;
use crate::error::RenderError;

/// A template engine that renders template source with data.
pub trait TemplateEngine: Send + Sync {
    /// Renders a template string with the given data.
    fn render_template(&self, template: &str, data: &serde_json::Value)
        -> Result<String, RenderError>;

    /// Renders a template with additional context values merged in.
    ///
    /// The `context` values sit underneath the serialized `data`. If there
    /// are key conflicts, `data` takes precedence.
    fn render_with_context(
        &self,
        template: &str,
        data: &serde_json::Value,
        context: HashMap<String, serde_json::Value>,
    ) -> Result<String, RenderError>;

    /// Whether the template embeds child content (i.e. is a layout).
    fn embeds_content(&self, template: &str) -> Result<bool, RenderError>;

    /// Hook to add engine-specific helpers to a fresh render context.
    fn init_context(&self, _context: &mut TemplateContext) {}
}

/// Registry mapping file extensions to template engines.
#[derive(Clone, Default)]
pub struct EngineRegistry {
    /// `(engine id, engine)` in registration order.
    engines: Vec<(String, Arc<dyn TemplateEngine>)>,
    /// `(extension, engine ids)` in registration order; the first id renders.
    extensions: Vec<(String, Vec<String>)>,
}

impl std::fmt::Debug for EngineRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineRegistry")
            .field("extensions", &self.extensions)
            .finish()
    }
}

impl EngineRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the built-in engines.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("jinja", &["jinja", "jinja2", "j2"], MiniJinjaEngine::new());
        registry.register("simple", &["tmpl"], SimpleEngine::new());
        registry
    }

    /// Registers `engine` under `id` for the given extensions (without dots).
    ///
    /// Re-registering an id replaces its implementation. An extension already
    /// claimed by another engine is shared; the earlier engine keeps rendering it.
    pub fn register<E>(&mut self, id: impl Into<String>, extensions: &[&str], engine: E)
    where
        E: TemplateEngine + 'static,
    {
        self.register_arc(id, extensions, Arc::new(engine));
    }

    /// Registers a shared engine instance.
    pub fn register_arc(
        &mut self,
        id: impl Into<String>,
        extensions: &[&str],
        engine: Arc<dyn TemplateEngine>,
    ) {
        let id = id.into();
        for ext in extensions {
            let ext = normalize_extension(ext);
            match self.extensions.iter_mut().find(|(known, _)| *known == ext) {
                Some((_, ids)) => {
                    if !ids.contains(&id) {
                        ids.push(id.clone());
                    }
                }
                None => self.extensions.push((ext, vec![id.clone()])),
            }
        }
        match self.engines.iter_mut().find(|(known, _)| *known == id) {
            Some(entry) => entry.1 = engine,
            None => self.engines.push((id, engine)),
        }
    }

    /// Engine id registered for an extension (with or without leading dot).
    pub fn engine_for_extension(&self, ext: &str) -> Option<&str> {
        let ext = normalize_extension(ext);
        self.extensions
            .iter()
            .find(|(known, _)| *known == ext)
            .and_then(|(_, ids)| ids.first())
            .map(String::as_str)
    }

    /// Makes `id` the engine that renders the given extensions.
    ///
    /// Extensions not yet mapped are added for `id`; the engine must already
    /// be registered for it to render anything.
    pub fn prefer(&mut self, id: &str, extensions: &[&str]) {
        for ext in extensions {
            let ext = normalize_extension(ext);
            match self.extensions.iter_mut().find(|(known, _)| *known == ext) {
                Some((_, ids)) => {
                    ids.retain(|known| known != id);
                    ids.insert(0, id.to_string());
                }
                None => self.extensions.push((ext, vec![id.to_string()])),
            }
        }
    }

    /// Extensions registered for an engine, shared ones included, in
    /// registration order.
    pub fn extensions_for(&self, id: &str) -> Vec<&str> {
        self.extensions
            .iter()
            .filter(|(_, ids)| ids.iter().any(|known| known == id))
            .map(|(ext, _)| ext.as_str())
            .collect()
    }

    /// Engine id for a path's last extension.
    pub fn engine_id_for_path(&self, path: &Path) -> Option<&str> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| self.engine_for_extension(ext))
    }

    /// Engine implementation for a path's last extension.
    pub fn engine_for_path(&self, path: &Path) -> Option<&Arc<dyn TemplateEngine>> {
        self.engine_id_for_path(path).and_then(|id| self.get(id))
    }

    /// True if the path's last extension belongs to a registered engine.
    pub fn handles(&self, path: &Path) -> bool {
        self.engine_id_for_path(path).is_some()
    }

    /// Engine implementation by id.
    pub fn get(&self, id: &str) -> Option<&Arc<dyn TemplateEngine>> {
        self.engines
            .iter()
            .find(|(known, _)| known == id)
            .map(|(_, engine)| engine)
    }

    /// All engines in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<dyn TemplateEngine>)> {
        self.engines.iter().map(|(id, engine)| (id.as_str(), engine))
    }

    /// Resolves a name that may be an engine id or one of its extensions.
    pub fn canonical_engine<'a>(&'a self, name: &'a str) -> Option<&'a str> {
        if self.get(name).is_some() {
            Some(name)
        } else {
            self.engine_for_extension(name)
        }
    }
}

fn normalize_extension(ext: &str) -> String {
    ext.trim_start_matches('.').to_ascii_lowercase()
}
