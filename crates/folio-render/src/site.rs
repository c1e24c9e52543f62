//! The application context shared by every lookup and render of one build.
//!
//! A [`Site`] bundles what the locator and renderer consume from the wider
//! build system:
//!
//! - [`SiteConfig`]: source root, layouts directory, default layout, engine options
//! - [`EngineRegistry`]: extension → engine mapping
//! - [`FileSystem`]: disk access (real or instrumented)
//! - [`ResolutionCache`]: memoized lookups, living as long as the site
//! - [`LocaleBackend`]: optional locale switching around renders
//! - [`ContentRenderer`]: single-file rendering
//!
//! Create one site per build run. Dropping it discards the cache.
//!
//! # Example
//!
//! ```rust,no_run
//! use folio_render::{RenderOptions, Site, SiteConfig};
//!
//! let site = Site::new(SiteConfig::new("./source"));
//! let locals = serde_json::Map::new();
//! let html = site.render("index.html", &locals, &RenderOptions::new())?;
//! # Ok::<(), folio_render::RenderError>(())
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use crate::cache::ResolutionCache;
use crate::config::SiteConfig;
use crate::context::Locals;
use crate::engine::EngineRegistry;
use crate::error::RenderError;
use crate::file_renderer::{ContentRenderer, FileRenderer};
use crate::fs::{FileSystem, OsFileSystem};
use crate::locale::{GlobalLocale, LocaleBackend};
use crate::locator;
use crate::options::{RenderOptions, ResolveOptions};
use crate::renderer::TemplateRenderer;

/// Application context for template resolution and rendering.
pub struct Site {
    config: SiteConfig,
    engines: EngineRegistry,
    fs: Arc<dyn FileSystem>,
    cache: Arc<ResolutionCache>,
    locale: Option<Arc<dyn LocaleBackend>>,
    content_renderer: Arc<dyn ContentRenderer>,
}

impl Site {
    /// Creates a site with the default engines, the real filesystem, a fresh
    /// cache and the process-wide locale.
    pub fn new(config: SiteConfig) -> Self {
        Self {
            config,
            engines: EngineRegistry::with_defaults(),
            fs: Arc::new(OsFileSystem),
            cache: Arc::new(ResolutionCache::new()),
            locale: Some(Arc::new(GlobalLocale)),
            content_renderer: Arc::new(FileRenderer),
        }
    }

    /// Replaces the engine registry.
    pub fn with_engines(mut self, engines: EngineRegistry) -> Self {
        self.engines = engines;
        self
    }

    /// Replaces the filesystem collaborator.
    pub fn with_file_system(mut self, fs: Arc<dyn FileSystem>) -> Self {
        self.fs = fs;
        self
    }

    /// Uses an externally owned resolution cache.
    pub fn with_cache(mut self, cache: Arc<ResolutionCache>) -> Self {
        self.cache = cache;
        self
    }

    /// Replaces the locale backend.
    pub fn with_locale(mut self, locale: Arc<dyn LocaleBackend>) -> Self {
        self.locale = Some(locale);
        self
    }

    /// Disables locale switching; `lang` options are then only passed to
    /// templates through the render context.
    pub fn without_locale(mut self) -> Self {
        self.locale = None;
        self
    }

    /// Replaces the single-file content renderer.
    pub fn with_content_renderer(mut self, renderer: Arc<dyn ContentRenderer>) -> Self {
        self.content_renderer = renderer;
        self
    }

    /// The site configuration.
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// The engine registry.
    pub fn engines(&self) -> &EngineRegistry {
        &self.engines
    }

    /// The filesystem collaborator.
    pub fn fs(&self) -> &dyn FileSystem {
        self.fs.as_ref()
    }

    /// The resolution cache.
    pub fn cache(&self) -> &ResolutionCache {
        &self.cache
    }

    /// The locale backend, if locale switching is enabled.
    pub fn locale_backend(&self) -> Option<&dyn LocaleBackend> {
        self.locale.as_deref()
    }

    /// The single-file content renderer.
    pub fn content_renderer(&self) -> &dyn ContentRenderer {
        self.content_renderer.as_ref()
    }

    /// Finds the template file for a logical path. See [`locator::resolve_template`].
    pub fn resolve_template(&self, request_path: &str, options: &ResolveOptions) -> Option<PathBuf> {
        locator::resolve_template(self, request_path, options)
    }

    /// Finds a layout by name. See [`locator::locate_layout`].
    pub fn locate_layout(&self, name: &str, preferred_engine: Option<&str>) -> Option<PathBuf> {
        locator::locate_layout(self, name, preferred_engine)
    }

    /// Creates a renderer for a concrete template file.
    pub fn renderer(&self, path: impl Into<PathBuf>) -> TemplateRenderer<'_> {
        TemplateRenderer::new(self, path)
    }

    /// Resolves a logical path and renders it.
    ///
    /// A path that resolves to a raw file (no engine extension) is an
    /// [`RenderError::UnknownEngine`] error: static assets are the build's to
    /// copy, never wrapped in a layout or decoded as text.
    pub fn render(
        &self,
        request_path: &str,
        locals: &Locals,
        options: &RenderOptions,
    ) -> Result<String, RenderError> {
        let path = self
            .resolve_template(request_path, &ResolveOptions::new())
            .ok_or_else(|| RenderError::PathNotFound(request_path.to_string()))?;
        self.renderer(path).render(locals, options)
    }
}

impl std::fmt::Debug for Site {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Site")
            .field("config", &self.config)
            .field("engines", &self.engines)
            .field("cached_lookups", &self.cache.len())
            .field("locale", &self.locale.is_some())
            .finish()
    }
}
