//! # Folio Render - Template Resolution and Rendering for Static Sites
//!
//! `folio-render` is the template layer of the `folio` static-site generator.
//! Given a logical output path it finds the source template on disk, renders
//! it through the engine its extension names, repeats for chained extensions,
//! and wraps the result in a layout.
//!
//! ## Core Concepts
//!
//! - [`Site`]: The build's application context (config, engines, cache, locale)
//! - [`resolve_template`]: Logical path → template file, memoized per site
//! - [`TemplateRenderer`]: Multi-pass rendering of one file plus its layout
//! - [`EngineRegistry`]: Extension → engine mapping ([`MiniJinjaEngine`], [`SimpleEngine`])
//! - [`LayoutSetting`]: `false`, automatic, or a named layout
//!
//! ## Quick Start
//!
//! ```rust
//! use folio_render::{LayoutSetting, RenderOptions, Site, SiteConfig};
//! use serde_json::json;
//!
//! let dir = tempfile::tempdir().unwrap();
//! std::fs::create_dir(dir.path().join("layouts")).unwrap();
//! std::fs::write(
//!     dir.path().join("layouts/layout.html.jinja"),
//!     "<title>{{ title }}</title>{{ yield }}",
//! ).unwrap();
//! std::fs::write(dir.path().join("index.html.jinja"), "<h1>{{ title }}</h1>").unwrap();
//!
//! let site = Site::new(SiteConfig::new(dir.path()));
//! let locals = json!({"title": "Home"}).as_object().cloned().unwrap();
//!
//! let html = site.render("index.html", &locals, &RenderOptions::new()).unwrap();
//! assert_eq!(html, "<title>Home</title><h1>Home</h1>");
//!
//! let bare = site
//!     .render("index.html", &locals, &RenderOptions::new().layout(LayoutSetting::Disabled))
//!     .unwrap();
//! assert_eq!(bare, "<h1>Home</h1>");
//! ```
//!
//! ## Resolution
//!
//! ```rust
//! use folio_render::{ResolveOptions, Site, SiteConfig};
//!
//! let dir = tempfile::tempdir().unwrap();
//! std::fs::write(dir.path().join("about.html.tmpl"), "About {name}").unwrap();
//! std::fs::write(dir.path().join("about.html.jinja"), "About {{ name }}").unwrap();
//!
//! let site = Site::new(SiteConfig::new(dir.path()));
//! let preferred = ResolveOptions::new().preferred_engine("simple");
//!
//! assert_eq!(
//!     site.resolve_template("/about.html", &preferred),
//!     Some(dir.path().join("about.html.tmpl")),
//! );
//! assert_eq!(site.resolve_template("missing.html", &ResolveOptions::new()), None);
//! ```

pub mod cache;
pub mod config;
pub mod context;
pub mod engine;
mod error;
pub mod file_renderer;
pub mod fs;
pub mod locale;
pub mod locator;
pub mod options;
pub mod prelude;
mod renderer;
mod site;

// Error type
pub use error::RenderError;

pub use cache::{CacheKey, ResolutionCache};
pub use config::{EngineSettings, SiteConfig};
pub use context::{Locals, TemplateContext, YIELD_VARIABLE};
pub use engine::{EngineRegistry, MiniJinjaEngine, SimpleEngine, TemplateEngine};
pub use file_renderer::{ContentRenderer, FileRenderer};
pub use fs::{FileSystem, OsFileSystem};
pub use locale::{GlobalLocale, LocaleBackend, LocaleScope};
pub use locator::{locate_layout, resolve_template};
pub use options::{LayoutSetting, RenderOptions, ResolveOptions};
pub use renderer::{strip_extension, TemplateRenderer};
pub use site::Site;
