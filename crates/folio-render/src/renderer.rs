//! Multi-pass page rendering with layouts.
//!
//! This module provides [`TemplateRenderer`], which turns one template file
//! into final output.
//!
//! ## Chained Extensions
//!
//! Every registered engine extension on the file name is one rendering pass,
//! innermost (rightmost) first. `page.html.tmpl.jinja` renders through jinja,
//! then the output is rendered through the simple engine as if it were the
//! contents of `page.html.tmpl`, then the loop stops at `.html`:
//!
//! ```text
//! page.html.tmpl.jinja  --jinja-->  page.html.tmpl  --simple-->  page.html
//! ```
//!
//! Passes after the first take their source from
//! [`RenderOptions::template_body`], not from disk.
//!
//! ## Layouts
//!
//! After the passes, the layout policy decides whether the body gets wrapped:
//!
//! | Policy | Lookup | Missing layout |
//! |--------|--------|----------------|
//! | [`LayoutSetting::Disabled`] | none | n/a |
//! | [`LayoutSetting::Auto`] | `layout.*` | render unwrapped |
//! | [`LayoutSetting::Named`] | `<name>.*` | [`RenderError::TemplateNotFound`] |
//!
//! The policy comes from the call's options, falling back to the site default.
//! The engine tried first for the layout file is the call's `layout_engine`,
//! else the per-engine `layout_engine` setting of the page's engine, else the
//! page's own engine.
//!
//! ## Locale
//!
//! When the site has a [`LocaleBackend`](crate::locale::LocaleBackend) the
//! current locale is switched to the call's `lang` for the duration of the call
//! and restored on every exit path, errors included.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::context::{Locals, TemplateContext};
use crate::error::RenderError;
use crate::locale::LocaleScope;
use crate::locator;
use crate::options::{LayoutSetting, RenderOptions};
use crate::site::Site;

/// Renders one template file, handling chained extensions and layouts.
///
/// The renderer holds no state beyond the site reference and its path, so
/// every [`render`](Self::render) call is independent.
#[derive(Debug)]
pub struct TemplateRenderer<'a> {
    site: &'a Site,
    path: PathBuf,
}

impl<'a> TemplateRenderer<'a> {
    /// Creates a renderer for a concrete template file.
    pub fn new(site: &'a Site, path: impl Into<PathBuf>) -> Self {
        Self {
            site,
            path: path.into(),
        }
    }

    /// The template file this renderer renders.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Renders the template with layout.
    ///
    /// `locals` are copied and frozen before any engine sees them; `options`
    /// are copied into a working set.
    ///
    /// # Errors
    ///
    /// - [`RenderError::TemplateNotFound`] if an explicitly named layout is missing
    /// - [`RenderError::LayoutMisuse`] if a layout file is rendered as a page
    /// - [`RenderError::UnknownEngine`] if the file has no engine extension
    /// - engine, I/O and serialization errors from the individual passes
    pub fn render(&self, locals: &Locals, options: &RenderOptions) -> Result<String, RenderError> {
        let locals = Arc::new(locals.clone());
        let mut options = options.clone();

        let _locale_scope = self
            .site
            .locale_backend()
            .map(|backend| LocaleScope::enter(backend, options.lang.as_deref()));
        let locale = match self.site.locale_backend() {
            Some(backend) => backend.current(),
            None => options.lang.clone(),
        };

        let engine_hint = self
            .path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_string);

        let mut context = TemplateContext::new(Arc::clone(&locals), options.clone(), locale);
        for (_, engine) in self.site.engines().iter() {
            engine.init_context(&mut context);
        }

        let content_renderer = self.site.content_renderer();
        let mut path = self.path.clone();
        let mut content: Option<String> = None;

        while self.site.engines().handles(&path) {
            if let Some(previous) = content.take() {
                options.template_body = Some(previous);
            }

            tracing::trace!(path = %path.display(), "rendering pass");
            content = Some(content_renderer.render(self.site, &path, &context, &options, None)?);
            path = strip_extension(&path);
        }

        // Files with no engine extension are copied, not rendered.
        let body = content.ok_or_else(|| RenderError::UnknownEngine(self.path.clone()))?;

        match self.fetch_layout(engine_hint.as_deref(), &options)? {
            Some(layout_path) => {
                tracing::debug!(
                    path = %self.path.display(),
                    layout = %layout_path.display(),
                    "wrapping in layout"
                );
                options.template_body = None;
                content_renderer.render(self.site, &layout_path, &context, &options, Some(&body))
            }
            None => Ok(body),
        }
    }

    /// Computes which layout file, if any, wraps this page.
    ///
    /// `engine` is the page's engine hint: its last extension.
    pub fn fetch_layout(
        &self,
        engine: Option<&str>,
        options: &RenderOptions,
    ) -> Result<Option<PathBuf>, RenderError> {
        let config = self.site.config();
        let local_layout = options.layout.as_ref().unwrap_or(&config.layout);

        if matches!(local_layout, LayoutSetting::Disabled) {
            return Ok(None);
        }

        let layout_engine = options
            .layout_engine
            .as_deref()
            .or_else(|| {
                engine.and_then(|hint| {
                    let id = self.site.engines().canonical_engine(hint).unwrap_or(hint);
                    config.layout_engine_for(id)
                })
            })
            .or(engine);

        match local_layout {
            LayoutSetting::Named(name) => locator::locate_layout(self.site, name, layout_engine)
                .map(Some)
                .ok_or_else(|| RenderError::TemplateNotFound(name.clone())),
            _ => Ok(locator::locate_auto_layout(self.site, layout_engine)),
        }
    }
}

/// Removes the last extension, keeping the directory: `a.css.scss` → `a.css`.
pub fn strip_extension(path: &Path) -> PathBuf {
    match path.file_stem() {
        Some(stem) => path.with_file_name(stem),
        None => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_strip_extension() {
        assert_eq!(
            strip_extension(Path::new("source/style.css.scss.jinja")),
            PathBuf::from("source/style.css.scss")
        );
        assert_eq!(strip_extension(Path::new("source/a.html")), PathBuf::from("source/a"));
        assert_eq!(strip_extension(Path::new("source/README")), PathBuf::from("source/README"));
    }

    proptest! {
        #[test]
        fn strip_extension_removes_exactly_one(
            stem in "[a-z]{1,8}",
            exts in prop::collection::vec("[a-z0-9]{1,5}", 0..4),
        ) {
            let mut name = stem.clone();
            for ext in &exts {
                name.push('.');
                name.push_str(ext);
            }
            let path = Path::new("source").join(&name);
            let stripped = strip_extension(&path);

            prop_assert_eq!(stripped.parent(), path.parent());
            match exts.split_last() {
                Some((_, rest)) => {
                    let mut expected = stem.clone();
                    for ext in rest {
                        expected.push('.');
                        expected.push_str(ext);
                    }
                    prop_assert_eq!(stripped, Path::new("source").join(expected));
                }
                None => prop_assert_eq!(stripped, path),
            }
        }
    }
}
