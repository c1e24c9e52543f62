//! Rendering exactly one template file.
//!
//! [`ContentRenderer`] is the seam between the multi-pass
//! [`TemplateRenderer`](crate::TemplateRenderer) and the engines: given one
//! concrete file it produces that file's output and nothing more. The
//! renderer calls it once per extension pass and once more for the layout.
//!
//! [`FileRenderer`] is the default implementation. It reads the file (or takes
//! the source from `template_body` on chained passes), picks the engine from
//! the last extension, refuses to render a layout as a plain page, and hands
//! the locals, the yielded body and the context helpers to the engine.

use std::path::Path;

use crate::context::TemplateContext;
use crate::error::RenderError;
use crate::options::RenderOptions;
use crate::site::Site;

/// Renders a single template file.
pub trait ContentRenderer: Send + Sync {
    /// Renders `path` with the given context.
    ///
    /// `body` is the already-rendered content a layout embeds. It is `None`
    /// for page passes.
    fn render(
        &self,
        site: &Site,
        path: &Path,
        context: &TemplateContext,
        options: &RenderOptions,
        body: Option<&str>,
    ) -> Result<String, RenderError>;
}

/// Default [`ContentRenderer`] dispatching on file extension.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileRenderer;

impl ContentRenderer for FileRenderer {
    fn render(
        &self,
        site: &Site,
        path: &Path,
        context: &TemplateContext,
        options: &RenderOptions,
        body: Option<&str>,
    ) -> Result<String, RenderError> {
        let engine = site
            .engines()
            .engine_for_path(path)
            .ok_or_else(|| RenderError::UnknownEngine(path.to_path_buf()))?;

        let source = match &options.template_body {
            Some(template_body) => template_body.clone(),
            None => site
                .fs()
                .read_to_string(path)
                .map_err(|e| RenderError::io(path, e))?,
        };

        if body.is_none() && engine.embeds_content(&source)? {
            return Err(RenderError::LayoutMisuse {
                path: path.to_path_buf(),
                layouts_dir: site.config().layouts_path(),
            });
        }

        tracing::trace!(path = %path.display(), layout = body.is_some(), "rendering file");
        let data = context.template_data(body);
        engine.render_with_context(&source, &data, context.helpers().clone())
    }
}
