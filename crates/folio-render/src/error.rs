//! Error types for template resolution and rendering.
//!
//! This module provides [`RenderError`], the error type for every fallible
//! rendering operation. It abstracts over the underlying template engines'
//! errors so callers only ever match on one type.
//!
//! Resolution itself never fails: a template that cannot be located is an
//! absent result, not an error. Only the render path turns absence into
//! [`RenderError::TemplateNotFound`], and only for explicitly named layouts.

use std::path::PathBuf;

/// Error type for template rendering operations.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// An explicitly requested layout could not be located.
    #[error("Could not locate layout: {0}")]
    TemplateNotFound(String),

    /// No template exists for a requested logical path.
    #[error("no template found for {0}")]
    PathNotFound(String),

    /// A template that embeds child content was rendered as a plain page.
    ///
    /// Layouts yield the page body. Rendering one without a body means it
    /// lives where pages live instead of in the layouts directory.
    #[error(
        "Tried to render a layout (embeds yielded content) at {} like it was a template. \
         Non-default layouts need to be in {}.",
        path.display(),
        layouts_dir.display()
    )]
    LayoutMisuse {
        /// The offending template file.
        path: PathBuf,
        /// Where layouts are expected to live.
        layouts_dir: PathBuf,
    },

    /// No engine is registered for the file's extension.
    #[error("no template engine registered for {}", .0.display())]
    UnknownEngine(PathBuf),

    /// Template syntax error or evaluation failure inside an engine.
    #[error("template error: {0}")]
    TemplateError(String),

    /// Data serialization error.
    #[error("serialization error: {0}")]
    SerializationError(String),

    /// I/O error while reading a template from disk.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// Path that failed to read
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid site configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

impl RenderError {
    /// Creates an I/O error tagged with the path being read.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<serde_json::Error> for RenderError {
    fn from(err: serde_json::Error) -> Self {
        RenderError::SerializationError(err.to_string())
    }
}

impl From<serde_yaml::Error> for RenderError {
    fn from(err: serde_yaml::Error) -> Self {
        RenderError::Config(err.to_string())
    }
}

// Conversion from minijinja::Error. A missing include inside a template is a
// template error here; TemplateNotFound is reserved for layout lookup.
impl From<minijinja::Error> for RenderError {
    fn from(err: minijinja::Error) -> Self {
        use minijinja::ErrorKind;

        match err.kind() {
            ErrorKind::BadSerialization => RenderError::SerializationError(err.to_string()),
            _ => RenderError::TemplateError(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_not_found_names_layout() {
        let err = RenderError::TemplateNotFound("missing_layout".to_string());
        assert_eq!(err.to_string(), "Could not locate layout: missing_layout");
    }

    #[test]
    fn test_layout_misuse_mentions_path_and_layouts_dir() {
        let err = RenderError::LayoutMisuse {
            path: PathBuf::from("source/wrapper.html.jinja"),
            layouts_dir: PathBuf::from("source/layouts"),
        };
        let msg = err.to_string();
        assert!(msg.contains("source/wrapper.html.jinja"));
        assert!(msg.contains("Non-default layouts need to be in source/layouts"));
    }

    #[test]
    fn test_io_error_keeps_source() {
        use std::error::Error;

        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = RenderError::io("source/index.html.jinja", io_err);
        assert!(err.source().is_some());
        assert!(err.to_string().contains("source/index.html.jinja"));
    }

    #[test]
    fn test_from_minijinja_syntax_error() {
        let mj_err = minijinja::Error::new(minijinja::ErrorKind::SyntaxError, "unexpected end");
        let err: RenderError = mj_err.into();
        assert!(matches!(err, RenderError::TemplateError(_)));
    }
}
