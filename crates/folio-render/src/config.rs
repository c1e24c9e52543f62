//! Site configuration consumed by the locator and renderer.
//!
//! The wider build system owns configuration. This crate only needs the
//! content-source root, the layouts directory, the default layout policy and
//! per-engine layout overrides. [`SiteConfig`] carries exactly those and can
//! be loaded from YAML:
//!
//! ```rust
//! use folio_render::{LayoutSetting, SiteConfig};
//!
//! let config = SiteConfig::from_yaml(r#"
//! source_dir: site/source
//! layouts_dir: layouts
//! layout: false
//! engines:
//!   simple:
//!     layout_engine: jinja
//! "#).unwrap();
//!
//! assert_eq!(config.layout, LayoutSetting::Disabled);
//! assert_eq!(config.layout_engine_for("simple"), Some("jinja"));
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::RenderError;
use crate::options::LayoutSetting;

/// Per-engine options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineSettings {
    /// Engine preferred for the layout when a page rendered by this engine
    /// does not name one itself.
    pub layout_engine: Option<String>,
}

/// Configuration of one site build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Root directory all logical paths resolve against.
    pub source_dir: PathBuf,
    /// Directory (relative to `source_dir`) searched first for layouts.
    pub layouts_dir: PathBuf,
    /// Layout policy used when a render call does not choose one.
    pub layout: LayoutSetting,
    /// Options keyed by engine id.
    pub engines: HashMap<String, EngineSettings>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("source"),
            layouts_dir: PathBuf::from("layouts"),
            layout: LayoutSetting::Auto,
            engines: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Creates the default configuration rooted at `source_dir`.
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            ..Self::default()
        }
    }

    /// Parses a configuration from YAML. Missing keys take their defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self, RenderError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Reads and parses a YAML configuration file.
    ///
    /// A relative `source_dir` is interpreted relative to the file's directory.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RenderError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| RenderError::io(path, e))?;
        let mut config = Self::from_yaml(&content)?;

        if config.source_dir.is_relative() {
            if let Some(parent) = path.parent() {
                config.source_dir = parent.join(&config.source_dir);
            }
        }

        Ok(config)
    }

    /// Sets the layouts directory.
    pub fn with_layouts_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.layouts_dir = dir.into();
        self
    }

    /// Sets the default layout policy.
    pub fn with_layout(mut self, layout: LayoutSetting) -> Self {
        self.layout = layout;
        self
    }

    /// Sets the layout engine override for pages rendered by `engine`.
    pub fn with_engine_layout(
        mut self,
        engine: impl Into<String>,
        layout_engine: impl Into<String>,
    ) -> Self {
        self.engines.entry(engine.into()).or_default().layout_engine = Some(layout_engine.into());
        self
    }

    /// Returns the configured layout engine for pages rendered by `engine`.
    pub fn layout_engine_for(&self, engine: &str) -> Option<&str> {
        self.engines
            .get(engine)
            .and_then(|settings| settings.layout_engine.as_deref())
    }

    /// Absolute-ish location of the layouts directory, for diagnostics.
    pub fn layouts_path(&self) -> PathBuf {
        self.source_dir.join(&self.layouts_dir)
    }
}
