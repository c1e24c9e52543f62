//! Options recognized by resolution and rendering calls.
//!
//! - [`ResolveOptions`]: steer the template locator (preferred engine, static fallback)
//! - [`RenderOptions`]: per-call rendering switches (layout, layout engine, locale)
//! - [`LayoutSetting`]: the three layout policies, shared with [`SiteConfig`](crate::SiteConfig)

use serde::{Deserialize, Serialize};

/// Options that steer [`resolve_template`](crate::locator::resolve_template).
///
/// These form part of the resolution cache key, so two lookups for the same
/// path with different options are cached independently.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ResolveOptions {
    /// Engine (by id or by one of its extensions) whose extensions are
    /// probed before the wildcard search.
    pub preferred_engine: Option<String>,
    /// Also accept a raw file with no engine extension at all.
    pub try_static: bool,
}

impl ResolveOptions {
    /// Creates options with no preferred engine and no static fallback.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the engine tried before the wildcard search.
    pub fn preferred_engine(mut self, engine: impl Into<String>) -> Self {
        self.preferred_engine = Some(engine.into());
        self
    }

    /// Enables the raw-file trial.
    pub fn try_static(mut self, try_static: bool) -> Self {
        self.try_static = try_static;
        self
    }
}

/// Which layout, if any, wraps a rendered page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawLayout", into = "RawLayout")]
pub enum LayoutSetting {
    /// Never wrap the page.
    Disabled,
    /// Wrap with a file named `layout` if one exists, otherwise render bare.
    #[default]
    Auto,
    /// Wrap with the named layout; failing to find it is an error.
    Named(String),
}

impl LayoutSetting {
    /// Name looked up in automatic mode.
    pub const AUTO_LAYOUT_NAME: &'static str = "layout";

    /// Creates a named layout setting.
    pub fn named(name: impl Into<String>) -> Self {
        LayoutSetting::Named(name.into())
    }
}

// YAML form: `false` disables, `true` selects automatic mode, any string
// names a layout (including `"auto"`).
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawLayout {
    Flag(bool),
    Name(String),
}

impl From<RawLayout> for LayoutSetting {
    fn from(raw: RawLayout) -> Self {
        match raw {
            RawLayout::Flag(false) => LayoutSetting::Disabled,
            RawLayout::Flag(true) => LayoutSetting::Auto,
            RawLayout::Name(name) => LayoutSetting::Named(name),
        }
    }
}

impl From<LayoutSetting> for RawLayout {
    fn from(setting: LayoutSetting) -> Self {
        match setting {
            LayoutSetting::Disabled => RawLayout::Flag(false),
            LayoutSetting::Auto => RawLayout::Flag(true),
            LayoutSetting::Named(name) => RawLayout::Name(name),
        }
    }
}

/// Per-call rendering options.
///
/// Fields left as `None` fall back to the site configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Layout policy for this call. `None` uses the site default.
    pub layout: Option<LayoutSetting>,
    /// Engine preferred when looking up the layout file.
    pub layout_engine: Option<String>,
    /// Locale active while this call renders.
    pub lang: Option<String>,
    /// Content rendered by a previous pass, used as the template source of
    /// the next pass instead of the file on disk.
    pub template_body: Option<String>,
}

impl RenderOptions {
    /// Creates options that defer everything to the site configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the layout policy.
    pub fn layout(mut self, layout: LayoutSetting) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Disables the layout for this call.
    pub fn without_layout(self) -> Self {
        self.layout(LayoutSetting::Disabled)
    }

    /// Sets the engine preferred for the layout file.
    pub fn layout_engine(mut self, engine: impl Into<String>) -> Self {
        self.layout_engine = Some(engine.into());
        self
    }

    /// Sets the locale active during rendering.
    pub fn lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }
}
