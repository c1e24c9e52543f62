//! Prelude for convenient imports.
//!
//! ```rust,ignore
//! use folio_render::prelude::*;
//!
//! let site = Site::new(SiteConfig::new("./source"));
//! let html = site.render("index.html", &locals, &RenderOptions::new())?;
//! ```

// Application context and configuration
pub use crate::{LayoutSetting, Site, SiteConfig};

// Per-call options and data
pub use crate::{Locals, RenderOptions, ResolveOptions};

// Errors
pub use crate::RenderError;
