//! Scoped locale switching for internationalized builds.
//!
//! A render call that carries a `lang` option switches the current locale for
//! the duration of the call and restores the previous one afterwards, on every
//! exit path. The switch goes through a [`LocaleBackend`] so the storage can be
//! process-wide ([`GlobalLocale`]) or anything else a build system provides.
//!
//! # Usage
//!
//! ```rust
//! use folio_render::locale::{current_locale, set_current_locale, GlobalLocale, LocaleScope};
//!
//! set_current_locale(Some("en".to_string()));
//! {
//!     let _scope = LocaleScope::enter(&GlobalLocale, Some("de"));
//!     assert_eq!(current_locale().as_deref(), Some("de"));
//! }
//! assert_eq!(current_locale().as_deref(), Some("en"));
//! # set_current_locale(None);
//! ```
//!
//! The global locale is a single value. Concurrent renders that set different
//! locales must be serialized by the caller.

use once_cell::sync::Lazy;
use std::sync::Mutex;

static CURRENT_LOCALE: Lazy<Mutex<Option<String>>> = Lazy::new(|| Mutex::new(None));

/// Returns the process-wide current locale.
pub fn current_locale() -> Option<String> {
    CURRENT_LOCALE
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .clone()
}

/// Replaces the process-wide current locale.
pub fn set_current_locale(locale: Option<String>) {
    let mut guard = CURRENT_LOCALE
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = locale;
}

/// Storage for the current locale.
pub trait LocaleBackend: Send + Sync {
    /// The locale currently in effect.
    fn current(&self) -> Option<String>;

    /// Makes `locale` the current locale.
    fn set(&self, locale: Option<String>);
}

/// [`LocaleBackend`] over the process-wide locale.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalLocale;

impl LocaleBackend for GlobalLocale {
    fn current(&self) -> Option<String> {
        current_locale()
    }

    fn set(&self, locale: Option<String>) {
        set_current_locale(locale);
    }
}

/// Guard that restores the previous locale when dropped.
///
/// The previous locale is captured even when no new one is requested, so
/// anything that changes the locale inside the scope is undone too.
#[must_use = "the locale is restored as soon as the scope is dropped"]
pub struct LocaleScope<'a> {
    backend: &'a dyn LocaleBackend,
    previous: Option<String>,
}

impl<'a> LocaleScope<'a> {
    /// Captures the current locale and switches to `lang` if given.
    pub fn enter(backend: &'a dyn LocaleBackend, lang: Option<&str>) -> Self {
        let previous = backend.current();
        if let Some(lang) = lang {
            tracing::trace!(lang, previous = ?previous, "switching locale");
            backend.set(Some(lang.to_string()));
        }
        Self { backend, previous }
    }

    /// The locale that will be restored.
    pub fn previous(&self) -> Option<&str> {
        self.previous.as_deref()
    }
}

impl Drop for LocaleScope<'_> {
    fn drop(&mut self) {
        self.backend.set(self.previous.take());
    }
}
