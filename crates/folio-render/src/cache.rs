//! Memoization of template lookups.
//!
//! A [`ResolutionCache`] belongs to one [`Site`](crate::Site) and lives as long
//! as the build run that created it. Entries are never invalidated: the source
//! tree is assumed not to change while a build resolves templates. Start a new
//! site (or a new cache) to observe filesystem changes.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::options::ResolveOptions;

/// Key of one memoized lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Operation that produced the entry (e.g. `"resolve_template"`).
    pub operation: &'static str,
    /// Logical path as requested.
    pub path: String,
    /// Options the lookup ran with.
    pub options: ResolveOptions,
}

impl CacheKey {
    /// Creates a cache key.
    pub fn new(operation: &'static str, path: impl Into<String>, options: &ResolveOptions) -> Self {
        Self {
            operation,
            path: path.into(),
            options: options.clone(),
        }
    }
}

/// Thread-safe memo table of lookup results, including absent results.
#[derive(Debug, Default)]
pub struct ResolutionCache {
    entries: Mutex<HashMap<CacheKey, Option<PathBuf>>>,
}

impl ResolutionCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached result for `key`, computing and storing it on a miss.
    ///
    /// The lock is not held while `compute` runs, so two threads missing on
    /// the same key may both compute it; the first stored value wins and
    /// both callers observe it.
    pub fn fetch<F>(&self, key: CacheKey, compute: F) -> Option<PathBuf>
    where
        F: FnOnce() -> Option<PathBuf>,
    {
        if let Some(hit) = self.lock().get(&key) {
            return hit.clone();
        }

        tracing::debug!(operation = key.operation, path = %key.path, "resolution cache miss");
        let value = compute();
        self.lock().entry(key).or_insert(value).clone()
    }

    /// Number of memoized entries.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true if nothing has been memoized yet.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<CacheKey, Option<PathBuf>>> {
        // A panic inside `compute` never happens under the lock, so the map
        // is consistent even if the mutex was poisoned.
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_fetch_computes_once() {
        let cache = ResolutionCache::new();
        let calls = Cell::new(0);
        let key = CacheKey::new("resolve_template", "index.html", &ResolveOptions::new());

        for _ in 0..3 {
            let found = cache.fetch(key.clone(), || {
                calls.set(calls.get() + 1);
                Some(PathBuf::from("source/index.html.jinja"))
            });
            assert_eq!(found, Some(PathBuf::from("source/index.html.jinja")));
        }

        assert_eq!(calls.get(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_absent_results_are_cached() {
        let cache = ResolutionCache::new();
        let calls = Cell::new(0);
        let key = CacheKey::new("resolve_template", "missing", &ResolveOptions::new());

        for _ in 0..2 {
            assert!(cache
                .fetch(key.clone(), || {
                    calls.set(calls.get() + 1);
                    None
                })
                .is_none());
        }

        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_options_are_part_of_key() {
        let cache = ResolutionCache::new();
        let plain = CacheKey::new("resolve_template", "page", &ResolveOptions::new());
        let statik = CacheKey::new(
            "resolve_template",
            "page",
            &ResolveOptions::new().try_static(true),
        );

        cache.fetch(plain, || None);
        let found = cache.fetch(statik, || Some(PathBuf::from("source/page")));

        assert_eq!(found, Some(PathBuf::from("source/page")));
        assert_eq!(cache.len(), 2);
    }
}
