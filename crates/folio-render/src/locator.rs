//! Mapping logical paths to template files on disk.
//!
//! A logical path such as `"index.html"` names an output; the template that
//! produces it may be `index.html.jinja`, `index.html.tmpl`, or a raw
//! `index.html`. [`resolve_template`] finds it.
//!
//! # Search Order
//!
//! Given `source/<path>` as the base, trials run in this order and the first
//! hit wins:
//!
//! | Trial | Candidates | When |
//! |-------|------------|------|
//! | Preferred | `<base>.{ext1,ext2,..}` for the preferred engine's extensions | `preferred_engine` set and known |
//! | Wildcard | `<base>.*` | always |
//! | Static | `<base>` | `try_static` set |
//!
//! Within a trial, glob matches are accepted only if their last extension
//! belongs to a registered engine. If none qualifies but the literal
//! candidate is a file, it is taken as is. When every trial misses, `<base>`
//! itself is returned if it is a file.
//!
//! Matches inside one trial are taken in the order the filesystem collaborator
//! returns them (alphabetical for [`OsFileSystem`](crate::fs::OsFileSystem)).
//!
//! # Caching
//!
//! Results, including misses, are memoized in the site's
//! [`ResolutionCache`](crate::cache::ResolutionCache) keyed by operation,
//! logical path and options. A repeated lookup never touches the filesystem.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::cache::CacheKey;
use crate::fs::escape_glob;
use crate::options::{LayoutSetting, ResolveOptions};
use crate::site::Site;

/// Cache operation name for [`resolve_template`].
pub const RESOLVE_TEMPLATE: &str = "resolve_template";

/// One extension pattern tried against the base path.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Trial {
    /// Exactly these extensions, in order (`{a,b,c}`).
    Extensions(Vec<String>),
    /// Any extension (`*`).
    Wildcard,
    /// No extension at all.
    Static,
}

impl Trial {
    /// Glob patterns expanding this trial, in probe order.
    fn patterns(&self, escaped_base: &str) -> Vec<String> {
        match self {
            Trial::Extensions(exts) => exts
                .iter()
                .map(|ext| format!("{}.{}", escaped_base, glob::Pattern::escape(ext)))
                .collect(),
            Trial::Wildcard => vec![format!("{}.*", escaped_base)],
            Trial::Static => vec![escaped_base.to_string()],
        }
    }

    /// The candidate path taken literally, as the pattern reads.
    fn literal(&self, base: &Path) -> PathBuf {
        let mut literal = OsString::from(base.as_os_str());
        match self {
            Trial::Extensions(exts) => literal.push(format!(".{{{}}}", exts.join(","))),
            Trial::Wildcard => literal.push(".*"),
            Trial::Static => {}
        }
        PathBuf::from(literal)
    }
}

/// Finds the template file for a logical path.
///
/// Returns `None` when nothing matches; absence is never an error.
pub fn resolve_template(site: &Site, request_path: &str, options: &ResolveOptions) -> Option<PathBuf> {
    let key = CacheKey::new(RESOLVE_TEMPLATE, request_path, options);
    site.cache()
        .fetch(key, || search(site, request_path, options))
}

/// Finds a layout by name: `<layouts_dir>/<name>` first, then `<name>` at the
/// source root. A leading `/` on `name` is ignored.
pub fn locate_layout(site: &Site, name: &str, preferred_engine: Option<&str>) -> Option<PathBuf> {
    let mut options = ResolveOptions::new();
    options.preferred_engine = preferred_engine.map(str::to_string);

    // An absolute name would replace layouts_dir entirely when joined.
    let name = name.trim_start_matches('/');
    let in_layouts_dir = site.config().layouts_dir.join(name);
    resolve_template(site, &in_layouts_dir.to_string_lossy(), &options)
        .or_else(|| resolve_template(site, name, &options))
}

/// Finds the automatic-mode layout (`layout.*`), if any.
pub fn locate_auto_layout(site: &Site, preferred_engine: Option<&str>) -> Option<PathBuf> {
    locate_layout(site, LayoutSetting::AUTO_LAYOUT_NAME, preferred_engine)
}

fn search(site: &Site, request_path: &str, options: &ResolveOptions) -> Option<PathBuf> {
    let relative = request_path.trim_start_matches('/');
    let on_disk = site.config().source_dir.join(relative);

    for trial in trials(site, options) {
        if let Some(found) = probe(site, &on_disk, &trial) {
            tracing::debug!(path = request_path, found = %found.display(), "resolved template");
            return Some(found);
        }
    }

    if site.fs().is_file(&on_disk) {
        tracing::debug!(path = request_path, found = %on_disk.display(), "resolved exact file");
        Some(on_disk)
    } else {
        tracing::debug!(path = request_path, "no template found");
        None
    }
}

fn trials(site: &Site, options: &ResolveOptions) -> Vec<Trial> {
    let mut trials = vec![Trial::Wildcard];
    if options.try_static {
        trials.push(Trial::Static);
    }

    let engines = site.engines();
    let preferred = options
        .preferred_engine
        .as_deref()
        .and_then(|name| engines.canonical_engine(name));
    if let Some(engine) = preferred {
        let exts: Vec<String> = engines
            .extensions_for(engine)
            .into_iter()
            .map(str::to_string)
            .collect();
        if !exts.is_empty() {
            trials.insert(0, Trial::Extensions(exts));
        }
    }

    trials
}

fn probe(site: &Site, base: &Path, trial: &Trial) -> Option<PathBuf> {
    let escaped = escape_glob(base);
    let engines = site.engines();

    let matched = trial
        .patterns(&escaped)
        .iter()
        .flat_map(|pattern| {
            tracing::trace!(pattern = %pattern, "probing");
            site.fs().glob(pattern)
        })
        .find(|candidate| engines.handles(candidate));

    matched.or_else(|| {
        let literal = trial.literal(base);
        site.fs().is_file(&literal).then_some(literal)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patterns_per_trial() {
        let trial = Trial::Extensions(vec!["jinja".into(), "j2".into()]);
        assert_eq!(
            trial.patterns("source/[page]"),
            vec!["source/[page].jinja", "source/[page].j2"]
        );
        assert_eq!(Trial::Wildcard.patterns("source/page"), vec!["source/page.*"]);
        assert_eq!(Trial::Static.patterns("source/page"), vec!["source/page"]);
    }

    #[test]
    fn test_literal_candidates() {
        let base = Path::new("source/page");
        assert_eq!(
            Trial::Extensions(vec!["jinja".into(), "j2".into()]).literal(base),
            PathBuf::from("source/page.{jinja,j2}")
        );
        assert_eq!(Trial::Wildcard.literal(base), PathBuf::from("source/page.*"));
        assert_eq!(Trial::Static.literal(base), PathBuf::from("source/page"));
    }
}
