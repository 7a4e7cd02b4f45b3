//! Version-parameterized repository URL templates.
//!
//! All external repository links in the rendered docs come from here, so a
//! hosting change requires a single edit. Every template is a deterministic
//! function of the repository location and the resolved version string; no
//! network access happens and no check is made that a tagged release
//! actually exists (linting published URLs is the renderer's job).
//!
//! Templates carry the `%s` substitution slot verbatim — the renderer's
//! link-expansion convention. Slot values are substituted as-is, without
//! escaping or validation: a malformed path produces a malformed URL.

use std::fmt;

/// Fixed hosting location of the product's repository.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RepoLocator {
    /// Hosting root including scheme, e.g. `https://github.com`.
    pub host: String,
    /// Organization or user that owns the repository.
    pub org: String,
    /// Repository name.
    pub product: String,
}

impl RepoLocator {
    /// Create a locator from hosting constants.
    pub fn new(
        host: impl Into<String>,
        org: impl Into<String>,
        product: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            org: org.into(),
            product: product.into(),
        }
    }

    /// Base URL of the repository, without a trailing slash.
    #[must_use]
    pub fn repo_url(&self) -> String {
        format!(
            "{}/{}/{}",
            self.host.trim_end_matches('/'),
            self.org,
            self.product
        )
    }
}

/// A URL pattern with an optional `%s` substitution slot and a display label.
///
/// An empty label tells the renderer to display the substituted value
/// itself as the link text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkTemplate {
    /// URL pattern, containing at most one `%s` slot.
    pub pattern: String,
    /// Link caption; empty means "show the slot value".
    pub label: String,
}

impl LinkTemplate {
    fn new(pattern: String) -> Self {
        Self {
            pattern,
            label: String::new(),
        }
    }

    /// Whether the pattern contains a substitution slot.
    #[must_use]
    pub fn has_slot(&self) -> bool {
        self.pattern.contains("%s")
    }

    /// Fill the slot with `value`, verbatim.
    ///
    /// Slot-less templates are returned unchanged.
    #[must_use]
    pub fn expand(&self, value: &str) -> String {
        self.pattern.replacen("%s", value, 1)
    }
}

impl fmt::Display for LinkTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

/// A badge image plus the page it links to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Badge {
    /// URL of the badge image.
    pub image_url: String,
    /// URL the badge links to.
    pub target_url: String,
}

/// The full set of named templates derived from one resolved version.
///
/// Built once per build from the [`RepoLocator`] and the dotted version
/// string, then handed read-only to the renderer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkTemplates {
    /// Tarball of the tagged release. No slot.
    pub release_archive: LinkTemplate,
    /// A file as of the current version. `path` slot.
    pub file_at_version: LinkTemplate,
    /// A directory as of the current version. `path` slot.
    pub dir_at_version: LinkTemplate,
    /// Diff between two revisions. Revision-spec slot, e.g.
    /// `v1.0.0...v1.1.0`.
    pub diff: LinkTemplate,
    /// shields.io badge showing the current version.
    pub version_badge: Badge,
    /// CI build-status badge.
    pub build_badge: Badge,
}

impl LinkTemplates {
    /// Derive all templates for `version` (dotted, without the `v` prefix).
    #[must_use]
    pub fn new(repo: &RepoLocator, version: &str) -> Self {
        let base = repo.repo_url();
        Self {
            release_archive: LinkTemplate::new(format!("{base}/archive/v{version}.tar.gz")),
            file_at_version: LinkTemplate::new(format!("{base}/blob/v{version}/%s")),
            dir_at_version: LinkTemplate::new(format!("{base}/tree/v{version}/%s")),
            diff: LinkTemplate::new(format!("{base}/compare/%s")),
            version_badge: Badge {
                image_url: format!(
                    "https://img.shields.io/badge/version-{version}-yellow.svg"
                ),
                target_url: format!("{base}/releases"),
            },
            build_badge: Badge {
                image_url: format!("{base}/workflows/build/badge.svg?branch=main"),
                target_url: format!("{base}/actions"),
            },
        }
    }

    /// Regex source matching every versioned URL this set generates.
    ///
    /// Handed to the external link checker so it skips archive/blob/tree
    /// URLs for tags that may not be published yet.
    #[must_use]
    pub fn linkcheck_ignore_pattern(repo: &RepoLocator) -> String {
        let base = regex::escape(&repo.repo_url());
        format!("{base}/(archive|blob|tree)/.*")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn repo() -> RepoLocator {
        RepoLocator::new("https://github.com", "example", "widget")
    }

    #[test]
    fn test_release_archive_has_no_slot() {
        let links = LinkTemplates::new(&repo(), "3.2.1");
        assert!(!links.release_archive.has_slot());
        assert_eq!(
            links.release_archive.pattern,
            "https://github.com/example/widget/archive/v3.2.1.tar.gz"
        );
    }

    #[test]
    fn test_file_at_version_expands_path() {
        let links = LinkTemplates::new(&repo(), "3.2.1");
        assert_eq!(
            links.file_at_version.expand("docs/conf.py"),
            "https://github.com/example/widget/blob/v3.2.1/docs/conf.py"
        );
    }

    #[test]
    fn test_dir_at_version_expands_path() {
        let links = LinkTemplates::new(&repo(), "3.2.1");
        assert_eq!(
            links.dir_at_version.expand("include"),
            "https://github.com/example/widget/tree/v3.2.1/include"
        );
    }

    #[test]
    fn test_diff_is_version_independent() {
        let a = LinkTemplates::new(&repo(), "1.0.0");
        let b = LinkTemplates::new(&repo(), "2.0.0");
        assert_eq!(a.diff, b.diff);
        assert_eq!(
            a.diff.expand("v1.0.0...v1.1.0"),
            "https://github.com/example/widget/compare/v1.0.0...v1.1.0"
        );
    }

    #[test]
    fn test_slot_values_are_not_escaped() {
        // Malformed paths pass through verbatim; validating them is the
        // renderer's responsibility.
        let links = LinkTemplates::new(&repo(), "1.0.0");
        assert_eq!(
            links.file_at_version.expand("a b/../c?d=e"),
            "https://github.com/example/widget/blob/v1.0.0/a b/../c?d=e"
        );
    }

    #[test]
    fn test_expand_without_slot_is_identity() {
        let links = LinkTemplates::new(&repo(), "1.0.0");
        assert_eq!(
            links.release_archive.expand("ignored"),
            links.release_archive.pattern
        );
    }

    #[test]
    fn test_trailing_slash_on_host_is_trimmed() {
        let repo = RepoLocator::new("https://github.com/", "example", "widget");
        assert_eq!(repo.repo_url(), "https://github.com/example/widget");
    }

    #[test]
    fn test_version_badge() {
        let links = LinkTemplates::new(&repo(), "3.2.1");
        assert_eq!(
            links.version_badge.image_url,
            "https://img.shields.io/badge/version-3.2.1-yellow.svg"
        );
        assert_eq!(
            links.version_badge.target_url,
            "https://github.com/example/widget/releases"
        );
    }

    #[test]
    fn test_build_badge() {
        let links = LinkTemplates::new(&repo(), "3.2.1");
        assert_eq!(
            links.build_badge.image_url,
            "https://github.com/example/widget/workflows/build/badge.svg?branch=main"
        );
        assert_eq!(
            links.build_badge.target_url,
            "https://github.com/example/widget/actions"
        );
    }

    #[test]
    fn test_linkcheck_ignore_pattern_escapes_dots() {
        let pattern = LinkTemplates::linkcheck_ignore_pattern(&repo());
        assert_eq!(
            pattern,
            r"https://github\.com/example/widget/(archive|blob|tree)/.*"
        );
    }

    #[test]
    fn test_templates_are_deterministic() {
        assert_eq!(
            LinkTemplates::new(&repo(), "1.4.2"),
            LinkTemplates::new(&repo(), "1.4.2")
        );
    }
}
