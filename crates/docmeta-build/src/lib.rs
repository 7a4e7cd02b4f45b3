//! Build-time metadata context.
//!
//! This crate wires the leaf crates together once per documentation build:
//! resolve the product version from its header, derive the repository URL
//! templates, register the API-reference projects, and prepare the
//! freshness banner messages. The result is a single immutable
//! [`BuildContext`] constructed at build start and passed by reference to
//! every consumer — there is no global mutable state and nothing is cached
//! across builds.
//!
//! Every failure here is fatal by design: the build aborts with an error
//! naming the offending component or identifier, rather than producing
//! documentation with a silently wrong version.

mod config;

pub use config::{ConfigError, DocsMetaConfig, ProjectConfig, RefDocsConfig, VersionConfig};

use std::path::Path;

use docmeta_banner::{BannerError, BannerMessages, ReleaseChannel};
use docmeta_links::{LinkTemplates, RepoLocator};
use docmeta_refdocs::{RefDocsError, ReferenceProjects};
use docmeta_version::{VersionError, VersionTriple};

/// Everything the renderer needs from this layer, computed once per build.
#[derive(Debug)]
pub struct BuildContext {
    /// The resolved version components.
    pub version: VersionTriple,
    /// Canonical dotted rendering of [`Self::version`].
    pub version_string: String,
    /// Version-parameterized repository URL templates.
    pub links: LinkTemplates,
    /// Regex source for the external link checker's ignore list.
    pub linkcheck_ignore: String,
    /// API-reference project registry.
    pub refdocs: ReferenceProjects,
    /// Freshness banner messages.
    pub banners: BannerMessages,
}

impl BuildContext {
    /// Load configuration from `path` and resolve the context.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be loaded or resolution fails.
    pub fn load(path: &Path) -> Result<Self, BuildError> {
        let config = DocsMetaConfig::load(path)?;
        Self::resolve(&config)
    }

    /// Resolve the full context from loaded configuration.
    ///
    /// Runs the whole derivation sequence: version resolution, link
    /// templating, reference-project registration (where duplicate
    /// identifiers are caught), and banner preparation.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::Version`] when the version header is missing,
    /// unreadable, or defines a component zero or multiple times, and
    /// [`BuildError::RefDocs`] when reference-project identifiers collide
    /// or the default names an unregistered project.
    pub fn resolve(config: &DocsMetaConfig) -> Result<Self, BuildError> {
        let version = VersionTriple::from_header_file(
            &config.version_resolved.header,
            &config.version_resolved.macros,
        )?;
        let version_string = version.to_string();
        tracing::info!(
            version = %version_string,
            header = %config.version_resolved.header.display(),
            "Resolved product version"
        );

        let repo = RepoLocator::new(
            &config.project.host,
            &config.project.org,
            &config.project.repo,
        );
        let links = LinkTemplates::new(&repo, &version_string);
        let linkcheck_ignore = LinkTemplates::linkcheck_ignore_pattern(&repo);

        let mut refdocs = ReferenceProjects::new();
        for (id, project) in &config.refdocs_resolved.projects {
            refdocs.insert(id.clone(), project.clone())?;
        }
        if let Some(default) = &config.refdocs_resolved.default {
            refdocs.set_default(default)?;
        }
        tracing::debug!(
            project_count = refdocs.len(),
            "Registered reference projects"
        );

        let banners = BannerMessages::for_product(
            &config.project.name,
            &config.project.stable_docs_url,
        );

        Ok(Self {
            version,
            version_string,
            links,
            linkcheck_ignore,
            refdocs,
            banners,
        })
    }

    /// Render the freshness banner for the build's channel tag.
    ///
    /// `tag` is supplied by the hosting environment: `"latest"` for the
    /// development stream, or the build's own version string for a
    /// released build. `newest` is the newest stable version, also
    /// environment-supplied.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::Banner`] when `tag` names neither channel.
    pub fn banner_for(&self, tag: &str, newest: &str) -> Result<String, BuildError> {
        let channel = ReleaseChannel::from_tag(tag, &self.version_string)?;
        Ok(self.banners.render(&channel, newest))
    }
}

/// Build-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Version(#[from] VersionError),

    #[error("{0}")]
    RefDocs(#[from] RefDocsError),

    #[error("{0}")]
    Banner(#[from] BannerError),
}
