//! Registry of API-reference projects.
//!
//! Each independently-versioned API surface gets one entry: where its
//! machine-extracted reference XML lives, and which source headers it was
//! extracted from. The external aggregator uses the identifier as a
//! namespace to disambiguate same-named symbols across surfaces, so
//! identifiers must be unique within a build — [`ReferenceProjects::insert`]
//! rejects duplicates instead of silently merging.
//!
//! This crate is declarative data only; header contents are never parsed
//! here.

use std::collections::BTreeMap;
use std::path::PathBuf;

/// One documented API surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReferenceProject {
    /// Directory holding the pre-extracted reference XML.
    pub xml_dir: PathBuf,
    /// Root directory of the source headers the XML was extracted from.
    pub source_root: PathBuf,
    /// Header filenames under `source_root`, as labels for the aggregator.
    pub source_files: Vec<String>,
}

/// Identifier-keyed set of reference projects.
///
/// Iteration order is the identifier order; entries are siblings with no
/// ordering dependency between them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReferenceProjects {
    projects: BTreeMap<String, ReferenceProject>,
    default: Option<String>,
}

impl ReferenceProjects {
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a project under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`RefDocsError::DuplicateIdentifier`] when `id` is already
    /// registered.
    pub fn insert(
        &mut self,
        id: impl Into<String>,
        project: ReferenceProject,
    ) -> Result<(), RefDocsError> {
        let id = id.into();
        if self.projects.contains_key(&id) {
            return Err(RefDocsError::DuplicateIdentifier { id });
        }
        self.projects.insert(id, project);
        Ok(())
    }

    /// Mark `id` as the default project for unqualified symbol lookups.
    ///
    /// # Errors
    ///
    /// Returns [`RefDocsError::UnknownProject`] when `id` is not registered.
    pub fn set_default(&mut self, id: &str) -> Result<(), RefDocsError> {
        if !self.projects.contains_key(id) {
            return Err(RefDocsError::UnknownProject { id: id.to_owned() });
        }
        self.default = Some(id.to_owned());
        Ok(())
    }

    /// The default project identifier, if one was set.
    #[must_use]
    pub fn default_project(&self) -> Option<&str> {
        self.default.as_deref()
    }

    /// Look up a project by identifier.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ReferenceProject> {
        self.projects.get(id)
    }

    /// Iterate over `(identifier, project)` pairs in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ReferenceProject)> {
        self.projects.iter().map(|(id, p)| (id.as_str(), p))
    }

    /// Number of registered projects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.projects.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}

/// Reference-project registry error.
#[derive(Debug, thiserror::Error)]
pub enum RefDocsError {
    /// Two projects were registered under the same identifier.
    #[error("duplicate reference project identifier `{id}`")]
    DuplicateIdentifier {
        /// The identifier registered twice.
        id: String,
    },

    /// The default project identifier is not registered.
    #[error("unknown reference project `{id}`")]
    UnknownProject {
        /// The identifier that was not found.
        id: String,
    },
}
