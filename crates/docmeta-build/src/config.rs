//! Build configuration loaded from `docmeta.toml`.
//!
//! The config file names the static facts of the build: the product, its
//! repository hosting location, the version header, and the API-reference
//! projects. Paths are stored as relative strings in the TOML and resolved
//! against the config file's directory after loading.

use std::path::{Path, PathBuf};

use docmeta_refdocs::ReferenceProject;
use docmeta_version::VersionMacros;
use serde::Deserialize;

/// Build configuration.
#[derive(Debug, Deserialize)]
pub struct DocsMetaConfig {
    /// Product and repository identity.
    pub project: ProjectConfig,
    /// Version resolution settings (paths as relative strings from TOML).
    #[serde(default)]
    version: VersionConfigRaw,
    /// Reference-doc projects (paths as relative strings from TOML).
    #[serde(default)]
    refdocs: RefDocsConfigRaw,

    /// Resolved version settings (set after loading).
    #[serde(skip)]
    pub version_resolved: VersionConfig,
    /// Resolved reference-doc projects (set after loading).
    #[serde(skip)]
    pub refdocs_resolved: RefDocsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Product and repository identity.
#[derive(Debug, Deserialize)]
pub struct ProjectConfig {
    /// Human-readable product name, used in banner messages.
    pub name: String,
    /// Repository owner.
    pub org: String,
    /// Repository name.
    pub repo: String,
    /// Hosting root including scheme.
    #[serde(default = "default_host")]
    pub host: String,
    /// Where the development banner sends readers.
    #[serde(default = "default_stable_docs_url")]
    pub stable_docs_url: String,
}

fn default_host() -> String {
    "https://github.com".to_owned()
}

fn default_stable_docs_url() -> String {
    "/en/stable".to_owned()
}

/// Raw version settings as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct VersionConfigRaw {
    header: Option<String>,
    major_macro: Option<String>,
    minor_macro: Option<String>,
    patch_macro: Option<String>,
}

/// Resolved version settings with an absolute header path.
#[derive(Debug)]
pub struct VersionConfig {
    /// The header file that is the source of truth for the version.
    pub header: PathBuf,
    /// Macro names for the three version components.
    pub macros: VersionMacros,
}

impl Default for VersionConfig {
    fn default() -> Self {
        Self {
            header: PathBuf::new(),
            macros: VersionMacros::with_prefix(""),
        }
    }
}

/// Raw reference-doc settings as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct RefDocsConfigRaw {
    default: Option<String>,
    projects: Vec<RefProjectRaw>,
}

/// One `[[refdocs.projects]]` entry.
#[derive(Debug, Deserialize)]
struct RefProjectRaw {
    id: String,
    xml_dir: String,
    source_root: String,
    #[serde(default)]
    source_files: Vec<String>,
}

/// Resolved reference-doc projects with absolute paths.
///
/// Kept as a plain list here; uniqueness of identifiers is enforced when
/// the registry is built at aggregation time.
#[derive(Debug, Default)]
pub struct RefDocsConfig {
    /// Default project identifier for unqualified symbol lookups.
    pub default: Option<String>,
    /// `(identifier, project)` entries in declaration order.
    pub projects: Vec<(String, ReferenceProject)>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl DocsMetaConfig {
    /// Load configuration from `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist, cannot be parsed, or
    /// fails validation.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Parse configuration from a TOML string, resolving paths against
    /// `base`.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing or validation fails.
    pub fn from_toml(content: &str, base: &Path) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(content)?;
        config.resolve_paths(base);
        config.validate()?;
        Ok(config)
    }

    /// Resolve relative paths and macro-name defaults.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let default_header = format!("include/{}.h", self.project.repo);
        let header = self.version.header.as_deref().unwrap_or(&default_header);

        let defaults = VersionMacros::with_prefix(&self.project.repo);
        let pick = |explicit: Option<&str>, default: String| {
            explicit.map_or(default, str::to_owned)
        };

        self.version_resolved = VersionConfig {
            header: config_dir.join(header),
            macros: VersionMacros {
                major: pick(self.version.major_macro.as_deref(), defaults.major),
                minor: pick(self.version.minor_macro.as_deref(), defaults.minor),
                patch: pick(self.version.patch_macro.as_deref(), defaults.patch),
            },
        };

        self.refdocs_resolved = RefDocsConfig {
            default: self.refdocs.default.clone(),
            projects: self
                .refdocs
                .projects
                .iter()
                .map(|p| {
                    (
                        p.id.clone(),
                        ReferenceProject {
                            xml_dir: config_dir.join(&p.xml_dir),
                            source_root: config_dir.join(&p.source_root),
                            source_files: p.source_files.clone(),
                        },
                    )
                })
                .collect(),
        };
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any required field is empty or
    /// malformed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.project.name, "project.name")?;
        require_non_empty(&self.project.org, "project.org")?;
        require_non_empty(&self.project.repo, "project.repo")?;
        require_http_url(&self.project.host, "project.host")?;
        require_non_empty(&self.project.stable_docs_url, "project.stable_docs_url")?;

        for (id, _) in &self.refdocs_resolved.projects {
            require_non_empty(id, "refdocs.projects.id")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const MINIMAL: &str = r#"
[project]
name = "Widget"
org = "example"
repo = "widget"
"#;

    #[test]
    fn test_minimal_config_with_defaults() {
        let config = DocsMetaConfig::from_toml(MINIMAL, Path::new("/docs")).unwrap();
        assert_eq!(config.project.host, "https://github.com");
        assert_eq!(config.project.stable_docs_url, "/en/stable");
        assert_eq!(
            config.version_resolved.header,
            PathBuf::from("/docs/include/widget.h")
        );
        assert_eq!(
            config.version_resolved.macros.major,
            "WIDGET_HEADER_VERSION_MAJOR"
        );
        assert!(config.refdocs_resolved.projects.is_empty());
        assert_eq!(config.refdocs_resolved.default, None);
    }

    #[test]
    fn test_missing_project_section_fails_to_parse() {
        let result = DocsMetaConfig::from_toml("", Path::new("/docs"));
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_version_section_overrides() {
        let toml = r#"
[project]
name = "Widget"
org = "example"
repo = "widget"

[version]
header = "../include/public.h"
major_macro = "PUBLIC_API_MAJOR"
"#;
        let config = DocsMetaConfig::from_toml(toml, Path::new("/docs")).unwrap();
        assert_eq!(
            config.version_resolved.header,
            PathBuf::from("/docs/../include/public.h")
        );
        assert_eq!(config.version_resolved.macros.major, "PUBLIC_API_MAJOR");
        // Unset macros keep the repo-derived default.
        assert_eq!(
            config.version_resolved.macros.minor,
            "WIDGET_HEADER_VERSION_MINOR"
        );
    }

    #[test]
    fn test_refdocs_projects_are_resolved() {
        let toml = r#"
[project]
name = "Widget"
org = "example"
repo = "widget"

[refdocs]
default = "libwidget"

[[refdocs.projects]]
id = "libwidget"
xml_dir = "_build/refdocs/libwidget/xml"
source_root = "../include"
source_files = ["widget.h"]

[[refdocs.projects]]
id = "kwidget"
xml_dir = "_build/refdocs/kwidget/xml"
source_root = "../kernel/include"
source_files = ["kwidget.h"]
"#;
        let config = DocsMetaConfig::from_toml(toml, Path::new("/docs")).unwrap();
        assert_eq!(config.refdocs_resolved.default, Some("libwidget".to_owned()));
        assert_eq!(config.refdocs_resolved.projects.len(), 2);

        let (id, project) = &config.refdocs_resolved.projects[0];
        assert_eq!(id, "libwidget");
        assert_eq!(
            project.xml_dir,
            PathBuf::from("/docs/_build/refdocs/libwidget/xml")
        );
        assert_eq!(project.source_root, PathBuf::from("/docs/../include"));
        assert_eq!(project.source_files, vec!["widget.h".to_owned()]);
    }

    #[test]
    fn test_validate_empty_name() {
        let toml = r#"
[project]
name = ""
org = "example"
repo = "widget"
"#;
        let err = DocsMetaConfig::from_toml(toml, Path::new("/docs")).unwrap_err();
        assert!(matches!(&err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("project.name"));
    }

    #[test]
    fn test_validate_bad_host_scheme() {
        let toml = r#"
[project]
name = "Widget"
org = "example"
repo = "widget"
host = "ftp://example.com"
"#;
        let err = DocsMetaConfig::from_toml(toml, Path::new("/docs")).unwrap_err();
        assert!(err.to_string().contains("project.host"));
    }

    #[test]
    fn test_validate_empty_refdocs_id() {
        let toml = r#"
[project]
name = "Widget"
org = "example"
repo = "widget"

[[refdocs.projects]]
id = ""
xml_dir = "xml"
source_root = "include"
"#;
        let err = DocsMetaConfig::from_toml(toml, Path::new("/docs")).unwrap_err();
        assert!(err.to_string().contains("refdocs.projects.id"));
    }

    #[test]
    fn test_load_missing_file() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("docmeta.toml");
        let err = DocsMetaConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_resolves_against_config_dir() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("docmeta.toml");
        std::fs::write(&path, MINIMAL).unwrap();

        let config = DocsMetaConfig::load(&path).unwrap();
        assert_eq!(
            config.version_resolved.header,
            temp.path().join("include/widget.h")
        );
        assert_eq!(config.config_path, Some(path));
    }
}
