//! Version resolution from a C header file.
//!
//! The product version is defined once, in the public header, as three
//! macro-style integer definitions:
//!
//! ```c
//! #define WIDGET_HEADER_VERSION_MAJOR 1
//! #define WIDGET_HEADER_VERSION_MINOR 4
//! #define WIDGET_HEADER_VERSION_PATCH 2
//! ```
//!
//! [`VersionTriple::from_header_file`] extracts the three components and is
//! the single source of truth for the version used everywhere else in the
//! build. Each macro must be defined exactly once: a missing or duplicated
//! definition aborts the build rather than guessing, because rendering
//! documentation with a silently wrong version is worse than failing.
//!
//! Resolution is a pure function of the header contents — nothing is cached
//! across builds, and no coherence check is made against previously
//! published versions.

use std::fmt;
use std::path::{Path, PathBuf};

use regex::Regex;

/// The three macro names that define the version components.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VersionMacros {
    /// Macro defining the major version component.
    pub major: String,
    /// Macro defining the minor version component.
    pub minor: String,
    /// Macro defining the patch version component.
    pub patch: String,
}

impl VersionMacros {
    /// Conventional macro names for a product: `<PREFIX>_HEADER_VERSION_MAJOR`
    /// and friends, with `prefix` uppercased.
    #[must_use]
    pub fn with_prefix(prefix: &str) -> Self {
        let prefix = prefix.to_uppercase();
        Self {
            major: format!("{prefix}_HEADER_VERSION_MAJOR"),
            minor: format!("{prefix}_HEADER_VERSION_MINOR"),
            patch: format!("{prefix}_HEADER_VERSION_PATCH"),
        }
    }
}

/// A resolved `(major, minor, patch)` version.
///
/// `Display` renders the canonical dotted form (`"1.4.2"`), which is the
/// string threaded through link templates and banner messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VersionTriple {
    /// Major version component.
    pub major: u64,
    /// Minor version component.
    pub minor: u64,
    /// Patch version component.
    pub patch: u64,
}

impl fmt::Display for VersionTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl VersionTriple {
    /// Extract the version from header text.
    ///
    /// Each component is matched against
    /// `^#define <MACRO> <digits>$` in multi-line mode, with one or more
    /// spaces between the macro name and the digits. Exactly one match per
    /// component is required across the whole text.
    ///
    /// # Errors
    ///
    /// Returns [`VersionError::MissingComponent`] when a macro is absent,
    /// [`VersionError::AmbiguousComponent`] when it is defined more than
    /// once, and [`VersionError::ComponentOutOfRange`] when the digit run
    /// does not fit in a `u64`.
    pub fn from_header_text(text: &str, macros: &VersionMacros) -> Result<Self, VersionError> {
        Ok(Self {
            major: extract_component(text, &macros.major)?,
            minor: extract_component(text, &macros.minor)?,
            patch: extract_component(text, &macros.patch)?,
        })
    }

    /// Read `path` and extract the version from its contents.
    ///
    /// # Errors
    ///
    /// Returns [`VersionError::Io`] when the header cannot be read, plus
    /// everything [`Self::from_header_text`] returns.
    pub fn from_header_file(path: &Path, macros: &VersionMacros) -> Result<Self, VersionError> {
        let text = std::fs::read_to_string(path).map_err(|source| VersionError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_header_text(&text, macros)
    }
}

/// Match one version macro, requiring exactly one definition.
fn extract_component(text: &str, macro_name: &str) -> Result<u64, VersionError> {
    let pattern = format!(r"(?m)^#define {} +(\d+)$", regex::escape(macro_name));
    let re = Regex::new(&pattern)?;

    let mut matches = re.captures_iter(text);
    let Some(captures) = matches.next() else {
        return Err(VersionError::MissingComponent {
            macro_name: macro_name.to_owned(),
        });
    };
    if matches.next().is_some() {
        return Err(VersionError::AmbiguousComponent {
            macro_name: macro_name.to_owned(),
        });
    }

    let digits = captures.get(1).map_or("", |m| m.as_str());
    digits
        .parse()
        .map_err(|_| VersionError::ComponentOutOfRange {
            macro_name: macro_name.to_owned(),
        })
}

/// Version resolution error.
///
/// All variants are fatal: the build aborts so the operator can fix the
/// header, rather than producing docs for a guessed version.
#[derive(Debug, thiserror::Error)]
pub enum VersionError {
    /// The macro for one component was not found in the header.
    #[error("version component not found: no `#define {macro_name}` line in header")]
    MissingComponent {
        /// The macro that was searched for.
        macro_name: String,
    },

    /// The macro for one component was defined more than once.
    #[error("ambiguous version definition: `#define {macro_name}` appears more than once")]
    AmbiguousComponent {
        /// The macro that matched multiple lines.
        macro_name: String,
    },

    /// The matched digit run does not fit in a `u64`.
    #[error("version component `{macro_name}` is out of range")]
    ComponentOutOfRange {
        /// The macro whose value overflowed.
        macro_name: String,
    },

    /// The header file could not be read.
    #[error("failed to read version header {}: {}", path.display(), source)]
    Io {
        /// Path to the header file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A component's macro name produced an invalid search pattern.
    #[error("invalid version macro pattern: {0}")]
    Pattern(#[from] regex::Error),
}
