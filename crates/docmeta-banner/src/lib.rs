//! Release-freshness banner selection.
//!
//! Every rendered page carries exactly one banner: either the fixed "you
//! are reading the development version" message, or a released-build
//! message comparing the page's version to the newest stable release. The
//! channel a build belongs to is decided externally (by the branch or tag
//! being built) and fixed for the lifetime of one build; this crate only
//! renders the consequence.

/// Channel tag identifying the unreleased development stream.
pub const DEVELOPMENT_TAG: &str = "latest";

/// CSS selector of the element the renderer injects the banner into.
pub const BANNER_BODY_SELECTOR: &str = "body";

/// The release channel a build belongs to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReleaseChannel {
    /// The unreleased head of development.
    Development,
    /// A published release, carrying its dotted version string.
    Released(String),
}

impl ReleaseChannel {
    /// Map an externally supplied channel tag onto a channel.
    ///
    /// `"latest"` means the development stream; a tag equal to the build's
    /// resolved version string means that released version.
    ///
    /// # Errors
    ///
    /// Any other tag is a configuration error and returns
    /// [`BannerError::UnknownChannel`].
    pub fn from_tag(tag: &str, version: &str) -> Result<Self, BannerError> {
        if tag == DEVELOPMENT_TAG {
            Ok(Self::Development)
        } else if tag == version {
            Ok(Self::Released(version.to_owned()))
        } else {
            Err(BannerError::UnknownChannel {
                tag: tag.to_owned(),
            })
        }
    }
}

/// The banner message pair for one build.
///
/// The development message is fixed text with a static link to the stable
/// docs root. The released template carries `{version}` and `{newest}`
/// slots filled at render time; the comparison text is always shown for
/// released builds, even when the build is the newest release.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BannerMessages {
    /// Message shown on development builds.
    pub development: String,
    /// Message template shown on released builds.
    pub released_template: String,
}

impl BannerMessages {
    /// Build the message pair for a product.
    ///
    /// `stable_docs_url` is where the development banner sends readers,
    /// e.g. `/en/stable`.
    #[must_use]
    pub fn for_product(product_name: &str, stable_docs_url: &str) -> Self {
        Self {
            development: format!(
                "You are reading the documentation for {product_name}'s development version. \
                 <a href=\"{stable_docs_url}\">Click here for the newest stable release.</a>"
            ),
            released_template: format!(
                "You are reading the documentation for {product_name} {{version}}. \
                 The newest stable release is {{newest}}."
            ),
        }
    }

    /// Render the banner for `channel`.
    ///
    /// `newest` is the newest stable version, supplied by the hosting
    /// environment; it is only consulted for released builds.
    #[must_use]
    pub fn render(&self, channel: &ReleaseChannel, newest: &str) -> String {
        match channel {
            ReleaseChannel::Development => self.development.clone(),
            ReleaseChannel::Released(version) => self
                .released_template
                .replace("{version}", version)
                .replace("{newest}", newest),
        }
    }
}

/// Wrap a rendered message in the banner container element.
#[must_use]
pub fn banner_html(message: &str) -> String {
    format!("<div id=\"version-warning-banner\">{message}</div>")
}

/// Banner selection error.
#[derive(Debug, thiserror::Error)]
pub enum BannerError {
    /// The channel tag names neither the development stream nor the
    /// build's own version.
    #[error("unknown release channel `{tag}`")]
    UnknownChannel {
        /// The unrecognized tag.
        tag: String,
    },
}
