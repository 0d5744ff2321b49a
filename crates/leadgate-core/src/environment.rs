//! Hosting-environment detection.
//!
//! The same front-end artifact is deployed to a static file host and to
//! the first-party dynamic host; at runtime it must self-select a delivery
//! channel without a build-time flag. Classification is a pure function of
//! the page host, passed in explicitly so no simulated browser is needed
//! to test it.

/// Suffix of the recognized static-hosting domain.
const STATIC_HOST_SUFFIX: &str = "netlify.app";

/// The first-party dynamic-hosting domain.
const DYNAMIC_HOST_DOMAIN: &str = "zenprivata.com";

/// Which hosting target the page is running under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// Static file host — no first-party endpoints; deliver via the relay.
    Static,
    /// First-party dynamic host — deliver via the backend endpoints.
    Dynamic,
}

impl Environment {
    /// Classify a page host.
    ///
    /// Only a host carrying the first-party dynamic-hosting domain
    /// classifies as [`Environment::Dynamic`]; everything else — the
    /// static host, local development hosts, previews — defaults to
    /// [`Environment::Static`]. Recomputed per submission attempt.
    #[must_use]
    pub fn classify(host: &str) -> Self {
        let host = host.to_ascii_lowercase();
        if host.contains(STATIC_HOST_SUFFIX) {
            return Self::Static;
        }
        if host.contains(DYNAMIC_HOST_DOMAIN) {
            return Self::Dynamic;
        }
        Self::Static
    }
}
