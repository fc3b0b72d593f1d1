//! Hosting rule types.

use serde::{Deserialize, Serialize};

/// HTTP status for permanent redirects.
const PERMANENT: u16 = 301;

/// Hosting-level redirect from an un-prefixed path to its
/// language-prefixed form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectRule {
    /// Un-prefixed source path (e.g. `/about-us`).
    pub source: String,
    /// Language-prefixed destination path (e.g. `/en/about-us`).
    pub destination: String,
    /// HTTP status code (JSON key `type`, matching the hosting schema).
    #[serde(rename = "type")]
    pub status: u16,
}

impl RedirectRule {
    /// Create a permanent (301) redirect.
    #[must_use]
    pub fn permanent(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            status: PERMANENT,
        }
    }
}

/// Hosting-level rewrite from a source pattern to a served file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteRule {
    /// Source pattern (e.g. `/en/**`).
    pub source: String,
    /// Destination path (e.g. `/en/404/index.html`).
    pub destination: String,
}

impl RewriteRule {
    /// Catch-all rewrite serving a language's 404 page.
    #[must_use]
    pub fn not_found(lang: &str) -> Self {
        Self {
            source: format!("/{lang}/**"),
            destination: format!("/{lang}/404/index.html"),
        }
    }
}
