//! Translation store trait and error types.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One per-language, per-namespace translation record.
///
/// Records are produced by the external content build. The namespace of a
/// record matches the page identifier it localizes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationRecord {
    /// Language code (e.g. "en").
    pub lang: String,
    /// Namespace identifier; matches the page id it localizes.
    pub namespace: String,
    /// Localized URL slug.
    ///
    /// `None` when the namespace exists but its slug has not been
    /// translated yet. Such records are kept during resolution, not
    /// dropped: "namespace present, slug absent" is distinct from
    /// "namespace absent".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

impl TranslationRecord {
    /// Create a record with a resolved slug.
    #[must_use]
    pub fn new(
        lang: impl Into<String>,
        namespace: impl Into<String>,
        slug: impl Into<String>,
    ) -> Self {
        Self {
            lang: lang.into(),
            namespace: namespace.into(),
            slug: Some(slug.into()),
        }
    }

    /// Create a record whose slug is still pending.
    #[must_use]
    pub fn pending(lang: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            lang: lang.into(),
            namespace: namespace.into(),
            slug: None,
        }
    }
}

/// Source of translation records for one generation pass.
///
/// Implementations return the full record set in one fetch; a generation
/// pass never re-reads the store.
pub trait TranslationStore {
    /// Fetch all translation records.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backing source cannot be read or
    /// parsed.
    fn fetch(&self) -> Result<Vec<TranslationRecord>, StoreError>;
}

/// Translation store error.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Record source not found.
    #[error("Translation records not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Record parsing error.
    #[error("Invalid translation records: {0}")]
    Parse(#[from] serde_json::Error),
}
