//! Filesystem-backed translation store.

use std::path::PathBuf;

use crate::store::{StoreError, TranslationRecord, TranslationStore};

/// Translation store reading a JSON record dump from disk.
///
/// The file is a flat JSON array of `{lang, namespace, slug}` objects as
/// written by the content build; `slug` may be `null` or omitted for
/// namespaces whose translation is still pending.
#[derive(Debug)]
pub struct FsTranslationStore {
    path: PathBuf,
}

impl FsTranslationStore {
    /// Create a store reading from the given record dump.
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl TranslationStore for FsTranslationStore {
    fn fetch(&self) -> Result<Vec<TranslationRecord>, StoreError> {
        if !self.path.exists() {
            return Err(StoreError::NotFound(self.path.clone()));
        }

        let content = std::fs::read_to_string(&self.path)?;
        let records: Vec<TranslationRecord> = serde_json::from_str(&content)?;

        tracing::debug!(
            path = %self.path.display(),
            count = records.len(),
            "Fetched translation records"
        );

        Ok(records)
    }
}
