//! Mock translation store for testing.

use crate::store::{StoreError, TranslationRecord, TranslationStore};

/// In-memory translation store for tests.
///
/// Use the builder methods to seed the mock with records.
///
/// # Example
///
/// ```ignore
/// use polysite_i18n::{MockTranslationStore, TranslationStore};
///
/// let store = MockTranslationStore::new()
///     .with_slug("en", "about", "about-us")
///     .with_pending("de", "about");
///
/// let records = store.fetch().unwrap();
/// ```
#[derive(Debug, Default)]
pub struct MockTranslationStore {
    records: Vec<TranslationRecord>,
}

impl MockTranslationStore {
    /// Create a new empty mock store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record with a resolved slug.
    #[must_use]
    pub fn with_slug(
        mut self,
        lang: impl Into<String>,
        namespace: impl Into<String>,
        slug: impl Into<String>,
    ) -> Self {
        self.records
            .push(TranslationRecord::new(lang, namespace, slug));
        self
    }

    /// Add a record whose slug is still pending.
    #[must_use]
    pub fn with_pending(mut self, lang: impl Into<String>, namespace: impl Into<String>) -> Self {
        self.records.push(TranslationRecord::pending(lang, namespace));
        self
    }
}

impl TranslationStore for MockTranslationStore {
    fn fetch(&self) -> Result<Vec<TranslationRecord>, StoreError> {
        Ok(self.records.clone())
    }
}
