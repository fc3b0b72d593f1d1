//! Translation records and slug resolution for Polysite.
//!
//! This crate provides a [`TranslationStore`] trait for fetching the
//! per-language, per-namespace translation records produced by the external
//! content build. This enables:
//!
//! - **Unit testing** without touching the real filesystem
//! - **Backend flexibility** (record dumps today, a content API later)
//! - **Clean separation** between slug resolution and I/O operations
//!
//! On top of the records it provides [`SlugTable`], the per-language
//! namespace→slug lookup used by site expansion, including the
//! availability check that gates a whole generation pass when a language
//! has no resolved namespaces yet.
//!
//! # Example
//!
//! ```ignore
//! use polysite_i18n::{FsTranslationStore, SlugTable, TranslationStore};
//!
//! let store = FsTranslationStore::new("translations/records.json".into());
//! let records = store.fetch()?;
//! let slugs = SlugTable::resolve(&languages, &records);
//! if !slugs.is_ready(&languages) {
//!     return Ok(()); // content build still in flight
//! }
//! ```

mod fs;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod slugs;
mod store;

pub use fs::FsTranslationStore;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockTranslationStore;
pub use slugs::{SlugLookup, SlugTable};
pub use store::{StoreError, TranslationRecord, TranslationStore};
