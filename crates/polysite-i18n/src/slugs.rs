//! Slug resolution and availability checks.
//!
//! [`SlugTable`] reshapes the flat record set into per-language
//! namespace→slug maps for O(1) lookups during site expansion, and carries
//! the availability check that gates a generation pass while the content
//! build is still in flight.

use std::collections::HashMap;

use crate::store::TranslationRecord;

/// Result of a slug lookup.
///
/// Distinguishes a namespace that was never recorded for a language from
/// one that was recorded without a translated slug. Site expansion treats
/// both as fatal, but they point at different problems: a config typo vs
/// a content-pipeline gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlugLookup<'a> {
    /// Slug resolved.
    Found(&'a str),
    /// Namespace recorded for the language, slug not translated yet.
    Absent,
    /// Namespace not recorded for the language at all.
    Missing,
}

/// Per-language namespace→slug lookup table.
///
/// Built once per generation pass from the full record set. Every
/// configured language gets an entry, even when no records matched it;
/// that empty map is exactly what the availability check looks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlugTable {
    by_lang: HashMap<String, HashMap<String, Option<String>>>,
}

impl SlugTable {
    /// Build the table from the configured languages and the raw records.
    ///
    /// For each language, all records matching that language are keyed by
    /// namespace; later records win on duplicate namespaces. Records with
    /// an absent slug are kept as `None`. Records for languages outside
    /// the configured list are ignored.
    #[must_use]
    pub fn resolve(languages: &[String], records: &[TranslationRecord]) -> Self {
        let mut by_lang = HashMap::new();

        for language in languages {
            let mut namespaces = HashMap::new();

            for record in records {
                if &record.lang == language {
                    namespaces.insert(record.namespace.clone(), record.slug.clone());
                }
            }

            by_lang.insert(language.clone(), namespaces);
        }

        Self { by_lang }
    }

    /// Look up the slug for a namespace in a language.
    #[must_use]
    pub fn lookup(&self, lang: &str, namespace: &str) -> SlugLookup<'_> {
        match self.by_lang.get(lang).and_then(|n| n.get(namespace)) {
            Some(Some(slug)) => SlugLookup::Found(slug),
            Some(None) => SlugLookup::Absent,
            None => SlugLookup::Missing,
        }
    }

    /// Number of namespaces recorded for a language.
    #[must_use]
    pub fn namespace_count(&self, lang: &str) -> usize {
        self.by_lang.get(lang).map_or(0, HashMap::len)
    }

    /// Languages from the given list with zero resolved namespaces.
    ///
    /// Preserves the order of the input list.
    #[must_use]
    pub fn missing_languages<'a>(&self, languages: &'a [String]) -> Vec<&'a str> {
        languages
            .iter()
            .filter(|lang| self.namespace_count(lang) == 0)
            .map(String::as_str)
            .collect()
    }

    /// Whether every language has at least one resolved namespace.
    ///
    /// A `false` here aborts the whole generation pass: translation
    /// content arrives asynchronously, and a transient empty fetch must
    /// not emit a broken partial site.
    #[must_use]
    pub fn is_ready(&self, languages: &[String]) -> bool {
        self.missing_languages(languages).is_empty()
    }
}
