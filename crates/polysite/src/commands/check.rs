//! `polysite check` command implementation.

use std::path::PathBuf;

use clap::Args;
use polysite_config::{Config, PageDefinition};
use polysite_i18n::{FsTranslationStore, SlugLookup, SlugTable, TranslationStore};
use polysite_site::HOME_PAGE;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Path to configuration file (default: auto-discover polysite.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Translation records path (overrides config).
    #[arg(long)]
    records: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// Reports per-language namespace coverage and slug gaps without
    /// writing anything.
    ///
    /// # Errors
    ///
    /// Returns `CliError::Validation` when any language has no resolved
    /// namespaces or any page is missing a slug.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let cli_settings = polysite_config::CliSettings {
            records: self.records,
            ..Default::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        config.validate()?;

        let store = FsTranslationStore::new(config.translations_resolved.records.clone());
        let records = store.fetch()?;
        let slugs = SlugTable::resolve(&config.languages, &records);

        for lang in &config.languages {
            output.info(&format!(
                "{lang}: {} namespaces resolved",
                slugs.namespace_count(lang)
            ));
        }

        let missing = slugs.missing_languages(&config.languages);
        if !missing.is_empty() {
            for lang in &missing {
                output.warning(&format!("{lang}: no translation data"));
            }
            return Err(CliError::Validation(format!(
                "translation data not ready for: {}",
                missing.join(", ")
            )));
        }

        let mut ids = Vec::new();
        collect_page_ids(&config.pages, &mut ids);

        let mut gaps = 0usize;
        for lang in &config.languages {
            for id in &ids {
                match slugs.lookup(lang, id) {
                    SlugLookup::Found(_) => {}
                    SlugLookup::Absent => {
                        gaps += 1;
                        output.warning(&format!("{lang}/{id}: slug not translated"));
                    }
                    SlugLookup::Missing => {
                        gaps += 1;
                        output.warning(&format!("{lang}/{id}: no slug recorded"));
                    }
                }
            }
        }

        if gaps > 0 {
            return Err(CliError::Validation(format!("{gaps} slug gap(s) found")));
        }

        output.success(&format!(
            "All {} pages resolve in all {} languages",
            ids.len(),
            config.languages.len()
        ));

        Ok(())
    }
}

/// Collect every page id needing a slug, depth-first.
///
/// `home` is exempt: it maps to the language root without a slug.
fn collect_page_ids<'a>(pages: &'a [PageDefinition], ids: &mut Vec<&'a str>) {
    for page in pages {
        if page.id != HOME_PAGE {
            ids.push(&page.id);
        }
        collect_page_ids(&page.children, ids);
    }
}
