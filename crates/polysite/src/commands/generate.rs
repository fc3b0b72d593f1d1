//! `polysite generate` command implementation.

use std::path::PathBuf;

use clap::Args;
use polysite_config::{CliSettings, Config};
use polysite_hosting::synthesize;
use polysite_i18n::{FsTranslationStore, SlugTable, TranslationStore};
use polysite_site::{BuildMode, ManifestSink, RouteSink, expand_site};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the generate command.
#[derive(Args)]
pub(crate) struct GenerateArgs {
    /// Path to configuration file (default: auto-discover polysite.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Translation records path (overrides config).
    #[arg(long)]
    records: Option<PathBuf>,

    /// Routes manifest path (overrides config).
    #[arg(long)]
    manifest: Option<PathBuf>,

    /// Enable hosting-rule generation (overrides config).
    #[arg(long)]
    hosting: Option<bool>,

    /// Disable hosting-rule generation.
    #[arg(long, conflicts_with = "hosting")]
    no_hosting: bool,

    /// Preview build: attach router match patterns for 404 pages.
    #[arg(long)]
    preview: bool,

    /// Enable verbose output (show expansion and artifact logs).
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl GenerateArgs {
    /// Execute the generate command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, expansion, or artifact output
    /// fails. A not-ready translation store is not an error: the pass is
    /// skipped and nothing is written.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let generate_hosting = self.resolve_generate_hosting();

        let cli_settings = CliSettings {
            records: self.records,
            manifest: self.manifest,
            generate_hosting,
        };

        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        config.validate()?;

        let mode = if self.preview {
            BuildMode::Preview
        } else {
            BuildMode::Production
        };

        let store = FsTranslationStore::new(config.translations_resolved.records.clone());
        let records = store.fetch()?;
        let slugs = SlugTable::resolve(&config.languages, &records);

        let Some(expansion) = expand_site(&config.languages, &config.pages, &slugs, mode)? else {
            output.warning("Translation data not ready; nothing generated");
            return Ok(());
        };

        let mut sink = ManifestSink::new(config.routes_resolved.manifest.clone());
        for route in &expansion.routes {
            sink.register(route.clone())?;
        }
        sink.finish()?;
        output.info(&format!(
            "Routes manifest: {}",
            config.routes_resolved.manifest.display()
        ));

        if config.hosting_resolved.generate {
            synthesize(
                &config.hosting_resolved.baseline,
                &config.hosting_resolved.output,
                &expansion.redirects,
                &expansion.rewrites,
            )?;
            output.info(&format!(
                "Hosting rules: {}",
                config.hosting_resolved.output.display()
            ));
        }

        output.success(&format!(
            "Generated {} routes, {} redirects, {} rewrites",
            expansion.routes.len(),
            expansion.redirects.len(),
            expansion.rewrites.len()
        ));

        Ok(())
    }

    /// Resolve the paired --hosting / --no-hosting flags.
    fn resolve_generate_hosting(&self) -> Option<bool> {
        if self.no_hosting {
            Some(false)
        } else {
            self.hosting
        }
    }
}
