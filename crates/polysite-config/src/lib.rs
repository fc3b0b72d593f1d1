//! Configuration management for Polysite.
//!
//! Parses `polysite.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! The configuration carries the two inputs owned by the site author: the
//! ordered language list (first entry is the default language) and the
//! logical page tree. Everything path-like (translation records, routes
//! manifest, hosting baseline and output) is resolved relative to the
//! config file directory after parsing.
//!
//! CLI settings can be applied during load via [`CliSettings`].

mod pages;

pub use pages::PageDefinition;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override translation records path.
    pub records: Option<PathBuf>,
    /// Override routes manifest path.
    pub manifest: Option<PathBuf>,
    /// Override hosting-rule generation flag.
    pub generate_hosting: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "polysite.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Configured languages; the first entry is the default language.
    pub languages: Vec<String>,
    /// Logical page tree.
    pub pages: Vec<PageDefinition>,
    /// Translation records configuration (paths are relative strings from TOML).
    translations: TranslationsConfigRaw,
    /// Routes manifest configuration (paths are relative strings from TOML).
    routes: RoutesConfigRaw,
    /// Hosting rules configuration (paths are relative strings from TOML).
    hosting: HostingConfigRaw,

    /// Resolved translations configuration (set after loading).
    #[serde(skip)]
    pub translations_resolved: TranslationsConfig,
    /// Resolved routes configuration (set after loading).
    #[serde(skip)]
    pub routes_resolved: RoutesConfig,
    /// Resolved hosting configuration (set after loading).
    #[serde(skip)]
    pub hosting_resolved: HostingConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw translations configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct TranslationsConfigRaw {
    records: Option<String>,
}

/// Resolved translations configuration with absolute paths.
#[derive(Debug, Default)]
pub struct TranslationsConfig {
    /// Path to the translation record dump produced by the content build.
    pub records: PathBuf,
}

/// Raw routes configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct RoutesConfigRaw {
    manifest: Option<String>,
}

/// Resolved routes configuration with absolute paths.
#[derive(Debug, Default)]
pub struct RoutesConfig {
    /// Path the routes manifest is written to.
    pub manifest: PathBuf,
}

/// Raw hosting configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct HostingConfigRaw {
    generate: Option<bool>,
    baseline: Option<String>,
    output: Option<String>,
}

/// Resolved hosting configuration with absolute paths.
#[derive(Debug, Default)]
pub struct HostingConfig {
    /// Whether to synthesize the hosting-rules artifact.
    pub generate: bool,
    /// Baseline rules document merged ahead of generated rules.
    pub baseline: PathBuf,
    /// Path the merged artifact is written to.
    pub output: PathBuf,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `polysite.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// The default language (first entry of the language list).
    ///
    /// Returns `None` when the language list is empty; a loaded config has
    /// passed validation and always has at least one language.
    #[must_use]
    pub fn default_language(&self) -> Option<&str> {
        self.languages.first().map(String::as_str)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(records) = &settings.records {
            self.translations_resolved.records.clone_from(records);
        }
        if let Some(manifest) = &settings.manifest {
            self.routes_resolved.manifest.clone_from(manifest);
        }
        if let Some(generate) = settings.generate_hosting {
            self.hosting_resolved.generate = generate;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            languages: Vec::new(),
            pages: Vec::new(),
            translations: TranslationsConfigRaw::default(),
            routes: RoutesConfigRaw::default(),
            hosting: HostingConfigRaw::default(),
            translations_resolved: TranslationsConfig {
                records: base.join("translations/records.json"),
            },
            routes_resolved: RoutesConfig {
                manifest: base.join("routes.json"),
            },
            hosting_resolved: HostingConfig {
                generate: false,
                baseline: base.join("config/hosting-defaults.json"),
                output: base.join("hosting.json"),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        // Validate configuration after loading and resolution
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_languages()?;
        pages::validate_pages(&self.pages, "pages")?;
        Ok(())
    }

    /// Validate the language list: non-empty, no empty codes, no duplicates.
    fn validate_languages(&self) -> Result<(), ConfigError> {
        if self.languages.is_empty() {
            return Err(ConfigError::Validation(
                "languages cannot be empty".to_owned(),
            ));
        }

        let mut seen = std::collections::HashSet::new();
        for lang in &self.languages {
            if lang.is_empty() {
                return Err(ConfigError::Validation(
                    "language codes cannot be empty".to_owned(),
                ));
            }
            if !seen.insert(lang.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate language '{lang}'"
                )));
            }
        }

        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.translations_resolved = TranslationsConfig {
            records: resolve(
                self.translations.records.as_deref(),
                "translations/records.json",
            ),
        };

        self.routes_resolved = RoutesConfig {
            manifest: resolve(self.routes.manifest.as_deref(), "routes.json"),
        };

        self.hosting_resolved = HostingConfig {
            generate: self.hosting.generate.unwrap_or(false),
            baseline: resolve(
                self.hosting.baseline.as_deref(),
                "config/hosting-defaults.json",
            ),
            output: resolve(self.hosting.output.as_deref(), "hosting.json"),
        };
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert!(config.languages.is_empty());
        assert!(config.pages.is_empty());
        assert_eq!(
            config.translations_resolved.records,
            PathBuf::from("/test/translations/records.json")
        );
        assert_eq!(
            config.routes_resolved.manifest,
            PathBuf::from("/test/routes.json")
        );
        assert!(!config.hosting_resolved.generate);
        assert_eq!(
            config.hosting_resolved.baseline,
            PathBuf::from("/test/config/hosting-defaults.json")
        );
        assert_eq!(
            config.hosting_resolved.output,
            PathBuf::from("/test/hosting.json")
        );
    }

    #[test]
    fn test_parse_languages() {
        let toml = r#"
languages = ["en", "de", "fr"]
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.languages, vec!["en", "de", "fr"]);
        assert_eq!(config.default_language(), Some("en"));
    }

    #[test]
    fn test_parse_page_tree() {
        let toml = r#"
languages = ["en"]

[[pages]]
id = "home"
component = "src/pages/Home.tsx"
namespaces = ["common", "home"]

[[pages]]
id = "about"
component = "src/pages/About.tsx"
namespaces = ["common", "about"]
meta_robots = "noindex"

[[pages.children]]
id = "team"
component = "src/pages/Team.tsx"
namespaces = ["common", "team"]
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.pages.len(), 2);

        let home = &config.pages[0];
        assert_eq!(home.id, "home");
        assert_eq!(home.namespaces, vec!["common", "home"]);
        assert_eq!(home.meta_robots, None);
        assert!(home.children.is_empty());

        let about = &config.pages[1];
        assert_eq!(about.meta_robots, Some("noindex".to_owned()));
        assert_eq!(about.children.len(), 1);
        assert_eq!(about.children[0].id, "team");
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
languages = ["en"]

[translations]
records = "content/i18n.json"

[routes]
manifest = "build/routes.json"

[hosting]
generate = true
baseline = "config/defaults.json"
output = "firebase.json"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.translations_resolved.records,
            PathBuf::from("/project/content/i18n.json")
        );
        assert_eq!(
            config.routes_resolved.manifest,
            PathBuf::from("/project/build/routes.json")
        );
        assert!(config.hosting_resolved.generate);
        assert_eq!(
            config.hosting_resolved.baseline,
            PathBuf::from("/project/config/defaults.json")
        );
        assert_eq!(
            config.hosting_resolved.output,
            PathBuf::from("/project/firebase.json")
        );
    }

    #[test]
    fn test_validate_empty_languages() {
        let config = Config::default_with_base(Path::new("/test"));
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("languages"));
    }

    #[test]
    fn test_validate_duplicate_language() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.languages = vec!["en".to_owned(), "en".to_owned()];
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate language 'en'"));
    }

    #[test]
    fn test_validate_empty_language_code() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.languages = vec!["en".to_owned(), String::new()];
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("language codes"));
    }

    #[test]
    fn test_apply_cli_settings_records() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            records: Some(PathBuf::from("/custom/records.json")),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(
            config.translations_resolved.records,
            PathBuf::from("/custom/records.json")
        );
        // Unchanged
        assert_eq!(
            config.routes_resolved.manifest,
            PathBuf::from("/test/routes.json")
        );
    }

    #[test]
    fn test_apply_cli_settings_generate_hosting() {
        let mut config = Config::default_with_base(Path::new("/test"));
        assert!(!config.hosting_resolved.generate);

        let overrides = CliSettings {
            generate_hosting: Some(true),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert!(config.hosting_resolved.generate);
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let config_before = Config::default_with_base(Path::new("/test"));
        let mut config = Config::default_with_base(Path::new("/test"));

        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(
            config.translations_resolved.records,
            config_before.translations_resolved.records
        );
        assert_eq!(
            config.routes_resolved.manifest,
            config_before.routes_resolved.manifest
        );
        assert_eq!(
            config.hosting_resolved.generate,
            config_before.hosting_resolved.generate
        );
    }
}
