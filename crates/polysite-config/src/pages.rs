//! Logical page tree definitions.

use serde::Deserialize;

use crate::ConfigError;

/// A logical page in the site tree.
///
/// Pages are declared in `polysite.toml` and expanded into one concrete
/// route per configured language. The `id` doubles as the translation
/// namespace used for slug lookups, so every non-reserved page needs a
/// slug record per language.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PageDefinition {
    /// Page identifier, unique within its parent scope.
    pub id: String,
    /// Renderable component reference, passed through to the route sink.
    pub component: String,
    /// Translation namespaces required to render this page.
    #[serde(default)]
    pub namespaces: Vec<String>,
    /// Optional robots directive attached to the route context.
    #[serde(default)]
    pub meta_robots: Option<String>,
    /// Nested child pages; depth is unbounded.
    #[serde(default)]
    pub children: Vec<PageDefinition>,
}

/// Validate a page tree: non-empty ids and components, unique ids per
/// sibling scope.
pub(crate) fn validate_pages(pages: &[PageDefinition], scope: &str) -> Result<(), ConfigError> {
    let mut seen = std::collections::HashSet::new();

    for page in pages {
        if page.id.is_empty() {
            return Err(ConfigError::Validation(format!(
                "page id cannot be empty (under {scope})"
            )));
        }
        if page.component.is_empty() {
            return Err(ConfigError::Validation(format!(
                "page '{}' is missing a component",
                page.id
            )));
        }
        if !seen.insert(page.id.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate page id '{}' under {scope}",
                page.id
            )));
        }
        validate_pages(&page.children, &format!("page '{}'", page.id))?;
    }

    Ok(())
}
