//! Page tree expansion.
//!
//! [`expand_site`] walks the logical page tree once per language and
//! produces the routes, redirects, and rewrites for one generation pass.
//! The walk is a pure recursion: each node returns the routes and
//! redirects of its own subtree, and the caller concatenates them, so
//! subtrees are independently testable.

use std::sync::LazyLock;

use polysite_config::PageDefinition;
use polysite_hosting::{RedirectRule, RewriteRule};
use polysite_i18n::{SlugLookup, SlugTable};
use regex::Regex;

use crate::route::{AlternateLink, RouteContext, RouteDescriptor};

/// Reserved identifier for the language root page.
pub const HOME_PAGE: &str = "home";

/// Reserved identifier for the not-found page.
pub const NOT_FOUND_PAGE: &str = "404";

/// Cap on page tree depth. The tree is caller-supplied and not otherwise
/// validated for shape.
const MAX_DEPTH: usize = 32;

/// Two-letter-language-prefixed 404 path shape.
static LANG_404_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/[a-z]{2}/404$").unwrap());

/// Build mode for one generation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildMode {
    /// Local preview: the router needs explicit wildcard match patterns
    /// for 404 pages.
    Preview,
    /// Production: the hosting rewrites handle the wildcard instead.
    Production,
}

/// Expansion error. Every variant fails the whole pass: a partial path
/// would silently corrupt the alternate-link chain for all descendants.
#[derive(Debug, thiserror::Error)]
pub enum ExpandError {
    /// No slug record for a page in a language.
    #[error("No slug recorded for page '{page}' in language '{lang}'")]
    MissingSlug {
        /// Language the lookup ran in.
        lang: String,
        /// Page identifier.
        page: String,
    },
    /// Slug record exists but the slug is not translated.
    #[error("Slug for page '{page}' in language '{lang}' is not translated")]
    EmptySlug {
        /// Language the lookup ran in.
        lang: String,
        /// Page identifier.
        page: String,
    },
    /// Page tree exceeds the depth cap.
    #[error("Page tree exceeds maximum depth at page '{page}'")]
    DepthExceeded {
        /// Page identifier where the cap was hit.
        page: String,
    },
}

/// Everything one generation pass produces.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SiteExpansion {
    /// One route per language and tree node, in traversal order.
    pub routes: Vec<RouteDescriptor>,
    /// Un-prefixed to prefixed redirects for default-language pages.
    pub redirects: Vec<RedirectRule>,
    /// Per-language 404 catch-all rewrites.
    pub rewrites: Vec<RewriteRule>,
}

/// Shared read-only state for one expansion pass.
struct ExpandCtx<'a> {
    languages: &'a [String],
    default_lang: &'a str,
    slugs: &'a SlugTable,
    mode: BuildMode,
}

/// Routes and redirects produced by one subtree.
#[derive(Debug)]
struct NodeExpansion {
    routes: Vec<RouteDescriptor>,
    redirects: Vec<RedirectRule>,
}

/// Expand the page tree into routes and hosting rules.
///
/// Returns `None` when any language has zero resolved namespaces:
/// translation content arrives asynchronously, and a transient empty
/// fetch must not emit a broken partial site. The skip covers the whole
/// pass, not just the failing language.
///
/// # Errors
///
/// Returns [`ExpandError`] when a slug lookup fails or the tree exceeds
/// the depth cap. Both fail the entire pass.
pub fn expand_site(
    languages: &[String],
    pages: &[PageDefinition],
    slugs: &SlugTable,
    mode: BuildMode,
) -> Result<Option<SiteExpansion>, ExpandError> {
    let missing = slugs.missing_languages(languages);
    if !missing.is_empty() {
        tracing::warn!(
            languages = ?missing,
            "Translation data not ready; skipping generation"
        );
        return Ok(None);
    }

    let Some(default_lang) = languages.first() else {
        return Ok(Some(SiteExpansion::default()));
    };

    let ctx = ExpandCtx {
        languages,
        default_lang,
        slugs,
        mode,
    };

    let mut expansion = SiteExpansion::default();

    for lang in languages {
        for page in pages {
            let node = expand_node(&ctx, page, lang, None, 0)?;
            expansion.routes.extend(node.routes);
            expansion.redirects.extend(node.redirects);
        }
        expansion.rewrites.push(RewriteRule::not_found(lang));
    }

    tracing::debug!(
        routes = expansion.routes.len(),
        redirects = expansion.redirects.len(),
        rewrites = expansion.rewrites.len(),
        "Expanded page tree"
    );

    Ok(Some(expansion))
}

/// Expand one node and its subtree for one language.
fn expand_node(
    ctx: &ExpandCtx<'_>,
    page: &PageDefinition,
    lang: &str,
    parent: Option<(&str, &[AlternateLink])>,
    depth: usize,
) -> Result<NodeExpansion, ExpandError> {
    if depth >= MAX_DEPTH {
        return Err(ExpandError::DepthExceeded {
            page: page.id.clone(),
        });
    }

    let parent_path = parent.map(|(path, _)| path);
    let parent_links = parent.map(|(_, links)| links);

    let path = page_path(ctx.slugs, lang, &page.id, parent_path)?;

    let mut redirects = Vec::new();
    if let Some(redirect) = unprefixed_redirect(ctx.default_lang, lang, &page.id, &path) {
        redirects.push(redirect);
    }

    let links = alternate_links(ctx.slugs, ctx.languages, &page.id, parent_links)?;

    let match_path = match ctx.mode {
        BuildMode::Preview => preview_match_path(&path, lang, ctx.default_lang),
        BuildMode::Production => None,
    };

    let route = RouteDescriptor {
        path: path.clone(),
        component: page.component.clone(),
        match_path,
        context: RouteContext {
            lang: lang.to_owned(),
            namespaces: page.namespaces.clone(),
            alternate_links: links.clone(),
            meta_robots: page.meta_robots.clone(),
        },
    };

    let mut routes = vec![route];

    for child in &page.children {
        let child_expansion = expand_node(ctx, child, lang, Some((&path, &links)), depth + 1)?;
        routes.extend(child_expansion.routes);
        redirects.extend(child_expansion.redirects);
    }

    Ok(NodeExpansion { routes, redirects })
}

/// Build the concrete URL path for a page in a language.
///
/// `home` maps directly to `/{lang}` and uses no slug. Every other page
/// extends the parent path (the language root for top-level pages) with
/// its localized slug.
///
/// # Errors
///
/// Returns [`ExpandError::MissingSlug`] when the language has no record
/// for the page, and [`ExpandError::EmptySlug`] when the record exists
/// but its slug is not translated.
pub fn page_path(
    slugs: &SlugTable,
    lang: &str,
    page_id: &str,
    parent_path: Option<&str>,
) -> Result<String, ExpandError> {
    if page_id == HOME_PAGE {
        return Ok(format!("/{lang}"));
    }

    let slug = require_slug(slugs, lang, page_id)?;

    Ok(match parent_path {
        Some(parent) => format!("{parent}/{slug}"),
        None => format!("/{lang}/{slug}"),
    })
}

/// Compute the cross-language alternate links for a page.
///
/// Root pages (no parent links) compute one link per language, each path
/// built independently with that language's own slug. Child pages extend
/// each parent link's path with the child's slug looked up **in that
/// link's language**, not the language currently being rendered. This
/// keeps sibling paths localized at every depth.
///
/// The returned list always has exactly one entry per configured
/// language, regardless of recursion depth.
///
/// # Errors
///
/// Returns [`ExpandError`] when a slug lookup fails in any language.
pub fn alternate_links(
    slugs: &SlugTable,
    languages: &[String],
    page_id: &str,
    parent_links: Option<&[AlternateLink]>,
) -> Result<Vec<AlternateLink>, ExpandError> {
    match parent_links {
        None => languages
            .iter()
            .map(|lang| {
                Ok(AlternateLink {
                    path: page_path(slugs, lang, page_id, None)?,
                    lang: lang.clone(),
                })
            })
            .collect(),
        Some(parents) => parents
            .iter()
            .map(|link| {
                let slug = require_slug(slugs, &link.lang, page_id)?;
                Ok(AlternateLink {
                    path: format!("{}/{slug}", link.path),
                    lang: link.lang.clone(),
                })
            })
            .collect(),
    }
}

/// Resolve a slug or fail the pass.
fn require_slug<'a>(
    slugs: &'a SlugTable,
    lang: &str,
    page_id: &str,
) -> Result<&'a str, ExpandError> {
    match slugs.lookup(lang, page_id) {
        SlugLookup::Found(slug) => Ok(slug),
        SlugLookup::Absent => Err(ExpandError::EmptySlug {
            lang: lang.to_owned(),
            page: page_id.to_owned(),
        }),
        SlugLookup::Missing => Err(ExpandError::MissingSlug {
            lang: lang.to_owned(),
            page: page_id.to_owned(),
        }),
    }
}

/// Redirect from the un-prefixed path to the prefixed path.
///
/// Emitted only for default-language pages. `home` is exempt (the
/// language root is covered by the baseline rules) and so is `404` (the
/// rewrites own it).
fn unprefixed_redirect(
    default_lang: &str,
    lang: &str,
    page_id: &str,
    path: &str,
) -> Option<RedirectRule> {
    if lang != default_lang || page_id == HOME_PAGE || page_id == NOT_FOUND_PAGE {
        return None;
    }

    let source = path.strip_prefix(&format!("/{default_lang}"))?;
    Some(RedirectRule::permanent(source, path))
}

/// Catch-all match pattern for 404 routes in preview builds.
///
/// The default language's 404 page catches everything; other languages
/// catch their own prefix. Only paths whose 404 slug is literally `404`
/// qualify.
fn preview_match_path(path: &str, lang: &str, default_lang: &str) -> Option<String> {
    if path == format!("/{default_lang}/404") {
        return Some("/*".to_owned());
    }
    if LANG_404_PATTERN.is_match(path) {
        return Some(format!("/{lang}/*"));
    }
    None
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use polysite_i18n::{MockTranslationStore, TranslationStore};

    use super::*;

    fn langs(codes: &[&str]) -> Vec<String> {
        codes.iter().map(|&c| c.to_owned()).collect()
    }

    fn page(id: &str, namespaces: &[&str]) -> PageDefinition {
        PageDefinition {
            id: id.to_owned(),
            component: format!("src/pages/{id}.tsx"),
            namespaces: namespaces.iter().map(|&n| n.to_owned()).collect(),
            meta_robots: None,
            children: Vec::new(),
        }
    }

    /// Slug table for en/de with home, 404, about > team.
    fn full_table() -> SlugTable {
        let store = MockTranslationStore::new()
            .with_slug("en", "404", "404")
            .with_slug("de", "404", "404")
            .with_slug("en", "about", "about-us")
            .with_slug("de", "about", "ueber-uns")
            .with_slug("en", "team", "team")
            .with_slug("de", "team", "mannschaft");
        SlugTable::resolve(&langs(&["en", "de"]), &store.fetch().unwrap())
    }

    fn site_pages() -> Vec<PageDefinition> {
        let mut about = page("about", &["common", "about"]);
        about.children = vec![page("team", &["common", "team"])];
        vec![page("home", &["common", "home"]), about]
    }

    fn expand(mode: BuildMode) -> SiteExpansion {
        expand_site(&langs(&["en", "de"]), &site_pages(), &full_table(), mode)
            .unwrap()
            .expect("table is ready")
    }

    fn paths(expansion: &SiteExpansion) -> Vec<&str> {
        expansion.routes.iter().map(|r| r.path.as_str()).collect()
    }

    // Path building

    #[test]
    fn test_page_path_home() {
        assert_eq!(page_path(&full_table(), "de", "home", None).unwrap(), "/de");
    }

    #[test]
    fn test_page_path_root_page() {
        assert_eq!(
            page_path(&full_table(), "de", "about", None).unwrap(),
            "/de/ueber-uns"
        );
    }

    #[test]
    fn test_page_path_child_extends_parent() {
        assert_eq!(
            page_path(&full_table(), "de", "team", Some("/de/ueber-uns")).unwrap(),
            "/de/ueber-uns/mannschaft"
        );
    }

    #[test]
    fn test_page_path_missing_slug_is_fatal() {
        let err = page_path(&full_table(), "en", "pricing", None).unwrap_err();
        assert!(matches!(err, ExpandError::MissingSlug { .. }));
    }

    #[test]
    fn test_page_path_untranslated_slug_is_fatal() {
        let store = MockTranslationStore::new().with_pending("en", "imprint");
        let table = SlugTable::resolve(&langs(&["en"]), &store.fetch().unwrap());

        let err = page_path(&table, "en", "imprint", None).unwrap_err();
        assert!(matches!(err, ExpandError::EmptySlug { .. }));
    }

    // Alternate links

    #[test]
    fn test_root_alternates_use_each_languages_own_slug() {
        let links =
            alternate_links(&full_table(), &langs(&["en", "de"]), "about", None).unwrap();

        assert_eq!(
            links,
            vec![
                AlternateLink {
                    path: "/en/about-us".to_owned(),
                    lang: "en".to_owned()
                },
                AlternateLink {
                    path: "/de/ueber-uns".to_owned(),
                    lang: "de".to_owned()
                },
            ]
        );
    }

    #[test]
    fn test_home_alternates_are_language_roots() {
        let links = alternate_links(&full_table(), &langs(&["en", "de"]), "home", None).unwrap();

        assert_eq!(links[0].path, "/en");
        assert_eq!(links[1].path, "/de");
    }

    #[test]
    fn test_child_alternates_extend_in_the_links_language() {
        let table = full_table();
        let parents = alternate_links(&table, &langs(&["en", "de"]), "about", None).unwrap();

        // Rendering the English route: the German alternate must still
        // pick up the German slug.
        let links = alternate_links(&table, &langs(&["en", "de"]), "team", Some(&parents)).unwrap();

        assert_eq!(
            links,
            vec![
                AlternateLink {
                    path: "/en/about-us/team".to_owned(),
                    lang: "en".to_owned()
                },
                AlternateLink {
                    path: "/de/ueber-uns/mannschaft".to_owned(),
                    lang: "de".to_owned()
                },
            ]
        );
    }

    #[test]
    fn test_every_route_has_one_alternate_per_language() {
        let languages = langs(&["en", "de"]);
        let expansion = expand(BuildMode::Production);

        for route in &expansion.routes {
            let links = &route.context.alternate_links;
            assert_eq!(links.len(), languages.len(), "route {}", route.path);

            let own: Vec<_> = links
                .iter()
                .filter(|l| l.lang == route.context.lang)
                .collect();
            assert_eq!(own.len(), 1, "route {}", route.path);
            assert_eq!(own[0].path, route.path);
        }
    }

    // Full expansion

    #[test]
    fn test_expansion_produces_one_route_per_language_and_node() {
        let expansion = expand(BuildMode::Production);

        assert_eq!(
            paths(&expansion),
            vec![
                "/en",
                "/en/about-us",
                "/en/about-us/team",
                "/de",
                "/de/ueber-uns",
                "/de/ueber-uns/mannschaft",
            ]
        );
    }

    #[test]
    fn test_expansion_route_carries_component_and_namespaces() {
        let expansion = expand(BuildMode::Production);
        let about = &expansion.routes[1];

        assert_eq!(about.component, "src/pages/about.tsx");
        assert_eq!(about.context.lang, "en");
        assert_eq!(about.context.namespaces, vec!["common", "about"]);
    }

    #[test]
    fn test_expansion_is_deterministic() {
        let first = expand(BuildMode::Production);
        let second = expand(BuildMode::Production);
        assert_eq!(first, second);
    }

    #[test]
    fn test_gate_skips_pass_when_a_language_is_empty() {
        let store = MockTranslationStore::new().with_slug("en", "about", "about-us");
        let table = SlugTable::resolve(&langs(&["en", "de"]), &store.fetch().unwrap());

        let result =
            expand_site(&langs(&["en", "de"]), &site_pages(), &table, BuildMode::Production)
                .unwrap();

        assert_eq!(result, None);
    }

    #[test]
    fn test_partial_language_fails_instead_of_corrupting_alternates() {
        // German resolved some namespaces, but not "team": the guard lets
        // it through and expansion must fail loudly.
        let store = MockTranslationStore::new()
            .with_slug("en", "about", "about-us")
            .with_slug("en", "team", "team")
            .with_slug("de", "about", "ueber-uns");
        let table = SlugTable::resolve(&langs(&["en", "de"]), &store.fetch().unwrap());

        let err =
            expand_site(&langs(&["en", "de"]), &site_pages(), &table, BuildMode::Production)
                .unwrap_err();

        assert!(
            matches!(err, ExpandError::MissingSlug { ref lang, ref page } if lang == "de" && page == "team")
        );
    }

    #[test]
    fn test_empty_page_tree_still_emits_rewrites() {
        let expansion =
            expand_site(&langs(&["en", "de"]), &[], &full_table(), BuildMode::Production)
                .unwrap()
                .unwrap();

        assert!(expansion.routes.is_empty());
        assert!(expansion.redirects.is_empty());
        assert_eq!(expansion.rewrites.len(), 2);
    }

    #[test]
    fn test_depth_cap_is_fatal() {
        let mut store = MockTranslationStore::new();
        for i in 0..40 {
            store = store.with_slug("en", format!("p{i}"), format!("p{i}"));
        }
        let table = SlugTable::resolve(&langs(&["en"]), &store.fetch().unwrap());

        let mut tree = page("p39", &[]);
        for i in (0..39).rev() {
            let mut parent = page(&format!("p{i}"), &[]);
            parent.children = vec![tree];
            tree = parent;
        }

        let err = expand_site(&langs(&["en"]), &[tree], &table, BuildMode::Production).unwrap_err();
        assert!(matches!(err, ExpandError::DepthExceeded { .. }));
    }

    // Redirect synthesis

    #[test]
    fn test_redirects_cover_default_language_pages_only() {
        let expansion = expand(BuildMode::Production);

        assert_eq!(
            expansion.redirects,
            vec![
                RedirectRule::permanent("/about-us", "/en/about-us"),
                RedirectRule::permanent("/about-us/team", "/en/about-us/team"),
            ]
        );
    }

    #[test]
    fn test_reserved_pages_produce_no_redirect() {
        let languages = langs(&["en", "de"]);
        let pages = vec![page("home", &["common"]), page("404", &["common"])];

        let expansion =
            expand_site(&languages, &pages, &full_table(), BuildMode::Production)
                .unwrap()
                .unwrap();

        assert!(expansion.redirects.is_empty());
    }

    // Rewrite synthesis

    #[test]
    fn test_one_rewrite_per_language_regardless_of_page_count() {
        let expansion = expand(BuildMode::Production);

        assert_eq!(
            expansion.rewrites,
            vec![RewriteRule::not_found("en"), RewriteRule::not_found("de")]
        );
    }

    // Preview match paths

    #[test]
    fn test_preview_attaches_404_match_paths() {
        let languages = langs(&["en", "de"]);
        let pages = vec![page("home", &["common"]), page("404", &["common"])];

        let expansion = expand_site(&languages, &pages, &full_table(), BuildMode::Preview)
            .unwrap()
            .unwrap();

        let by_path = |path: &str| {
            expansion
                .routes
                .iter()
                .find(|r| r.path == path)
                .unwrap_or_else(|| panic!("no route {path}"))
        };

        assert_eq!(by_path("/en/404").match_path.as_deref(), Some("/*"));
        assert_eq!(by_path("/de/404").match_path.as_deref(), Some("/de/*"));
        assert_eq!(by_path("/en").match_path, None);
        assert_eq!(by_path("/de").match_path, None);
    }

    #[test]
    fn test_production_attaches_no_match_paths() {
        let languages = langs(&["en", "de"]);
        let pages = vec![page("home", &["common"]), page("404", &["common"])];

        let expansion = expand_site(&languages, &pages, &full_table(), BuildMode::Production)
            .unwrap()
            .unwrap();

        assert!(expansion.routes.iter().all(|r| r.match_path.is_none()));
    }

    #[test]
    fn test_preview_ignores_localized_404_slugs() {
        // A 404 slug that is not literally "404" does not match the
        // wildcard shapes; the route is emitted without a match path.
        let store = MockTranslationStore::new()
            .with_slug("en", "404", "not-found")
            .with_slug("de", "404", "nicht-gefunden");
        let table = SlugTable::resolve(&langs(&["en", "de"]), &store.fetch().unwrap());
        let pages = vec![page("404", &["common"])];

        let expansion = expand_site(&langs(&["en", "de"]), &pages, &table, BuildMode::Preview)
            .unwrap()
            .unwrap();

        assert!(expansion.routes.iter().all(|r| r.match_path.is_none()));
    }

    #[test]
    fn test_meta_robots_propagates_to_route_context() {
        let mut about = page("about", &["common", "about"]);
        about.meta_robots = Some("noindex".to_owned());

        let expansion =
            expand_site(&langs(&["en", "de"]), &[about], &full_table(), BuildMode::Production)
                .unwrap()
                .unwrap();

        assert!(
            expansion
                .routes
                .iter()
                .all(|r| r.context.meta_robots.as_deref() == Some("noindex"))
        );
    }
}
