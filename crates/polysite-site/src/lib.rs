//! Page tree expansion and route generation for Polysite.
//!
//! This crate turns the logical page tree into the flat set of concrete
//! routable pages: one [`RouteDescriptor`] per language × tree node, each
//! carrying the full set of cross-language [`AlternateLink`]s, plus the
//! hosting redirect/rewrite rules that mirror the generated routes.
//!
//! # Architecture
//!
//! Expansion is a pure recursive walk. Every node returns its own routes
//! and redirects; the caller concatenates subtree results, so any subtree
//! can be expanded and tested in isolation. The per-language catch-all
//! rewrites are appended once per language after its pages.
//!
//! The crux is alternate-link propagation: a child's alternate path is
//! the parent's alternate path extended with the child's slug looked up
//! **in the alternate link's language**, not the language currently being
//! rendered. That keeps sibling paths correctly localized at every depth.
//!
//! # Example
//!
//! ```ignore
//! use polysite_site::{BuildMode, expand_site};
//!
//! let expansion = expand_site(&languages, &config.pages, &slugs, BuildMode::Production)?
//!     .expect("translation data ready");
//! for route in &expansion.routes {
//!     sink.register(route.clone())?;
//! }
//! ```

mod expand;
mod route;
mod sink;

pub use expand::{
    BuildMode, ExpandError, HOME_PAGE, NOT_FOUND_PAGE, SiteExpansion, alternate_links,
    expand_site, page_path,
};
pub use route::{AlternateLink, RouteContext, RouteDescriptor};
pub use sink::{CollectingSink, ManifestSink, RouteSink, SinkError};
