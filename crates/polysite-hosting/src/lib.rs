//! Hosting redirect/rewrite artifact for Polysite.
//!
//! The hosting layer applies URL rules independently of the rendering
//! framework: permanent redirects send un-prefixed default-language URLs
//! to their prefixed form, and per-language catch-all rewrites serve the
//! localized 404 page. This crate owns the rule types and the artifact
//! document they are persisted into.
//!
//! The artifact is derived, never authored: every generation pass merges
//! a static baseline document with the freshly generated rules (baseline
//! first, generated after) and replaces the document's redirect/rewrite
//! sections wholesale. Re-running with an unchanged baseline and page
//! tree writes an identical file.

mod artifact;
mod rules;

pub use artifact::{HostingArtifact, HostingError, synthesize};
pub use rules::{RedirectRule, RewriteRule};
