//! Hosting artifact loading, merging, and persistence.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::rules::{RedirectRule, RewriteRule};

/// Hosting artifact error.
#[derive(Debug, thiserror::Error)]
pub enum HostingError {
    /// Baseline document not found.
    #[error("Hosting baseline not found: {}", .0.display())]
    BaselineNotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// JSON parsing or serialization error.
    #[error("Invalid hosting rules document: {0}")]
    Parse(#[from] serde_json::Error),
    /// Structurally invalid baseline document.
    #[error("Malformed hosting baseline: {0}")]
    Malformed(String),
}

/// Hosting rules document.
///
/// Wraps the baseline JSON document and its parsed redirect/rewrite
/// lists. [`apply`](Self::apply) replaces the document's
/// `hosting.redirects` and `hosting.rewrites` sections wholesale with
/// baseline-then-generated rules; every sibling key of the baseline is
/// preserved untouched.
#[derive(Debug, Clone)]
pub struct HostingArtifact {
    document: Value,
    baseline_redirects: Vec<RedirectRule>,
    baseline_rewrites: Vec<RewriteRule>,
}

impl HostingArtifact {
    /// Load the baseline document from disk.
    ///
    /// # Errors
    ///
    /// Returns [`HostingError::BaselineNotFound`] if the file is missing,
    /// and [`HostingError::Malformed`] if it lacks the
    /// `hosting.redirects` / `hosting.rewrites` arrays the merge
    /// contract requires.
    pub fn load(path: &Path) -> Result<Self, HostingError> {
        if !path.exists() {
            return Err(HostingError::BaselineNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let document: Value = serde_json::from_str(&content)?;

        let hosting = document
            .get("hosting")
            .ok_or_else(|| HostingError::Malformed("missing 'hosting' section".to_owned()))?;

        let baseline_redirects = rule_array(hosting, "redirects")?;
        let baseline_rewrites = rule_array(hosting, "rewrites")?;

        Ok(Self {
            document,
            baseline_redirects,
            baseline_rewrites,
        })
    }

    /// Baseline redirects, in document order.
    #[must_use]
    pub fn baseline_redirects(&self) -> &[RedirectRule] {
        &self.baseline_redirects
    }

    /// Baseline rewrites, in document order.
    #[must_use]
    pub fn baseline_rewrites(&self) -> &[RewriteRule] {
        &self.baseline_rewrites
    }

    /// Replace the document's rule sections with baseline + generated.
    ///
    /// Baseline rules keep their order and come first; generated rules
    /// are appended. Applying again replaces the sections from the
    /// baseline lists, so repeated application does not accumulate.
    pub fn apply(
        &mut self,
        generated_redirects: &[RedirectRule],
        generated_rewrites: &[RewriteRule],
    ) -> Result<(), HostingError> {
        let redirects: Vec<RedirectRule> = self
            .baseline_redirects
            .iter()
            .chain(generated_redirects)
            .cloned()
            .collect();
        let rewrites: Vec<RewriteRule> = self
            .baseline_rewrites
            .iter()
            .chain(generated_rewrites)
            .cloned()
            .collect();

        let hosting = self
            .document
            .get_mut("hosting")
            .and_then(Value::as_object_mut)
            .ok_or_else(|| HostingError::Malformed("missing 'hosting' section".to_owned()))?;

        hosting.insert("redirects".to_owned(), serde_json::to_value(&redirects)?);
        hosting.insert("rewrites".to_owned(), serde_json::to_value(&rewrites)?);

        Ok(())
    }

    /// Persist the document as a full-file overwrite.
    pub fn write(&self, path: &Path) -> Result<(), HostingError> {
        let mut content = serde_json::to_string_pretty(&self.document)?;
        content.push('\n');
        fs::write(path, content)?;
        Ok(())
    }
}

/// Deserialize a rule array from the hosting section.
fn rule_array<T: serde::de::DeserializeOwned>(
    hosting: &Value,
    key: &str,
) -> Result<Vec<T>, HostingError> {
    let value = hosting
        .get(key)
        .ok_or_else(|| HostingError::Malformed(format!("missing 'hosting.{key}' array")))?;
    Ok(serde_json::from_value(value.clone())?)
}

/// Synthesize the hosting artifact in one step.
///
/// Loads the baseline, merges in the generated rules, and writes the
/// result to `output`.
///
/// # Errors
///
/// Returns [`HostingError`] if the baseline is missing or malformed, or
/// the output cannot be written.
pub fn synthesize(
    baseline: &Path,
    output: &Path,
    redirects: &[RedirectRule],
    rewrites: &[RewriteRule],
) -> Result<(), HostingError> {
    let mut artifact = HostingArtifact::load(baseline)?;
    artifact.apply(redirects, rewrites)?;
    artifact.write(output)?;

    tracing::debug!(
        baseline = %baseline.display(),
        output = %output.display(),
        redirects = redirects.len(),
        rewrites = rewrites.len(),
        "Synthesized hosting rules"
    );

    Ok(())
}
