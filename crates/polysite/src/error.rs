//! CLI error types.

use polysite_config::ConfigError;
use polysite_hosting::HostingError;
use polysite_i18n::StoreError;
use polysite_site::{ExpandError, SinkError};

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Store(#[from] StoreError),

    #[error("{0}")]
    Expand(#[from] ExpandError),

    #[error("{0}")]
    Sink(#[from] SinkError),

    #[error("{0}")]
    Hosting(#[from] HostingError),

    #[error("{0}")]
    Validation(String),
}
