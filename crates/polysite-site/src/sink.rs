//! Route registration.
//!
//! Generated routes are handed to a [`RouteSink`] one descriptor at a
//! time, the seam between expansion and the hosting/rendering framework.
//! [`ManifestSink`] persists the registered routes as a JSON manifest;
//! [`CollectingSink`] keeps them in memory for tests.

use std::fs;
use std::path::PathBuf;

use crate::route::RouteDescriptor;

/// Route sink error.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Route serialization error.
    #[error("Route serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Receiver for generated routes.
///
/// One [`register`](Self::register) call per route descriptor, then one
/// [`finish`](Self::finish) to flush whatever the sink buffers.
pub trait RouteSink {
    /// Register one route.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError`] if the sink cannot accept the route.
    fn register(&mut self, route: RouteDescriptor) -> Result<(), SinkError>;

    /// Flush buffered routes.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError`] if flushing fails.
    fn finish(&mut self) -> Result<(), SinkError>;
}

/// Sink writing registered routes to a JSON manifest file.
///
/// Routes are buffered and written on `finish` as a pretty-printed JSON
/// array, replacing any previous manifest.
#[derive(Debug)]
pub struct ManifestSink {
    path: PathBuf,
    routes: Vec<RouteDescriptor>,
}

impl ManifestSink {
    /// Create a sink writing to the given manifest path.
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            routes: Vec::new(),
        }
    }
}

impl RouteSink for ManifestSink {
    fn register(&mut self, route: RouteDescriptor) -> Result<(), SinkError> {
        self.routes.push(route);
        Ok(())
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut content = serde_json::to_string_pretty(&self.routes)?;
        content.push('\n');
        fs::write(&self.path, content)?;

        tracing::debug!(
            path = %self.path.display(),
            routes = self.routes.len(),
            "Wrote routes manifest"
        );

        Ok(())
    }
}

/// In-memory sink for tests.
#[derive(Debug, Default)]
pub struct CollectingSink {
    /// Registered routes, in registration order.
    pub routes: Vec<RouteDescriptor>,
}

impl CollectingSink {
    /// Create a new empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl RouteSink for CollectingSink {
    fn register(&mut self, route: RouteDescriptor) -> Result<(), SinkError> {
        self.routes.push(route);
        Ok(())
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}
