//! Environment/runtime helpers
//!
//! Sanity checks run once at startup, before any listener is bound.

use std::path::Path;

use tracing::warn;

use crate::CoreError;

/// Warn when the optional static asset directory is missing.
pub async fn check_static_dir(static_dir: &Path) {
    if tokio::fs::metadata(static_dir).await.is_err() {
        warn!(static_dir = %static_dir.display(), "static assets directory not found; static files will 404");
    }
}

/// A required data file must exist and be a regular file.
pub async fn require_file(path: &Path) -> Result<(), CoreError> {
    match tokio::fs::metadata(path).await {
        Ok(meta) if meta.is_file() => Ok(()),
        Ok(_) => Err(CoreError::Config(format!("{} is not a regular file", path.display()))),
        Err(e) => Err(CoreError::Config(format!("cannot open {}: {e}", path.display()))),
    }
}
