//! The three pipeline stages, each a sequential loop over its input.

pub mod convert;
pub mod download;
pub mod extract;

pub use convert::convert_all;
pub use download::download_all;
pub use extract::{ExtractOptions, extract_links};

use crate::error::HarvestError;
use std::path::Path;

/// Create `dir` and its parents unless it already exists as a directory
pub(crate) async fn ensure_directory(dir: &Path) -> Result<(), HarvestError> {
    if let Ok(meta) = tokio::fs::metadata(dir).await {
        if meta.is_dir() {
            return Ok(());
        }
        return Err(HarvestError::filesystem(
            "create directory",
            dir,
            std::io::Error::new(
                std::io::ErrorKind::AlreadyExists,
                "path exists but is not a directory",
            ),
        ));
    }
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| HarvestError::filesystem("create directory", dir, e))
}
