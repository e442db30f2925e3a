use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A JSON resource saved by the download stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadedFile {
    /// URL the bytes came from
    pub url: String,

    /// Where the bytes were written
    pub path: PathBuf,
}

impl DownloadedFile {
    pub fn new(url: String, path: PathBuf) -> Self {
        Self { url, path }
    }
}
