use std::fmt;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while extracting, downloading or converting
#[derive(Debug, Error)]
pub enum HarvestError {
    /// Transport-level failure, including URLs reqwest refuses to parse
    #[error("request to {url} failed: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status
    #[error("{url} returned HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Local filesystem failure
    #[error("failed to {action} {}: {source}", path.display())]
    Filesystem {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A downloaded file is not valid JSON
    #[error("{} is not valid JSON: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Missing or malformed settings
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Coarse error taxonomy used when reporting failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Fetch,
    Write,
    Parse,
    Config,
}

impl HarvestError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            HarvestError::Fetch { .. } | HarvestError::Status { .. } => ErrorKind::Fetch,
            HarvestError::Filesystem { .. } => ErrorKind::Write,
            HarvestError::Parse { .. } => ErrorKind::Parse,
            HarvestError::Config(_) => ErrorKind::Config,
        }
    }

    pub(crate) fn filesystem(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        HarvestError::Filesystem {
            action,
            path: path.into(),
            source,
        }
    }
}

/// The two operator-visible stages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageKind {
    /// Link extraction followed by downloading
    Download,
    /// JSON to HTML conversion
    Conversion,
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StageKind::Download => f.write_str("download"),
            StageKind::Conversion => f.write_str("conversion"),
        }
    }
}

/// The first error of a stage, caught at the stage boundary
#[derive(Debug, Error)]
#[error("Error during {stage}: {source}")]
pub struct StageError {
    pub stage: StageKind,
    #[source]
    pub source: HarvestError,
}

impl StageError {
    pub fn new(stage: StageKind, source: HarvestError) -> Self {
        Self { stage, source }
    }

    pub fn kind(&self) -> ErrorKind {
        self.source.kind()
    }
}
