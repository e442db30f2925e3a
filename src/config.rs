use crate::error::HarvestError;
use crate::parsers::LinkStrategy;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Configuration for a harvest run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarvestConfig {
    /// Page scanned for JSON links
    #[serde(default)]
    pub page_url: String,

    /// Directory receiving the JSON and HTML subdirectories
    #[serde(default)]
    pub output_dir: PathBuf,

    /// Subdirectory for downloaded JSON files
    #[serde(default = "default_json_dir_name")]
    pub json_dir_name: String,

    /// Subdirectory for rendered HTML files
    #[serde(default = "default_html_dir_name")]
    pub html_dir_name: String,

    /// How links are found in the page body
    #[serde(default)]
    pub strategy: LinkStrategy,

    /// Whether links on other hosts than the page are kept
    #[serde(default = "default_allow_external")]
    pub allow_external: bool,

    /// Regex patterns a link must match (any of them)
    #[serde(default)]
    pub include_patterns: Vec<String>,

    /// Regex patterns that drop a link
    #[serde(default)]
    pub exclude_patterns: Vec<String>,

    /// Escape HTML special characters in keys and strings
    #[serde(default = "default_escape_html")]
    pub escape_html: bool,

    /// Attributes placed on every rendered `<table>`
    #[serde(default = "default_table_attributes")]
    pub table_attributes: String,
}

fn default_json_dir_name() -> String {
    "json files".to_string()
}

fn default_html_dir_name() -> String {
    "html files".to_string()
}

fn default_allow_external() -> bool {
    true
}

fn default_escape_html() -> bool {
    true
}

fn default_table_attributes() -> String {
    r#"border="1""#.to_string()
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self::new("", "")
    }
}

impl HarvestConfig {
    /// Create a new configuration with default values
    pub fn new(page_url: &str, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            page_url: page_url.to_string(),
            output_dir: output_dir.into(),
            json_dir_name: default_json_dir_name(),
            html_dir_name: default_html_dir_name(),
            strategy: LinkStrategy::default(),
            allow_external: default_allow_external(),
            include_patterns: Vec::new(),
            exclude_patterns: Vec::new(),
            escape_html: default_escape_html(),
            table_attributes: default_table_attributes(),
        }
    }

    /// Load configuration from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, HarvestError> {
        let path = path.as_ref();
        let unreadable = |e: std::io::Error| {
            HarvestError::Config(format!(
                "cannot read configuration file {}: {}",
                path.display(),
                e
            ))
        };
        let mut file = File::open(path).map_err(unreadable)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents).map_err(unreadable)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, HarvestError> {
        serde_json::from_str(json)
            .map_err(|e| HarvestError::Config(format!("malformed configuration: {}", e)))
    }

    /// Both the page URL and the output directory must be provided
    pub fn validate(&self) -> Result<(), HarvestError> {
        if self.page_url.trim().is_empty() || self.output_dir.as_os_str().is_empty() {
            return Err(HarvestError::Config(
                "please provide both a page URL and an output directory".to_string(),
            ));
        }
        Ok(())
    }

    pub fn json_dir(&self) -> PathBuf {
        self.output_dir.join(&self.json_dir_name)
    }

    pub fn html_dir(&self) -> PathBuf {
        self.output_dir.join(&self.html_dir_name)
    }
}
