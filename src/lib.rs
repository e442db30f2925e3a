pub mod config;
pub mod error;
pub mod fetch;
pub mod filter;
pub mod parsers;
pub mod progress;
pub mod render;
pub mod results;
pub mod session;
pub mod stages;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::HarvestConfig;
pub use error::{ErrorKind, HarvestError, StageError, StageKind};
pub use parsers::LinkStrategy;
pub use progress::{ProgressSink, ProgressUpdate, StageEvent};
pub use results::DownloadedFile;
pub use session::{Controls, Session, SessionState};

use fetch::HttpClient;
use filter::{LinkFilter, LinkFilterConfig};
use render::HtmlRenderer;
use stages::ExtractOptions;
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;
use url::Url;

const EVENT_BUFFER: usize = 256;

/// Runs the download and conversion stages for one page and output directory
#[derive(Debug, Clone)]
pub struct Harvester {
    config: HarvestConfig,
    client: HttpClient,
}

impl Harvester {
    /// Create a new harvester for the given page and output directory
    pub fn new(page_url: &str, output_dir: impl Into<PathBuf>) -> Self {
        Self::from_config(HarvestConfig::new(page_url, output_dir))
    }

    pub fn from_config(config: HarvestConfig) -> Self {
        Self {
            config,
            client: HttpClient::new(),
        }
    }

    /// Replace the configuration
    pub fn with_config(mut self, config: HarvestConfig) -> Self {
        self.config = config;
        self
    }

    /// Load configuration from a file
    pub fn with_config_file(self, path: impl AsRef<Path>) -> Result<Self, HarvestError> {
        let config = HarvestConfig::from_file(path)?;
        Ok(self.with_config(config))
    }

    /// Load configuration from a string
    pub fn with_config_str(self, config_str: &str) -> Result<Self, HarvestError> {
        let config = HarvestConfig::from_json(config_str)?;
        Ok(self.with_config(config))
    }

    pub fn with_page_url(mut self, page_url: &str) -> Self {
        self.config.page_url = page_url.to_string();
        self
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = output_dir.into();
        self
    }

    pub fn with_strategy(mut self, strategy: LinkStrategy) -> Self {
        self.config.strategy = strategy;
        self
    }

    /// Use a preconfigured reqwest client
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.client = HttpClient::with_client(client);
        self
    }

    pub fn config(&self) -> &HarvestConfig {
        &self.config
    }

    /// Extract the page's JSON links and download them into the JSON directory
    pub async fn download(&self, progress: &ProgressSink) -> Result<Vec<DownloadedFile>, StageError> {
        self.run_download(progress)
            .await
            .map_err(|e| StageError::new(StageKind::Download, e))
    }

    /// Render the given JSON files into the HTML directory
    pub async fn convert(
        &self,
        files: &[PathBuf],
        progress: &ProgressSink,
    ) -> Result<Vec<PathBuf>, StageError> {
        let renderer = HtmlRenderer::new(&self.config.table_attributes, self.config.escape_html);
        stages::convert_all(files, &self.config.html_dir(), &renderer, progress)
            .await
            .map_err(|e| StageError::new(StageKind::Conversion, e))
    }

    /// Run the download stage on a background task and stream its events
    pub fn spawn_download(&self) -> mpsc::Receiver<StageEvent> {
        let (tx, rx) = mpsc::channel(EVENT_BUFFER);
        let harvester = self.clone();

        tokio::spawn(async move {
            let sink = ProgressSink::new(tx);
            let event = match harvester.download(&sink).await {
                Ok(files) => StageEvent::Downloaded(files),
                Err(e) => StageEvent::Failed(e),
            };
            sink.send(event).await;
        });

        rx
    }

    /// Run the conversion stage on a background task and stream its events
    pub fn spawn_conversion(&self, files: Vec<PathBuf>) -> mpsc::Receiver<StageEvent> {
        let (tx, rx) = mpsc::channel(EVENT_BUFFER);
        let harvester = self.clone();

        tokio::spawn(async move {
            let sink = ProgressSink::new(tx);
            let event = match harvester.convert(&files, &sink).await {
                Ok(written) => StageEvent::Converted(written),
                Err(e) => StageEvent::Failed(e),
            };
            sink.send(event).await;
        });

        rx
    }

    async fn run_download(&self, progress: &ProgressSink) -> Result<Vec<DownloadedFile>, HarvestError> {
        self.config.validate()?;
        let options = self.extract_options()?;

        let links = stages::extract_links(&self.client, &self.config.page_url, &options).await?;
        stages::download_all(&self.client, &links, &self.config.json_dir(), progress).await
    }

    fn extract_options(&self) -> Result<ExtractOptions, HarvestError> {
        let required_host = if self.config.allow_external {
            None
        } else {
            let page = Url::parse(&self.config.page_url).map_err(|e| {
                HarvestError::Config(format!("invalid page URL {}: {}", self.config.page_url, e))
            })?;
            page.host_str().map(|h| h.to_string())
        };

        let filter = LinkFilter::new(LinkFilterConfig {
            required_host,
            include_patterns: self.config.include_patterns.clone(),
            exclude_patterns: self.config.exclude_patterns.clone(),
        })
        .map_err(|e| HarvestError::Config(format!("invalid link pattern: {}", e)))?;

        Ok(ExtractOptions {
            strategy: self.config.strategy,
            filter,
        })
    }
}
