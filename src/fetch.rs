//! Plain HTTP GET over reqwest.
//!
//! No retries, custom headers or timeouts; whatever reqwest does by default
//! is what the harvest gets.

use crate::error::HarvestError;

/// HTTP client shared by the extraction and download stages.
#[derive(Debug, Clone, Default)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Wrap an existing reqwest client
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// GET a URL and return the body decoded as text
    pub async fn get_text(&self, url: &str) -> Result<String, HarvestError> {
        let response = self.send(url).await?;
        response.text().await.map_err(|source| HarvestError::Fetch {
            url: url.to_string(),
            source,
        })
    }

    /// GET a URL and return the raw body bytes
    pub async fn get_bytes(&self, url: &str) -> Result<Vec<u8>, HarvestError> {
        let response = self.send(url).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|source| HarvestError::Fetch {
                url: url.to_string(),
                source,
            })?;
        Ok(bytes.to_vec())
    }

    async fn send(&self, url: &str) -> Result<reqwest::Response, HarvestError> {
        ::log::debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| HarvestError::Fetch {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            ::log::warn!("{} answered {}", url, status);
            return Err(HarvestError::Status {
                url: url.to_string(),
                status,
            });
        }
        Ok(response)
    }
}
