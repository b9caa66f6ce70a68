use crate::config::WalkerConfig;
use crate::crawlers::crawler::PageSource;
use crate::error::WalkError;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Fetches pages over HTTP with a fixed User-Agent and per-request timeout
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, WalkError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(WalkError::Client)?;

        Ok(Self { client })
    }

    /// Wrap an already configured client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// HTTP source using the User-Agent and timeout of a walk configuration
    pub fn from_config(config: &WalkerConfig) -> Result<Self, WalkError> {
        Self::new(&config.user_agent, config.timeout())
    }
}

impl PageSource for HttpSource {
    async fn fetch(&self, url: &Url) -> Result<String, WalkError> {
        let network_err = |source: reqwest::Error| WalkError::Network {
            url: url.clone(),
            source,
        };

        ::log::debug!("GET {}", url);
        let start = std::time::Instant::now();
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(network_err)?;

        let status = response.status();
        if !status.is_success() {
            return Err(WalkError::FetchFailed {
                url: url.clone(),
                status,
            });
        }

        // Chapter sites often mislabel their charset; the body is always read as UTF-8
        let bytes = response.bytes().await.map_err(network_err)?;
        ::log::debug!(
            "Fetched {} bytes from {} in {:.2} seconds",
            bytes.len(),
            url,
            start.elapsed().as_secs_f64()
        );

        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
