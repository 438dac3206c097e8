use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;

use crate::config::{BACKEND, history_url};
use crate::data::wire::decode_series;
use crate::domain::{DataPoint, ViewMode};

/// Abstract interface for the historical window query.
#[async_trait]
pub trait HistoryProvider: Send + Sync {
    /// Fetch the ordered window behind `mode`. Callers replace, never merge, the result.
    async fn fetch(&self, mode: ViewMode) -> Result<Vec<DataPoint>>;
}

/// Talks to the backend's `/api/history?range=<token>` endpoint.
#[derive(Clone)]
pub struct HttpHistoryProvider {
    url: String,
    client: reqwest::Client,
}

impl HttpHistoryProvider {
    pub fn new(server_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(BACKEND.http.timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            url: history_url(server_url),
            client,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl HistoryProvider for HttpHistoryProvider {
    async fn fetch(&self, mode: ViewMode) -> Result<Vec<DataPoint>> {
        let token = mode
            .range_token()
            .ok_or_else(|| anyhow!("{} has no history range", mode))?;

        let body = self
            .client
            .get(&self.url)
            .query(&[("range", token)])
            .send()
            .await
            .context("Failed to fetch history")?
            .error_for_status()
            .context("History endpoint returned an error status")?
            .text()
            .await
            .context("Failed to read history response")?;

        decode_series(&body).context("Failed to parse history response")
    }
}
