use super::{ApiHost, ApiRequest, StatsApi};
use crate::error::IngestError;
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde_json::Value;
use std::time::Duration;

pub const FEEDS_API_BASE: &str = "https://api-live.euroleague.net";
pub const LIVE_API_BASE: &str = "https://live.euroleague.net/api";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// reqwest-backed client for both Euroleague hosts. No retries; every
/// request is bounded by the client-wide timeout.
#[derive(Debug, Clone)]
pub struct EuroleagueClient {
    http: reqwest::Client,
    feeds_base: String,
    live_base: String,
}

impl EuroleagueClient {
    /// # Errors
    ///
    /// Will return `Err` if the TLS backend cannot be initialized
    pub fn new(timeout: Duration) -> Result<Self, IngestError> {
        Self::new_with_base_url(FEEDS_API_BASE, LIVE_API_BASE, timeout)
    }

    /// Points the client at other hosts, e.g. a mock server.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the TLS backend cannot be initialized
    pub fn new_with_base_url(
        feeds_base: &str,
        live_base: &str,
        timeout: Duration,
    ) -> Result<Self, IngestError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| IngestError::Config(format!("http client: {e}")))?;
        Ok(Self {
            http,
            feeds_base: feeds_base.trim_end_matches('/').to_string(),
            live_base: live_base.trim_end_matches('/').to_string(),
        })
    }

    #[must_use]
    pub fn url(&self, request: &ApiRequest) -> String {
        let base = match request.host {
            ApiHost::Feeds => &self.feeds_base,
            ApiHost::Live => &self.live_base,
        };
        format!("{base}/{}", request.path.trim_start_matches('/'))
    }

    async fn send(
        &self,
        request: &ApiRequest,
        accept_json: bool,
    ) -> Result<reqwest::Response, IngestError> {
        let mut builder = self.http.get(self.url(request)).query(&request.query);
        if accept_json {
            builder = builder.header(ACCEPT, "application/json");
        }
        tracing::debug!(request = %request, "GET");
        Ok(builder.send().await?.error_for_status()?)
    }
}

#[async_trait]
impl StatsApi for EuroleagueClient {
    async fn get_json(&self, request: &ApiRequest) -> Result<Value, IngestError> {
        Ok(self.send(request, true).await?.json::<Value>().await?)
    }

    async fn get_text(&self, request: &ApiRequest) -> Result<String, IngestError> {
        Ok(self.send(request, false).await?.text().await?)
    }
}
