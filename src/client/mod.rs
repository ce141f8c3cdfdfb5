pub mod euroleague;
pub mod paging;

pub use euroleague::*;
pub use paging::*;

use crate::error::IngestError;
use async_trait::async_trait;
use serde_json::Value;
use std::fmt;

/// Which of the two upstream hosts a request goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiHost {
    /// Versioned `/v1`, `/v2`, `/v3` feeds.
    Feeds,
    /// Legacy live-stats API (play-by-play, shot points).
    Live,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub host: ApiHost,
    pub path: String,
    pub query: Vec<(String, String)>,
}

impl ApiRequest {
    #[must_use]
    pub fn feeds(path: impl Into<String>) -> Self {
        Self {
            host: ApiHost::Feeds,
            path: path.into(),
            query: Vec::new(),
        }
    }

    #[must_use]
    pub fn live(path: impl Into<String>) -> Self {
        Self {
            host: ApiHost::Live,
            path: path.into(),
            query: Vec::new(),
        }
    }

    #[must_use]
    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }
}

impl fmt::Display for ApiRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path)?;
        for (i, (k, v)) in self.query.iter().enumerate() {
            write!(f, "{}{k}={v}", if i == 0 { '?' } else { '&' })?;
        }
        Ok(())
    }
}

#[async_trait]
pub trait StatsApi: Send + Sync {
    async fn get_json(&self, request: &ApiRequest) -> Result<Value, IngestError>;

    async fn get_text(&self, request: &ApiRequest) -> Result<String, IngestError>;

    /// Like `get_json`, but a 404 means "nothing here" rather than an error.
    async fn get_json_optional(&self, request: &ApiRequest) -> Result<Option<Value>, IngestError> {
        match self.get_json(request).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }
}
