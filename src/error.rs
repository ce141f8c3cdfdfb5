use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IngestError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("api error: status {status} from {url}")]
    Api { status: u16, url: String },
    #[error("mapping error: {0}")]
    Mapping(String),
    #[error("constraint error: {0}")]
    Constraint(String),
    #[error("config error: {0}")]
    Config(String),
    #[error("io error: {0}")]
    Io(String),
}

impl IngestError {
    /// Shorthand for a payload that lacks a field the row cannot exist without.
    #[must_use]
    pub fn missing(field: &str, context: &str) -> Self {
        Self::Mapping(format!("missing {field} in {context}"))
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status: 404, .. })
    }
}

impl From<reqwest::Error> for IngestError {
    fn from(err: reqwest::Error) -> Self {
        match (err.status(), err.url()) {
            (Some(status), Some(url)) => Self::Api {
                status: status.as_u16(),
                url: url.to_string(),
            },
            _ if err.is_decode() => Self::Mapping(err.to_string()),
            _ => Self::Transport(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for IngestError {
    fn from(err: serde_json::Error) -> Self {
        Self::Mapping(err.to_string())
    }
}

impl From<sql_middleware::SqlMiddlewareDbError> for IngestError {
    fn from(err: sql_middleware::SqlMiddlewareDbError) -> Self {
        Self::Constraint(err.to_string())
    }
}

impl From<std::io::Error> for IngestError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<String> for IngestError {
    fn from(err: String) -> Self {
        Self::Config(err)
    }
}

impl From<&str> for IngestError {
    fn from(err: &str) -> Self {
        Self::Config(err.to_string())
    }
}
