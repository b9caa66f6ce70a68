use reqwest::StatusCode;
use std::path::PathBuf;
use thiserror::Error;
use url::Url;

/// Everything that can stop a walk or prevent one from starting
#[derive(Debug, Error)]
pub enum WalkError {
    /// The server answered with a non-success status
    #[error("request to {url} failed with status {status}")]
    FetchFailed { url: Url, status: StatusCode },

    /// Transport-level failure (timeout, connection reset, ...)
    #[error("network error while fetching {url}: {source}")]
    Network {
        url: Url,
        #[source]
        source: reqwest::Error,
    },

    /// A "next" href that cannot be joined onto the current page
    #[error("cannot resolve link {href:?} against {base}: {source}")]
    InvalidLink {
        href: String,
        base: Url,
        #[source]
        source: url::ParseError,
    },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("invalid URL {input:?}: {source}")]
    InvalidUrl {
        input: String,
        #[source]
        source: url::ParseError,
    },

    #[error("invalid selector {selector:?}: {message}")]
    InvalidSelector { selector: String, message: String },

    #[error("invalid link pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

impl WalkError {
    /// Address of the page the error is tied to, if any
    pub fn page(&self) -> Option<&Url> {
        match self {
            WalkError::FetchFailed { url, .. } | WalkError::Network { url, .. } => Some(url),
            WalkError::InvalidLink { base, .. } => Some(base),
            _ => None,
        }
    }
}
