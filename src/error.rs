//! Error types for remote fetches.
//!
//! Every HTTP-backed operation returns a [`FetchError`] so the dispatcher
//! can decide whether to log and continue or give up on a query.

use thiserror::Error;

/// Failure while fetching or decoding a remote resource.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection, DNS, TLS or timeout failure, or the body could not be read.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered 404.
    #[error("{url} was not found")]
    NotFound { url: String },

    /// The server answered with another non-success status.
    #[error("{url} returned HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    /// The body was not the JSON document we expected.
    #[error("could not decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// The body was not a decodable image.
    #[error("could not decode image from {url}: {source}")]
    Image {
        url: String,
        #[source]
        source: image::ImageError,
    },

    /// The request succeeded but yielded nothing to show.
    #[error("no {what} found for {id}")]
    EmptyResult { what: &'static str, id: String },
}

impl FetchError {
    /// Classifies a reqwest error raised while sending or reading a request.
    pub fn transport(url: &str, source: reqwest::Error) -> Self {
        Self::Transport {
            url: url.to_string(),
            source,
        }
    }

    /// Maps a non-success status to the matching variant.
    pub fn from_status(url: &str, status: reqwest::StatusCode) -> Self {
        if status == reqwest::StatusCode::NOT_FOUND {
            Self::NotFound {
                url: url.to_string(),
            }
        } else {
            Self::Status {
                url: url.to_string(),
                status,
            }
        }
    }

    /// Short label used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Transport { .. } => "transport",
            FetchError::NotFound { .. } => "not found",
            FetchError::Status { .. } => "status",
            FetchError::Decode { .. } => "decode",
            FetchError::Image { .. } => "image",
            FetchError::EmptyResult { .. } => "empty",
        }
    }
}
