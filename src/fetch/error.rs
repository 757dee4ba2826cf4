//! Errors raised while retrieving status data.

use thiserror::Error;

/// Failure at the data-retrieval boundary. Any of these aborts the report.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The source could not be parsed as a URL.
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The request never produced a response.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("{url} returned status {status}: {body}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
        body: String,
    },

    /// The payload was not the JSON shape we expect.
    #[error("malformed payload from {source_name}: {source}")]
    Decode {
        source_name: String,
        #[source]
        source: serde_json::Error,
    },

    /// A local file source could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
