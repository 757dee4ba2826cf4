//! Retrieval of status data over HTTP or from local files.

mod basic;
mod client;
mod error;

pub use basic::BasicClient;
pub use client::HttpClient;
pub use error::FetchError;

use serde::de::DeserializeOwned;
use tracing::debug;

/// GETs `url` and returns the body. Non-success statuses are errors.
#[tracing::instrument(skip(client))]
pub async fn fetch_bytes<C: HttpClient + ?Sized>(
    client: &C,
    url: &str,
) -> Result<Vec<u8>, FetchError> {
    let parsed = reqwest::Url::parse(url).map_err(|e| FetchError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    let req = reqwest::Request::new(reqwest::Method::GET, parsed);

    let transport = |source: reqwest::Error| FetchError::Transport {
        url: url.to_string(),
        source,
    };

    let resp = client.execute(req).await.map_err(transport)?;
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(FetchError::Status {
            url: url.to_string(),
            status,
            body,
        });
    }

    let bytes = resp.bytes().await.map_err(transport)?;
    debug!(bytes = bytes.len(), "Response body received");
    Ok(bytes.to_vec())
}

/// Loads raw bytes from a local file path or, for `http(s)` sources, over HTTP.
pub async fn fetch_source<C: HttpClient + ?Sized>(
    client: &C,
    source: &str,
) -> Result<Vec<u8>, FetchError> {
    if source.starts_with("http://") || source.starts_with("https://") {
        fetch_bytes(client, source).await
    } else {
        tokio::fs::read(source).await.map_err(|e| FetchError::Io {
            path: source.to_string(),
            source: e,
        })
    }
}

/// Loads `source` and decodes it as JSON.
pub async fn fetch_json<C, T>(client: &C, source: &str) -> Result<T, FetchError>
where
    C: HttpClient + ?Sized,
    T: DeserializeOwned,
{
    let bytes = fetch_source(client, source).await?;
    decode_json(source, &bytes)
}

/// Decodes a JSON payload, naming `source_name` in the error.
pub fn decode_json<T: DeserializeOwned>(source_name: &str, bytes: &[u8]) -> Result<T, FetchError> {
    serde_json::from_slice(bytes).map_err(|e| FetchError::Decode {
        source_name: source_name.to_string(),
        source: e,
    })
}
