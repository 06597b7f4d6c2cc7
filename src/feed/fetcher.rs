use reqwest::{Client, StatusCode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    /// DNS, connection, TLS or malformed url
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("HTTP error: status {0}")]
    Status(StatusCode),
}

/// Downloads the raw feed body with a single GET. No retries.
pub async fn fetch(client: &Client, url: &str) -> Result<Vec<u8>, FetchError> {
    log::debug!("Fetching RSS feed from: {}", url);
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status));
    }
    let bytes = response.bytes().await?;
    Ok(bytes.to_vec())
}
