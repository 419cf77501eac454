use async_trait::async_trait;

#[async_trait]
pub trait AudioFetcher: Send + Sync {
    /// Downloads the raw audio bytes behind `url`, following redirects.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    RequestFailed(String),
    #[error("request timed out after {0}s")]
    TimedOut(u64),
    #[error("unexpected status {status}")]
    Status { status: u16 },
}
