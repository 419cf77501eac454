use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::{AudioFetcher, FetchError};

/// Downloads audio over HTTP. Redirects are followed transparently
/// (reqwest's default policy); the whole request is bounded by one timeout.
pub struct HttpAudioFetcher {
    client: reqwest::Client,
    timeout_secs: u64,
}

impl HttpAudioFetcher {
    pub fn new(timeout_secs: u64) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| FetchError::RequestFailed(format!("client: {}", e)))?;

        Ok(Self {
            client,
            timeout_secs,
        })
    }
}

#[async_trait]
impl AudioFetcher for HttpAudioFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::TimedOut(self.timeout_secs)
            } else {
                FetchError::RequestFailed(format!("request: {}", e))
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::RequestFailed(format!("body: {}", e)))?;

        tracing::info!(bytes = bytes.len(), "Audio download completed");

        Ok(bytes.to_vec())
    }
}
