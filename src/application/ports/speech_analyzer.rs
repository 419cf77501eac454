use async_trait::async_trait;

#[async_trait]
pub trait SpeechAnalyzer: Send + Sync {
    /// Sends both transcript variants to the analysis model under
    /// `system_message` and returns the parsed JSON verdict as-is.
    async fn analyze(
        &self,
        transcript: &str,
        annotated: &str,
        system_message: &str,
    ) -> Result<serde_json::Value, AnalysisError>;

    /// Whether a credential is present. Checked by `/health`.
    fn is_configured(&self) -> bool;
}

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("analyzer api key not configured")]
    MissingApiKey,
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("analysis response is not valid json: {0}")]
    InvalidJson(String),
}
