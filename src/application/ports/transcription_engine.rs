use async_trait::async_trait;

use crate::domain::RecognizedSpeech;

#[async_trait]
pub trait TranscriptionEngine: Send + Sync {
    /// Transcribes raw audio bytes into an ordered word sequence plus the
    /// detected or declared language.
    async fn transcribe(&self, audio_data: &[u8]) -> Result<RecognizedSpeech, TranscriptionError>;

    /// Whether the engine can serve requests: model loaded for the local
    /// strategy, credentials present for the remote one.
    fn is_ready(&self) -> bool;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("audio decoding failed: {0}")]
    DecodingFailed(String),
    #[error("transcription failed: {0}")]
    TranscriptionFailed(String),
    #[error("unsupported audio format: {0}")]
    UnsupportedFormat(String),
    #[error("model loading failed: {0}")]
    ModelLoadFailed(String),
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("transcription produced no words")]
    EmptyResult,
    #[error("transcription api key not configured")]
    NotConfigured,
}
