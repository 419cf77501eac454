use async_trait::async_trait;
use reqwest::multipart;

use crate::application::ports::{TranscriptionEngine, TranscriptionError};
use crate::domain::{RecognizedSpeech, RecognizedWord};

const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
const DEFAULT_MODEL: &str = "whisper-large-v3";

/// Remote strategy: uploads the audio to a hosted OpenAI-compatible
/// transcription endpoint. Only plain text comes back, so every word is
/// reported without a confidence and the annotator falls back to 0.5.
pub struct GroqWhisperEngine {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
}

impl GroqWhisperEngine {
    pub fn new(api_key: Option<String>, base_url: Option<String>, model: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        }
    }
}

#[async_trait]
impl TranscriptionEngine for GroqWhisperEngine {
    async fn transcribe(&self, audio_data: &[u8]) -> Result<RecognizedSpeech, TranscriptionError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(TranscriptionError::NotConfigured)?;

        let url = format!("{}/audio/transcriptions", self.base_url);

        let file_part = multipart::Part::bytes(audio_data.to_vec())
            .file_name("audio.mp3")
            .mime_str("audio/mpeg")
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("mime: {}", e)))?;

        let form = multipart::Form::new()
            .text("model", self.model.clone())
            .text("response_format", "text")
            .text("language", "en")
            .part("file", file_part);

        tracing::debug!(model = %self.model, "Sending audio to hosted transcription API");

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(TranscriptionError::ApiRequestFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        let transcript = response
            .text()
            .await
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("body: {}", e)))?;

        let words: Vec<RecognizedWord> = transcript
            .split_whitespace()
            .map(|w| RecognizedWord::new(w, None, 0.0, 0.0))
            .collect();

        if words.is_empty() {
            return Err(TranscriptionError::EmptyResult);
        }

        tracing::info!(words = words.len(), "Hosted transcription completed");

        Ok(RecognizedSpeech {
            language: "en".to_string(),
            words,
        })
    }

    fn is_ready(&self) -> bool {
        self.api_key.is_some()
    }
}
