use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::application::ports::{AnalysisError, SpeechAnalyzer};
use crate::presentation::config::AnalyzerSettings;

/// Speech-quality analysis over a hosted chat-completions API.
///
/// One request per analysis: JSON-object response format, fixed sampling
/// temperature and output-token ceiling from settings. No retry, no
/// streaming.
pub struct GroqAnalyzer {
    client: reqwest::Client,
    settings: AnalyzerSettings,
}

#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    response_format: ResponseFormat,
    temperature: f32,
    max_tokens: usize,
}

#[derive(Serialize, Deserialize, Clone)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct ResponseFormat {
    r#type: String,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

impl GroqAnalyzer {
    pub fn new(settings: AnalyzerSettings) -> Self {
        Self {
            client: reqwest::Client::new(),
            settings,
        }
    }

    fn build_user_prompt(transcript: &str, annotated: &str) -> String {
        format!(
            "TRANSCRIPT: {}\n\n\
             TRANSCRIPT WITH CONFIDENCE SCORES: {}\n\n\
             The confidence scores (0.0 to 1.0) indicate how sure the STT model was.\n\
             Low scores (< 0.7) might mean the speaker mumbled, mispronounced, or there was background noise.\n\
             Filler words like 'um', 'uh', 'like', 'you know' are preserved - please count them in your analysis.\n\n\
             Please analyze the speech quality and provide insights.",
            transcript, annotated
        )
    }
}

#[async_trait]
impl SpeechAnalyzer for GroqAnalyzer {
    async fn analyze(
        &self,
        transcript: &str,
        annotated: &str,
        system_message: &str,
    ) -> Result<serde_json::Value, AnalysisError> {
        let api_key = self
            .settings
            .api_key
            .as_deref()
            .ok_or(AnalysisError::MissingApiKey)?;

        let request_body = ChatCompletionRequest {
            model: self.settings.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system_message.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: Self::build_user_prompt(transcript, annotated),
                },
            ],
            response_format: ResponseFormat {
                r#type: "json_object".to_string(),
            },
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
        };

        tracing::debug!(model = %self.settings.model, "Requesting speech analysis");

        let response = self
            .client
            .post(format!("{}/chat/completions", self.settings.base_url))
            .bearer_auth(api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| AnalysisError::ApiRequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AnalysisError::ApiRequestFailed(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| AnalysisError::InvalidResponse(e.to_string()))?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| AnalysisError::InvalidResponse("empty choices".to_string()))?;

        let verdict: serde_json::Value = serde_json::from_str(&content)
            .map_err(|e| AnalysisError::InvalidJson(e.to_string()))?;

        tracing::info!("Speech analysis response parsed");

        Ok(verdict)
    }

    fn is_configured(&self) -> bool {
        self.settings.api_key.is_some()
    }
}
