use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use crate::application::ports::{AudioFetcher, SpeechAnalyzer, TranscriptionEngine};
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::state::AppState;

use super::DEFAULT_SPEECH_URL;

/// Default analysis instruction. Callers override it through the
/// `custom_system_message` query parameter; nothing validates that the
/// model honors the requested fields.
pub const DEFAULT_SYSTEM_MESSAGE: &str = "You are a speech quality analyst. \
Respond with a JSON object containing: fluency_score (0-10), filler_count \
(number of filler words such as 'um', 'uh', 'like', 'you know'), \
filler_words (the fillers found), low_confidence_words (words with \
confidence below 0.7), average_confidence, and insights (a short list of \
observations about the speech quality).";

#[derive(Deserialize)]
pub struct AnalyzeParams {
    pub url: Option<String>,
    pub custom_system_message: Option<String>,
}

#[derive(Serialize)]
pub struct AnalyzeResponse {
    pub status: String,
    pub url: String,
    pub transcript: String,
    pub annotated_transcript: String,
    pub analysis: serde_json::Value,
}

#[derive(Serialize)]
pub struct AnalyzeErrorResponse {
    pub error: String,
    pub r#type: String,
    pub trace: String,
}

#[tracing::instrument(skip(state, params))]
pub async fn analyze_speech_handler<F, T, A>(
    State(state): State<AppState<F, T, A>>,
    Query(params): Query<AnalyzeParams>,
) -> impl IntoResponse
where
    F: AudioFetcher + 'static,
    T: TranscriptionEngine + 'static + ?Sized,
    A: SpeechAnalyzer + 'static,
{
    let url = params
        .url
        .unwrap_or_else(|| DEFAULT_SPEECH_URL.to_string());
    let system_message = params
        .custom_system_message
        .unwrap_or_else(|| DEFAULT_SYSTEM_MESSAGE.to_string());

    tracing::debug!(
        url = %sanitize_prompt(&url),
        system_message = %sanitize_prompt(&system_message),
        "Processing speech analysis request"
    );

    match state
        .speech_service
        .analyze_from_url(&url, &system_message)
        .await
    {
        Ok(result) => (
            StatusCode::OK,
            Json(AnalyzeResponse {
                status: "success".to_string(),
                url,
                transcript: result.transcript.plain_text,
                annotated_transcript: result.transcript.annotated_text,
                analysis: result.analysis,
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, kind = e.kind(), "Speech analysis request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(AnalyzeErrorResponse {
                    error: e.to_string(),
                    r#type: e.kind().to_string(),
                    trace: format!("{:?}", e),
                }),
            )
                .into_response()
        }
    }
}
