use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use crate::application::ports::{AudioFetcher, SpeechAnalyzer, TranscriptionEngine};
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::state::AppState;

use super::DEFAULT_SPEECH_URL;

#[derive(Deserialize)]
pub struct TranscriptParams {
    pub url: Option<String>,
}

#[derive(Serialize)]
pub struct TranscriptBody {
    pub text: String,
    pub annotated: String,
}

#[derive(Serialize)]
pub struct TranscriptResponse {
    pub status: String,
    pub transcript: TranscriptBody,
    pub url: String,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub detail: String,
}

#[tracing::instrument(skip(state, params))]
pub async fn transcript_handler<F, T, A>(
    State(state): State<AppState<F, T, A>>,
    Query(params): Query<TranscriptParams>,
) -> impl IntoResponse
where
    F: AudioFetcher + 'static,
    T: TranscriptionEngine + 'static + ?Sized,
    A: SpeechAnalyzer + 'static,
{
    let url = params
        .url
        .unwrap_or_else(|| DEFAULT_SPEECH_URL.to_string());

    tracing::debug!(url = %sanitize_prompt(&url), "Processing transcript request");

    match state.speech_service.transcribe_from_url(&url).await {
        Ok(result) => (
            StatusCode::OK,
            Json(TranscriptResponse {
                status: "success".to_string(),
                transcript: TranscriptBody {
                    text: result.plain_text,
                    annotated: result.annotated_text,
                },
                url,
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Transcript request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorDetail {
                    detail: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}
