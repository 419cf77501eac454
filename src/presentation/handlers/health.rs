use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::application::ports::{AudioFetcher, SpeechAnalyzer, TranscriptionEngine};
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub whisper_loaded: bool,
    pub groq_configured: bool,
}

pub async fn health_handler<F, T, A>(State(state): State<AppState<F, T, A>>) -> impl IntoResponse
where
    F: AudioFetcher + 'static,
    T: TranscriptionEngine + 'static + ?Sized,
    A: SpeechAnalyzer + 'static,
{
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            whisper_loaded: state.speech_service.engine_ready(),
            groq_configured: state.speech_service.analyzer_configured(),
        }),
    )
}
