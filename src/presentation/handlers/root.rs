use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

pub async fn root_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "service": "oratio",
            "description": "Speech transcription and quality analysis service",
            "endpoints": {
                "/transcript": "GET - download and transcribe audio from ?url",
                "/analyzeSpeech": "GET - transcribe and analyze speech quality from ?url, optional ?custom_system_message",
                "/health": "GET - service health and configuration state"
            }
        })),
    )
}
