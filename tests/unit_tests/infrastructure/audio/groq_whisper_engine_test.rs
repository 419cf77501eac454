use axum::Router;
use axum::response::IntoResponse;
use axum::routing::post;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use oratio::application::ports::{TranscriptionEngine, TranscriptionError};
use oratio::infrastructure::audio::GroqWhisperEngine;

async fn start_mock_transcription_server(
    response_status: u16,
    response_body: &'static str,
) -> (String, oneshot::Sender<()>) {
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let app = Router::new().route(
        "/audio/transcriptions",
        post(move || async move {
            let status = axum::http::StatusCode::from_u16(response_status).unwrap();
            (status, response_body).into_response()
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{}", addr);

    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            })
            .await
            .ok();
    });

    (base_url, shutdown_tx)
}

fn engine_for(base_url: &str) -> GroqWhisperEngine {
    GroqWhisperEngine::new(
        Some("test-key".to_string()),
        Some(base_url.to_string()),
        None,
    )
}

#[tokio::test]
async fn given_plain_text_response_when_transcribing_then_words_have_no_confidence() {
    let (base_url, shutdown_tx) =
        start_mock_transcription_server(200, "Hello there everyone").await;

    let engine = engine_for(&base_url);
    let result = engine.transcribe(b"fake audio bytes").await;

    let speech = result.unwrap();
    assert_eq!(speech.language, "en");
    assert_eq!(speech.words.len(), 3);
    assert!(speech.words.iter().all(|w| w.confidence.is_none()));
    assert_eq!(speech.words[0].text, "Hello");
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_api_error_status_when_transcribing_then_returns_api_error() {
    let (base_url, shutdown_tx) =
        start_mock_transcription_server(401, r#"{"error": "invalid key"}"#).await;

    let engine = engine_for(&base_url);
    let result = engine.transcribe(b"bad audio").await;

    assert!(matches!(
        result,
        Err(TranscriptionError::ApiRequestFailed(_))
    ));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_empty_transcript_when_transcribing_then_returns_empty_result() {
    let (base_url, shutdown_tx) = start_mock_transcription_server(200, "   ").await;

    let engine = engine_for(&base_url);
    let result = engine.transcribe(b"silent audio").await;

    assert!(matches!(result, Err(TranscriptionError::EmptyResult)));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_missing_api_key_when_transcribing_then_fails_without_request() {
    let engine = GroqWhisperEngine::new(None, None, None);

    assert!(!engine.is_ready());

    let result = engine.transcribe(b"audio").await;
    assert!(matches!(result, Err(TranscriptionError::NotConfigured)));
}
