use axum::Router;
use axum::middleware;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::{AudioFetcher, SpeechAnalyzer, TranscriptionEngine};
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    analyze_speech_handler, health_handler, root_handler, transcript_handler,
};
use crate::presentation::state::AppState;

pub fn create_router<F, T, A>(state: AppState<F, T, A>) -> Router
where
    F: AudioFetcher + 'static,
    T: TranscriptionEngine + 'static + ?Sized,
    A: SpeechAnalyzer + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler::<F, T, A>))
        .route("/transcript", get(transcript_handler::<F, T, A>))
        .route("/analyzeSpeech", get(analyze_speech_handler::<F, T, A>))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
