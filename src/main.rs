use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use oratio::application::services::SpeechService;
use oratio::infrastructure::audio::TranscriptionEngineFactory;
use oratio::infrastructure::fetch::HttpAudioFetcher;
use oratio::infrastructure::llm::GroqAnalyzer;
use oratio::infrastructure::observability::{TracingConfig, init_tracing};
use oratio::presentation::{AppState, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env()?;

    init_tracing(TracingConfig::default(), settings.server.port);

    let fetcher = Arc::new(HttpAudioFetcher::new(settings.fetch.timeout_secs)?);

    // The local model load runs to completion here, before the listener
    // binds, so /health never reports a half-loaded engine.
    let engine = TranscriptionEngineFactory::create(
        settings.transcription.provider,
        &settings.transcription.whisper_model,
        settings.analyzer.api_key.clone(),
    )?;

    let analyzer = Arc::new(GroqAnalyzer::new(settings.analyzer.clone()));

    let speech_service = Arc::new(SpeechService::new(fetcher, engine, analyzer));

    tracing::info!(
        whisper_loaded = speech_service.engine_ready(),
        groq_configured = speech_service.analyzer_configured(),
        "Pipeline assembled"
    );

    let state = AppState {
        speech_service,
        settings: settings.clone(),
    };

    let router = create_router(state);

    let addr = SocketAddr::new(settings.server.host.parse()?, settings.server.port);
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
