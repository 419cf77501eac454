use std::sync::Arc;

use crate::application::ports::{
    AnalysisError, AudioFetcher, FetchError, SpeechAnalyzer, TranscriptionEngine,
    TranscriptionError,
};
use crate::domain::{TranscriptionResult, annotate};

/// Runs the request pipeline: fetch, transcribe, annotate, analyze.
///
/// Audio bytes stay in memory for the lifetime of one request; there is no
/// filesystem intermediate to clean up on any exit path.
pub struct SpeechService<F, T, A>
where
    F: AudioFetcher,
    T: TranscriptionEngine + ?Sized,
    A: SpeechAnalyzer,
{
    fetcher: Arc<F>,
    engine: Arc<T>,
    analyzer: Arc<A>,
}

pub struct SpeechAnalysis {
    pub transcript: TranscriptionResult,
    pub analysis: serde_json::Value,
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Transcription(#[from] TranscriptionError),
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

impl PipelineError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Fetch(_) => "FetchError",
            Self::Transcription(_) => "TranscriptionError",
            Self::Analysis(_) => "AnalysisError",
        }
    }
}

impl<F, T, A> SpeechService<F, T, A>
where
    F: AudioFetcher,
    T: TranscriptionEngine + ?Sized,
    A: SpeechAnalyzer,
{
    pub fn new(fetcher: Arc<F>, engine: Arc<T>, analyzer: Arc<A>) -> Self {
        Self {
            fetcher,
            engine,
            analyzer,
        }
    }

    pub async fn transcribe_from_url(
        &self,
        url: &str,
    ) -> Result<TranscriptionResult, PipelineError> {
        let audio = self.fetcher.fetch(url).await?;
        tracing::debug!(bytes = audio.len(), "Audio downloaded");

        let speech = self.engine.transcribe(&audio).await?;
        tracing::info!(
            words = speech.words.len(),
            language = %speech.language,
            "Transcription completed"
        );

        Ok(annotate(&speech.words))
    }

    pub async fn analyze_from_url(
        &self,
        url: &str,
        system_message: &str,
    ) -> Result<SpeechAnalysis, PipelineError> {
        let transcript = self.transcribe_from_url(url).await?;

        let analysis = self
            .analyzer
            .analyze(
                &transcript.plain_text,
                &transcript.annotated_text,
                system_message,
            )
            .await?;
        tracing::info!("Speech analysis completed");

        Ok(SpeechAnalysis {
            transcript,
            analysis,
        })
    }

    pub fn engine_ready(&self) -> bool {
        self.engine.is_ready()
    }

    pub fn analyzer_configured(&self) -> bool {
        self.analyzer.is_configured()
    }
}
