use std::str::FromStr;
use std::sync::Arc;

use crate::application::ports::{TranscriptionEngine, TranscriptionError};

use super::candle_whisper_engine::CandleWhisperEngine;
use super::groq_whisper_engine::GroqWhisperEngine;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscriptionProvider {
    Local,
    Groq,
}

impl FromStr for TranscriptionProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "groq" => Ok(Self::Groq),
            other => Err(format!(
                "Invalid transcription provider: {}. Expected: local or groq",
                other
            )),
        }
    }
}

pub struct TranscriptionEngineFactory;

impl TranscriptionEngineFactory {
    /// Builds the configured strategy. A missing API key for the remote
    /// strategy is not a startup failure; the engine reports not-ready and
    /// errors at call time instead.
    pub fn create(
        provider: TranscriptionProvider,
        model: &str,
        api_key: Option<String>,
    ) -> Result<Arc<dyn TranscriptionEngine>, TranscriptionError> {
        match provider {
            TranscriptionProvider::Local => {
                let engine = CandleWhisperEngine::new(model)?;
                Ok(Arc::new(engine))
            }
            TranscriptionProvider::Groq => {
                if api_key.is_none() {
                    tracing::warn!("GROQ_API_KEY not set; remote transcription is unavailable");
                }
                Ok(Arc::new(GroqWhisperEngine::new(api_key, None, None)))
            }
        }
    }
}
