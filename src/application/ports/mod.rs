mod audio_fetcher;
mod speech_analyzer;
mod transcription_engine;

pub use audio_fetcher::{AudioFetcher, FetchError};
pub use speech_analyzer::{AnalysisError, SpeechAnalyzer};
pub use transcription_engine::{TranscriptionEngine, TranscriptionError};
