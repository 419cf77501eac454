mod speech_service;

pub use speech_service::{PipelineError, SpeechAnalysis, SpeechService};
