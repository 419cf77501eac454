pub mod audio_decoder;
mod candle_whisper_engine;
mod groq_whisper_engine;
mod transcription_engine_factory;

pub use candle_whisper_engine::CandleWhisperEngine;
pub use groq_whisper_engine::GroqWhisperEngine;
pub use transcription_engine_factory::{TranscriptionEngineFactory, TranscriptionProvider};
