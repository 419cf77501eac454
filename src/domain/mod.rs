mod recognized_word;
mod transcript;

pub use recognized_word::{RecognizedSpeech, RecognizedWord};
pub use transcript::{TranscriptionResult, annotate};
