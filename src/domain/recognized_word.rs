/// A single recognized token, filler words included.
///
/// `confidence` is the engine's per-word probability in [0, 1]. Remote
/// engines that only return plain text report `None` for every word.
#[derive(Debug, Clone, PartialEq)]
pub struct RecognizedWord {
    pub text: String,
    pub confidence: Option<f32>,
    pub start_time: f32,
    pub end_time: f32,
}

impl RecognizedWord {
    pub fn new(
        text: impl Into<String>,
        confidence: Option<f32>,
        start_time: f32,
        end_time: f32,
    ) -> Self {
        Self {
            text: text.into(),
            confidence,
            start_time,
            end_time,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecognizedSpeech {
    pub language: String,
    pub words: Vec<RecognizedWord>,
}
