use super::RecognizedWord;

/// Substituted when the engine reported no confidence, or reported NaN.
const FALLBACK_CONFIDENCE: f32 = 0.5;

#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptionResult {
    pub plain_text: String,
    pub annotated_text: String,
}

/// Builds the plain and confidence-annotated transcripts from an ordered
/// word sequence.
///
/// Words that trim to empty contribute to neither output. A missing or NaN
/// confidence becomes exactly 0.5. Confidences are rounded to two decimals,
/// half away from zero, and rendered minimally (`0.4`, not `0.40`) with at
/// least one fractional digit. Pure function of its input; the empty
/// sequence yields two empty strings.
pub fn annotate(words: &[RecognizedWord]) -> TranscriptionResult {
    let mut plain_tokens = Vec::with_capacity(words.len());
    let mut annotated_tokens = Vec::with_capacity(words.len());

    for word in words {
        let text = word.text.trim();
        if text.is_empty() {
            continue;
        }

        let confidence = word
            .confidence
            .filter(|c| !c.is_nan())
            .unwrap_or(FALLBACK_CONFIDENCE);

        plain_tokens.push(text.to_string());
        annotated_tokens.push(format!("{}({})", text, format_confidence(confidence)));
    }

    TranscriptionResult {
        plain_text: plain_tokens.join(" "),
        annotated_text: annotated_tokens.join(" "),
    }
}

fn format_confidence(value: f32) -> String {
    let rounded = (f64::from(value) * 100.0).round() / 100.0;
    let mut rendered = rounded.to_string();
    if !rendered.contains('.') {
        rendered.push_str(".0");
    }
    rendered
}
