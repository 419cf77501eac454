use std::sync::Arc;
use std::sync::Mutex;

use oratio::application::ports::{
    AnalysisError, AudioFetcher, FetchError, SpeechAnalyzer, TranscriptionEngine,
    TranscriptionError,
};
use oratio::application::services::{PipelineError, SpeechService};
use oratio::domain::{RecognizedSpeech, RecognizedWord};

struct StaticFetcher {
    bytes: Vec<u8>,
}

#[async_trait::async_trait]
impl AudioFetcher for StaticFetcher {
    async fn fetch(&self, _url: &str) -> Result<Vec<u8>, FetchError> {
        Ok(self.bytes.clone())
    }
}

struct FailingFetcher;

#[async_trait::async_trait]
impl AudioFetcher for FailingFetcher {
    async fn fetch(&self, _url: &str) -> Result<Vec<u8>, FetchError> {
        Err(FetchError::Status { status: 404 })
    }
}

struct StaticEngine {
    words: Vec<RecognizedWord>,
}

#[async_trait::async_trait]
impl TranscriptionEngine for StaticEngine {
    async fn transcribe(&self, _audio: &[u8]) -> Result<RecognizedSpeech, TranscriptionError> {
        Ok(RecognizedSpeech {
            language: "en".to_string(),
            words: self.words.clone(),
        })
    }

    fn is_ready(&self) -> bool {
        true
    }
}

struct FailingEngine;

#[async_trait::async_trait]
impl TranscriptionEngine for FailingEngine {
    async fn transcribe(&self, _audio: &[u8]) -> Result<RecognizedSpeech, TranscriptionError> {
        Err(TranscriptionError::EmptyResult)
    }

    fn is_ready(&self) -> bool {
        false
    }
}

#[derive(Default)]
struct CapturingAnalyzer {
    seen: Mutex<Option<(String, String, String)>>,
}

#[async_trait::async_trait]
impl SpeechAnalyzer for CapturingAnalyzer {
    async fn analyze(
        &self,
        transcript: &str,
        annotated: &str,
        system_message: &str,
    ) -> Result<serde_json::Value, AnalysisError> {
        *self.seen.lock().unwrap() = Some((
            transcript.to_string(),
            annotated.to_string(),
            system_message.to_string(),
        ));
        Ok(serde_json::json!({"fluency_score": 8}))
    }

    fn is_configured(&self) -> bool {
        true
    }
}

fn sample_words() -> Vec<RecognizedWord> {
    vec![
        RecognizedWord::new("Hello", Some(0.95), 0.0, 0.4),
        RecognizedWord::new("um", Some(0.4), 0.4, 0.6),
        RecognizedWord::new("world", Some(f32::NAN), 0.6, 1.0),
    ]
}

#[tokio::test]
async fn given_successful_pipeline_when_transcribing_then_returns_both_variants() {
    let service = SpeechService::new(
        Arc::new(StaticFetcher { bytes: vec![1, 2] }),
        Arc::new(StaticEngine {
            words: sample_words(),
        }),
        Arc::new(CapturingAnalyzer::default()),
    );

    let result = service.transcribe_from_url("http://example.com/a.mp3").await;

    let transcript = result.unwrap();
    assert_eq!(transcript.plain_text, "Hello um world");
    assert_eq!(transcript.annotated_text, "Hello(0.95) um(0.4) world(0.5)");
}

#[tokio::test]
async fn given_fetch_failure_when_transcribing_then_propagates_fetch_error() {
    let service = SpeechService::new(
        Arc::new(FailingFetcher),
        Arc::new(StaticEngine {
            words: sample_words(),
        }),
        Arc::new(CapturingAnalyzer::default()),
    );

    let result = service.transcribe_from_url("http://example.com/a.mp3").await;

    assert!(matches!(
        result,
        Err(PipelineError::Fetch(FetchError::Status { status: 404 }))
    ));
}

#[tokio::test]
async fn given_engine_failure_when_analyzing_then_no_analysis_is_attempted() {
    let analyzer = Arc::new(CapturingAnalyzer::default());
    let service = SpeechService::new(
        Arc::new(StaticFetcher { bytes: vec![1] }),
        Arc::new(FailingEngine),
        Arc::clone(&analyzer),
    );

    let result = service
        .analyze_from_url("http://example.com/a.mp3", "analyze")
        .await;

    assert!(matches!(result, Err(PipelineError::Transcription(_))));
    assert!(analyzer.seen.lock().unwrap().is_none());
}

#[tokio::test]
async fn given_successful_pipeline_when_analyzing_then_analyzer_sees_both_transcripts() {
    let analyzer = Arc::new(CapturingAnalyzer::default());
    let service = SpeechService::new(
        Arc::new(StaticFetcher { bytes: vec![1] }),
        Arc::new(StaticEngine {
            words: sample_words(),
        }),
        Arc::clone(&analyzer),
    );

    let result = service
        .analyze_from_url("http://example.com/a.mp3", "be thorough")
        .await
        .unwrap();

    assert_eq!(result.analysis["fluency_score"], 8);

    let seen = analyzer.seen.lock().unwrap().clone().unwrap();
    assert_eq!(seen.0, "Hello um world");
    assert_eq!(seen.1, "Hello(0.95) um(0.4) world(0.5)");
    assert_eq!(seen.2, "be thorough");
}

#[tokio::test]
async fn given_component_state_when_queried_then_service_reflects_it() {
    let service = SpeechService::new(
        Arc::new(StaticFetcher { bytes: vec![] }),
        Arc::new(FailingEngine),
        Arc::new(CapturingAnalyzer::default()),
    );

    assert!(!service.engine_ready());
    assert!(service.analyzer_configured());
}
