use std::sync::Arc;

use crate::application::ports::{AudioFetcher, SpeechAnalyzer, TranscriptionEngine};
use crate::application::services::SpeechService;
use crate::presentation::config::Settings;

pub struct AppState<F, T, A>
where
    F: AudioFetcher,
    T: TranscriptionEngine + ?Sized,
    A: SpeechAnalyzer,
{
    pub speech_service: Arc<SpeechService<F, T, A>>,
    pub settings: Settings,
}

impl<F, T, A> Clone for AppState<F, T, A>
where
    F: AudioFetcher,
    T: TranscriptionEngine + ?Sized,
    A: SpeechAnalyzer,
{
    fn clone(&self) -> Self {
        Self {
            speech_service: Arc::clone(&self.speech_service),
            settings: self.settings.clone(),
        }
    }
}
