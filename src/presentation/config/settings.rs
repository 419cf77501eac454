use std::str::FromStr;

use crate::infrastructure::audio::TranscriptionProvider;

/// Process configuration, read from the environment once at startup.
///
/// A missing `GROQ_API_KEY` is deliberately not an error here: the service
/// starts degraded, `/health` reports the state, and the affected adapters
/// fail at call time.
#[derive(Debug, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub fetch: FetchSettings,
    pub transcription: TranscriptionSettings,
    pub analyzer: AnalyzerSettings,
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct TranscriptionSettings {
    pub provider: TranscriptionProvider,
    pub whisper_model: String,
}

#[derive(Debug, Clone)]
pub struct AnalyzerSettings {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            server: ServerSettings {
                host: env_or("SERVER_HOST", "0.0.0.0"),
                port: env_parsed("SERVER_PORT", 3000)?,
            },
            fetch: FetchSettings {
                timeout_secs: env_parsed("FETCH_TIMEOUT_SECS", 30)?,
            },
            transcription: TranscriptionSettings {
                provider: env_parsed("TRANSCRIPTION_PROVIDER", TranscriptionProvider::Local)?,
                whisper_model: env_or("WHISPER_MODEL", "openai/whisper-small.en"),
            },
            analyzer: AnalyzerSettings {
                api_key: std::env::var("GROQ_API_KEY").ok().filter(|k| !k.is_empty()),
                base_url: env_or("ANALYZER_BASE_URL", "https://api.groq.com/openai/v1"),
                model: env_or("ANALYZER_MODEL", "llama-3.3-70b-versatile"),
                temperature: env_parsed("ANALYZER_TEMPERATURE", 0.7)?,
                max_tokens: env_parsed("ANALYZER_MAX_TOKENS", 1000)?,
            },
        })
    }
}

fn env_or(key: &'static str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parsed<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw.parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            key,
            message: format!("{}: {}", raw, e),
        }),
        Err(_) => Ok(default),
    }
}
