use oratio::infrastructure::audio::TranscriptionProvider;
use oratio::presentation::config::Settings;

// Environment mutation is process-wide, so everything runs inside one test
// to avoid races with parallel test threads.
#[test]
fn given_environment_when_loading_settings_then_defaults_and_overrides_apply() {
    for key in [
        "SERVER_PORT",
        "FETCH_TIMEOUT_SECS",
        "TRANSCRIPTION_PROVIDER",
        "ANALYZER_MODEL",
        "ANALYZER_TEMPERATURE",
        "ANALYZER_MAX_TOKENS",
        "GROQ_API_KEY",
    ] {
        std::env::remove_var(key);
    }

    let defaults = Settings::from_env().unwrap();
    assert_eq!(defaults.server.port, 3000);
    assert_eq!(defaults.fetch.timeout_secs, 30);
    assert_eq!(defaults.transcription.provider, TranscriptionProvider::Local);
    assert_eq!(defaults.analyzer.model, "llama-3.3-70b-versatile");
    assert_eq!(defaults.analyzer.max_tokens, 1000);
    assert!(defaults.analyzer.api_key.is_none());

    std::env::set_var("FETCH_TIMEOUT_SECS", "5");
    std::env::set_var("TRANSCRIPTION_PROVIDER", "groq");
    std::env::set_var("GROQ_API_KEY", "gsk-test");

    let overridden = Settings::from_env().unwrap();
    assert_eq!(overridden.fetch.timeout_secs, 5);
    assert_eq!(overridden.transcription.provider, TranscriptionProvider::Groq);
    assert_eq!(overridden.analyzer.api_key.as_deref(), Some("gsk-test"));

    std::env::set_var("TRANSCRIPTION_PROVIDER", "bogus");
    assert!(Settings::from_env().is_err());

    std::env::set_var("FETCH_TIMEOUT_SECS", "not-a-number");
    std::env::set_var("TRANSCRIPTION_PROVIDER", "local");
    assert!(Settings::from_env().is_err());

    for key in ["FETCH_TIMEOUT_SECS", "TRANSCRIPTION_PROVIDER", "GROQ_API_KEY"] {
        std::env::remove_var(key);
    }
}
