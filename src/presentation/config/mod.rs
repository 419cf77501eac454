mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    AnalyzerSettings, ConfigError, FetchSettings, ServerSettings, Settings, TranscriptionSettings,
};
