mod analyze;
mod health;
mod root;
mod transcript;

/// Sample clip used when the caller omits `?url`.
pub(crate) const DEFAULT_SPEECH_URL: &str =
    "https://pronunciationstudio.com/wp-content/uploads/2016/02/Audio-Introduction-0.1.mp3";

pub use analyze::{DEFAULT_SYSTEM_MESSAGE, analyze_speech_handler};
pub use health::health_handler;
pub use root::root_handler;
pub use transcript::transcript_handler;
