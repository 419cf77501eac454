mod groq_analyzer;

pub use groq_analyzer::GroqAnalyzer;
