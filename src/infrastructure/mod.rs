pub mod audio;
pub mod fetch;
pub mod llm;
pub mod observability;
