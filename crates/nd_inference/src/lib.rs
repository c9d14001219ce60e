pub mod comparative;
pub mod models;
pub mod narration;
pub mod scorer;
pub mod speech;

/// Sentiment model configuration, usually filled from CLI flags.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub api_key: Option<String>,
    pub model_name: Option<String>,
    pub model_url: Option<String>,
}

pub mod prelude {
    pub use super::comparative::ComparativeAnalyzer;
    pub use super::models::create_model;
    pub use super::narration::{narrate, NARRATION_LANGUAGE};
    pub use super::scorer::{SentimentResult, SentimentScorer};
    pub use super::speech::{create_synthesizer, SpeechConfig};
    pub use super::Config;
    pub use nd_core::{Article, ComparativeAnalysis, Error, Result, SentimentLabel};
}

pub use comparative::ComparativeAnalyzer;
pub use models::create_model;
pub use nd_core::{SentimentModel, SpeechSynthesizer};
pub use scorer::SentimentScorer;
