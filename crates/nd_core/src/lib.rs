pub mod analysis;
pub mod error;
pub mod models;
pub mod sources;
pub mod types;

pub use analysis::{ComparativeAnalysis, SentimentDistribution, TopKeywords};
pub use error::{Error, Result};
pub use models::{Classification, SentimentModel, SpeechSynthesizer};
pub use sources::{FallbackProvider, NewsSource};
pub use types::{Article, CompanyReport, Keywords, SentimentLabel};
