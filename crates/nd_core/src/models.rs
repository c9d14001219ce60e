use std::fmt;
use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Result;

/// Raw output of a sentiment classifier, before label normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub label: String,
    pub score: f64,
}

#[async_trait]
pub trait SentimentModel: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Classify a piece of text
    async fn classify(&self, text: &str) -> Result<Classification>;
}

#[async_trait]
pub trait SpeechSynthesizer: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Render `text` in language `lang` and return the path of the audio file
    async fn synthesize(&self, text: &str, lang: &str) -> Result<PathBuf>;
}
