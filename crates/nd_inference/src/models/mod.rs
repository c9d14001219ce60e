use std::sync::Arc;

use nd_core::{Error, Result, SentimentLabel, SentimentModel};
use tracing::info;

use crate::Config;

pub mod hosted;
pub mod lexicon;

pub use hosted::HostedModel;
pub use lexicon::LexiconModel;

pub const DEFAULT_MODEL: &str = "lexicon";

/// Builds the sentiment model named in the config. Call once at start-up and
/// share the returned handle.
pub fn create_model(config: Option<Config>) -> Result<Arc<dyn SentimentModel>> {
    let config = config.unwrap_or_default();
    let name = config
        .model_name
        .as_deref()
        .unwrap_or(DEFAULT_MODEL)
        .to_lowercase();

    let model: Arc<dyn SentimentModel> = match name.as_str() {
        "lexicon" => Arc::new(LexiconModel::new()),
        "hosted" | "huggingface" => Arc::new(HostedModel::from_config(&config)?),
        other => {
            return Err(Error::Config(format!(
                "Unknown sentiment model '{}'. Available models: lexicon, hosted",
                other
            )))
        }
    };

    info!("🧠 Sentiment model ready: {}", model.name());
    Ok(model)
}

/// Maps whatever vocabulary a classifier speaks onto the three canonical labels.
/// Unrecognized labels become NEUTRAL.
pub fn normalize_label(raw: &str) -> SentimentLabel {
    match raw {
        "LABEL_0" => SentimentLabel::Negative,
        "LABEL_1" => SentimentLabel::Positive,
        _ => match raw.trim().to_lowercase().as_str() {
            "positive" => SentimentLabel::Positive,
            "negative" => SentimentLabel::Negative,
            _ => SentimentLabel::Neutral,
        },
    }
}
