use std::fmt;

use nd_core::{Classification, Result, SentimentModel};

const POSITIVE_WORDS: &[&str] = &[
    "gain", "gains", "growth", "grow", "grows", "profit", "profits", "profitable", "record",
    "strong", "stronger", "beat", "beats", "surge", "surges", "rise", "rises", "rally",
    "success", "successful", "innovation", "innovative", "upgrade", "positive", "stable",
    "improve", "improved", "improvement", "launch", "expands", "expansion", "win", "wins",
    "boost", "boosts", "optimistic", "outperform", "bullish", "good", "great", "excellent",
];

const NEGATIVE_WORDS: &[&str] = &[
    "loss", "losses", "decline", "declines", "fall", "falls", "drop", "drops", "weak",
    "weaker", "miss", "misses", "lawsuit", "fine", "fined", "recall", "layoff", "layoffs",
    "cut", "cuts", "concern", "concerning", "risk", "risks", "downgrade", "negative", "slump",
    "plunge", "plunges", "crisis", "fraud", "probe", "bearish", "bad", "poor", "worst",
    "deepen", "deepens",
];

/// Offline word-list classifier.
///
/// Counts positive and negative vocabulary hits. A tie (including no hits at
/// all) is neutral with score 0.5, otherwise the majority wins and the score
/// grows with the margin.
pub struct LexiconModel;

impl fmt::Debug for LexiconModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LexiconModel").finish()
    }
}

impl LexiconModel {
    pub fn new() -> Self {
        Self
    }

    fn tally(text: &str) -> (usize, usize) {
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|token| !token.is_empty())
            .map(str::to_lowercase)
            .fold((0, 0), |(pos, neg), token| {
                if POSITIVE_WORDS.contains(&token.as_str()) {
                    (pos + 1, neg)
                } else if NEGATIVE_WORDS.contains(&token.as_str()) {
                    (pos, neg + 1)
                } else {
                    (pos, neg)
                }
            })
    }
}

impl Default for LexiconModel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl SentimentModel for LexiconModel {
    fn name(&self) -> &str {
        "Lexicon"
    }

    async fn classify(&self, text: &str) -> Result<Classification> {
        let (pos, neg) = Self::tally(text);
        if pos == neg {
            return Ok(Classification {
                label: "neutral".to_string(),
                score: 0.5,
            });
        }

        let margin = pos.abs_diff(neg) as f64 / (pos + neg) as f64;
        let label = if pos > neg { "positive" } else { "negative" };
        tracing::debug!("Lexicon hits: {} positive, {} negative", pos, neg);
        Ok(Classification {
            label: label.to_string(),
            score: 0.5 + 0.5 * margin,
        })
    }
}
