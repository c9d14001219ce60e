use std::sync::Arc;

use nd_core::analysis::NEUTRAL_PRIOR;
use nd_core::{Article, Result, SentimentLabel, SentimentModel};
use serde::Serialize;
use tracing::warn;

use crate::models::normalize_label;

/// Longest prefix of an article body handed to the classifier, in characters.
pub const MAX_INPUT_CHARS: usize = 512;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentResult {
    pub label: SentimentLabel,
    pub score: f64,
}

impl SentimentResult {
    pub fn neutral() -> Self {
        Self {
            label: SentimentLabel::Neutral,
            score: NEUTRAL_PRIOR,
        }
    }
}

/// Attaches canonical sentiment to article text using a shared model handle.
#[derive(Debug, Clone)]
pub struct SentimentScorer {
    model: Arc<dyn SentimentModel>,
}

impl SentimentScorer {
    pub fn new(model: Arc<dyn SentimentModel>) -> Self {
        Self { model }
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    /// Classifies `text`, surfacing model failures to the caller.
    pub async fn try_score(&self, text: &str) -> Result<SentimentResult> {
        if text.trim().is_empty() {
            return Ok(SentimentResult::neutral());
        }

        let raw = self.model.classify(truncate_chars(text, MAX_INPUT_CHARS)).await?;
        Ok(SentimentResult {
            label: normalize_label(&raw.label),
            score: clamp_score(raw.score),
        })
    }

    /// Classifies `text`; any model failure becomes NEUTRAL/0.5.
    pub async fn score(&self, text: &str) -> SentimentResult {
        match self.try_score(text).await {
            Ok(result) => result,
            Err(e) => {
                warn!("⚠️ Sentiment analysis failed, defaulting to neutral: {}", e);
                SentimentResult::neutral()
            }
        }
    }

    pub async fn score_articles(&self, articles: &mut [Article]) {
        for article in articles.iter_mut() {
            let result = self.score(&article.text).await;
            article.sentiment = Some(result.label);
            article.sentiment_score = Some(result.score);
        }
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

fn clamp_score(score: f64) -> f64 {
    if score.is_finite() {
        score.clamp(0.0, 1.0)
    } else {
        NEUTRAL_PRIOR
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use nd_core::{Classification, Error};
    use std::sync::Mutex;

    #[derive(Debug)]
    struct FixedModel {
        label: &'static str,
        score: f64,
        seen: Mutex<Vec<String>>,
    }

    impl FixedModel {
        fn new(label: &'static str, score: f64) -> Self {
            Self { label, score, seen: Mutex::new(Vec::new()) }
        }
    }

    #[async_trait]
    impl SentimentModel for FixedModel {
        fn name(&self) -> &str {
            "Fixed"
        }

        async fn classify(&self, text: &str) -> Result<Classification> {
            self.seen.lock().unwrap().push(text.to_string());
            Ok(Classification { label: self.label.to_string(), score: self.score })
        }
    }

    #[derive(Debug)]
    struct FailingModel;

    #[async_trait]
    impl SentimentModel for FailingModel {
        fn name(&self) -> &str {
            "Failing"
        }

        async fn classify(&self, _text: &str) -> Result<Classification> {
            Err(Error::UpstreamUnavailable("classifier offline".to_string()))
        }
    }

    #[tokio::test]
    async fn test_empty_text_skips_model() {
        let model = Arc::new(FixedModel::new("POSITIVE", 0.9));
        let scorer = SentimentScorer::new(model.clone());

        assert_eq!(scorer.score("   ").await, SentimentResult::neutral());
        assert!(model.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_labels_are_normalized() {
        let scorer = SentimentScorer::new(Arc::new(FixedModel::new("LABEL_0", 0.8)));
        let result = scorer.score("bad news").await;
        assert_eq!(result.label, SentimentLabel::Negative);
        assert_eq!(result.score, 0.8);

        let scorer = SentimentScorer::new(Arc::new(FixedModel::new("surprise", 0.7)));
        assert_eq!(scorer.score("odd news").await.label, SentimentLabel::Neutral);
    }

    #[tokio::test]
    async fn test_failure_defaults_to_neutral() {
        let scorer = SentimentScorer::new(Arc::new(FailingModel));
        assert!(scorer.try_score("text").await.is_err());
        assert_eq!(scorer.score("text").await, SentimentResult::neutral());
    }

    #[tokio::test]
    async fn test_scores_are_clamped() {
        let scorer = SentimentScorer::new(Arc::new(FixedModel::new("POSITIVE", 1.7)));
        assert_eq!(scorer.score("text").await.score, 1.0);

        let scorer = SentimentScorer::new(Arc::new(FixedModel::new("POSITIVE", f64::NAN)));
        assert_eq!(scorer.score("text").await.score, 0.5);
    }

    #[tokio::test]
    async fn test_input_is_truncated() {
        let model = Arc::new(FixedModel::new("NEUTRAL", 0.5));
        let scorer = SentimentScorer::new(model.clone());

        let text = "é".repeat(MAX_INPUT_CHARS + 40);
        scorer.score(&text).await;
        let seen = model.seen.lock().unwrap();
        assert_eq!(seen[0].chars().count(), MAX_INPUT_CHARS);
    }

    #[tokio::test]
    async fn test_score_articles_marks_every_article() {
        let scorer = SentimentScorer::new(Arc::new(FailingModel));
        let mut articles = vec![
            Article::new("a", "https://example.com/a").with_text("text"),
            Article::new("b", "https://example.com/b"),
        ];
        scorer.score_articles(&mut articles).await;

        assert!(articles.iter().all(Article::is_scored));
        assert!(articles.iter().all(|a| a.sentiment == Some(SentimentLabel::Neutral)));
    }
}
