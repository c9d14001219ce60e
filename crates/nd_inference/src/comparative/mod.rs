//! Cross-article statistics.
//!
//! [`ComparativeAnalyzer::analyze`] is total: whatever shape the articles are
//! in, it returns a complete [`ComparativeAnalysis`]. Missing labels count as
//! NEUTRAL, missing or unusable scores are left out of the average, and
//! records whose keywords are not a list of strings are skipped for the
//! keyword ranking.

use indexmap::IndexMap;
use nd_core::analysis::NEUTRAL_PRIOR;
use nd_core::{Article, ComparativeAnalysis, Error, Result, SentimentDistribution, SentimentLabel, TopKeywords};
use tracing::{debug, warn};

#[derive(Debug, Default, Clone, Copy)]
pub struct ComparativeAnalyzer;

impl ComparativeAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, articles: &[Article]) -> ComparativeAnalysis {
        if articles.is_empty() {
            return ComparativeAnalysis::empty();
        }

        ComparativeAnalysis {
            sentiment_distribution: sentiment_distribution(articles),
            average_sentiment: average_sentiment(articles),
            top_keywords: keywords_or_sentinel(rank_keywords(articles)),
            total_articles: articles.len(),
        }
    }
}

fn sentiment_distribution(articles: &[Article]) -> SentimentDistribution {
    let mut distribution = SentimentDistribution::new();
    for article in articles {
        match &article.sentiment {
            Some(label) => distribution.record(label),
            None => {
                debug!(url = %article.url, "{}, counting as NEUTRAL", Error::MissingField("sentiment"));
                distribution.record(&SentimentLabel::Neutral);
            }
        }
    }
    distribution
}

fn average_sentiment(articles: &[Article]) -> f64 {
    let (sum, count) = articles
        .iter()
        .filter_map(|article| match article.score() {
            Ok(score) => Some(score),
            Err(e) => {
                debug!(url = %article.url, "{}", e);
                None
            }
        })
        .fold((0.0, 0usize), |(sum, count), score| (sum + score, count + 1));

    if count == 0 {
        NEUTRAL_PRIOR
    } else {
        sum / count as f64
    }
}

/// Counts keywords across all articles. The sort is stable, so keywords with
/// equal counts keep the order in which they were first seen.
fn rank_keywords(articles: &[Article]) -> Result<TopKeywords> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();

    for article in articles {
        let keywords = match article.keyword_list() {
            Ok(keywords) => keywords,
            Err(e) => {
                debug!(url = %article.url, "Skipping keywords: {}", e);
                continue;
            }
        };

        for keyword in keywords {
            let count = counts.entry(keyword.as_str()).or_insert(0);
            *count = count
                .checked_add(1)
                .ok_or_else(|| Error::AggregationFault(format!("count overflow for keyword '{}'", keyword)))?;
        }
    }

    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    Ok(TopKeywords::from_ranked(
        ranked.into_iter().map(|(keyword, count)| (keyword.to_string(), count)),
    ))
}

fn keywords_or_sentinel(result: Result<TopKeywords>) -> TopKeywords {
    match result {
        Ok(top) => top,
        Err(e) => {
            warn!("⚠️ Keyword extraction failed: {}", e);
            TopKeywords::error_sentinel()
        }
    }
}
