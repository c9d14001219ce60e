use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

use crate::types::SentimentLabel;

/// Average reported when no article carries a usable score.
pub const NEUTRAL_PRIOR: f64 = 0.5;

/// Maximum number of entries kept in [`TopKeywords`].
pub const TOP_KEYWORD_LIMIT: usize = 10;

/// Key of the lone entry reported when keyword extraction failed.
pub const ERROR_KEYWORD: &str = "Error";

/// Article count per sentiment label.
///
/// POSITIVE, NEGATIVE and NEUTRAL are always present, in that order. Any other
/// literal label follows in the order it was first recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SentimentDistribution(IndexMap<String, usize>);

impl SentimentDistribution {
    pub fn new() -> Self {
        Self(
            SentimentLabel::CANONICAL
                .iter()
                .map(|label| (label.as_str().to_string(), 0))
                .collect(),
        )
    }

    /// Builds a distribution from arbitrary counts, filling in any missing
    /// canonical category with 0.
    pub fn from_counts<I, S>(counts: I) -> Self
    where
        I: IntoIterator<Item = (S, usize)>,
        S: Into<String>,
    {
        let mut distribution = Self::new();
        for (label, count) in counts {
            *distribution.0.entry(label.into()).or_insert(0) += count;
        }
        distribution
    }

    pub fn record(&mut self, label: &SentimentLabel) {
        *self.0.entry(label.as_str().to_string()).or_insert(0) += 1;
    }

    /// Count for a label, 0 if it was never recorded.
    pub fn count(&self, label: &str) -> usize {
        self.0.get(label).copied().unwrap_or(0)
    }

    pub fn positive(&self) -> usize {
        self.count(SentimentLabel::Positive.as_str())
    }

    pub fn negative(&self) -> usize {
        self.count(SentimentLabel::Negative.as_str())
    }

    pub fn neutral(&self) -> usize {
        self.count(SentimentLabel::Neutral.as_str())
    }

    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.0.iter().map(|(label, count)| (label.as_str(), *count))
    }
}

impl Default for SentimentDistribution {
    fn default() -> Self {
        Self::new()
    }
}

impl<'de> Deserialize<'de> for SentimentDistribution {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let counts = IndexMap::<String, usize>::deserialize(deserializer)?;
        Ok(Self::from_counts(counts))
    }
}

/// Most frequent keywords, highest count first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TopKeywords(IndexMap<String, usize>);

impl TopKeywords {
    /// Keeps the first [`TOP_KEYWORD_LIMIT`] entries of an already ranked list.
    pub fn from_ranked<I>(ranked: I) -> Self
    where
        I: IntoIterator<Item = (String, usize)>,
    {
        Self(ranked.into_iter().take(TOP_KEYWORD_LIMIT).collect())
    }

    /// `{"Error": 0}`
    pub fn error_sentinel() -> Self {
        Self(IndexMap::from([(ERROR_KEYWORD.to_string(), 0)]))
    }

    pub fn is_error(&self) -> bool {
        self.0.len() == 1 && self.0.get(ERROR_KEYWORD) == Some(&0)
    }

    pub fn get(&self, keyword: &str) -> Option<usize> {
        self.0.get(keyword).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.0.iter().map(|(keyword, count)| (keyword.as_str(), *count))
    }
}

/// Aggregate statistics over one article collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparativeAnalysis {
    pub sentiment_distribution: SentimentDistribution,
    pub average_sentiment: f64,
    pub top_keywords: TopKeywords,
    pub total_articles: usize,
}

impl ComparativeAnalysis {
    /// The fixed result for an empty collection.
    pub fn empty() -> Self {
        Self {
            sentiment_distribution: SentimentDistribution::new(),
            average_sentiment: NEUTRAL_PRIOR,
            top_keywords: TopKeywords::default(),
            total_articles: 0,
        }
    }
}
