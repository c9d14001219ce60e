use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::analysis::ComparativeAnalysis;
use crate::{Error, Result};

/// Sentiment category attached to an article.
///
/// The three canonical categories are what the scorer produces. Any other
/// string that reaches us (hand-written records, older payloads) is kept
/// verbatim in `Other` instead of being coerced.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
    Other(String),
}

impl SentimentLabel {
    pub const CANONICAL: [SentimentLabel; 3] = [
        SentimentLabel::Positive,
        SentimentLabel::Negative,
        SentimentLabel::Neutral,
    ];

    /// Parses an exact label string. Only the upper-case canonical spellings
    /// map to canonical variants.
    pub fn from_literal(value: &str) -> Self {
        match value {
            "POSITIVE" => SentimentLabel::Positive,
            "NEGATIVE" => SentimentLabel::Negative,
            "NEUTRAL" => SentimentLabel::Neutral,
            other => SentimentLabel::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            SentimentLabel::Positive => "POSITIVE",
            SentimentLabel::Negative => "NEGATIVE",
            SentimentLabel::Neutral => "NEUTRAL",
            SentimentLabel::Other(value) => value,
        }
    }

    pub fn is_canonical(&self) -> bool {
        !matches!(self, SentimentLabel::Other(_))
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SentimentLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SentimentLabel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(SentimentLabel::from_literal(&value))
    }
}

/// The `keywords` field of an article as it was received.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Keywords {
    #[default]
    Missing,
    List(Vec<String>),
    /// Anything that is not an array of strings, kept for diagnostics.
    Malformed(Value),
}

impl From<Vec<String>> for Keywords {
    fn from(list: Vec<String>) -> Self {
        Keywords::List(list)
    }
}

impl From<Value> for Keywords {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Keywords::Missing,
            Value::Array(items) if items.iter().all(Value::is_string) => Keywords::List(
                items
                    .into_iter()
                    .filter_map(|item| match item {
                        Value::String(s) => Some(s),
                        _ => None,
                    })
                    .collect(),
            ),
            other => Keywords::Malformed(other),
        }
    }
}

impl Serialize for Keywords {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Keywords::Missing => serializer.serialize_none(),
            Keywords::List(list) => list.serialize(serializer),
            Keywords::Malformed(value) => value.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Keywords {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Ok(Keywords::from(Value::deserialize(deserializer)?))
    }
}

fn lenient_label<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Option<SentimentLabel>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(SentimentLabel::from_literal(&s)),
        _ => None,
    })
}

fn lenient_score<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Option<f64>, D::Error> {
    Ok(Value::deserialize(deserializer)?.as_f64())
}

/// One news item for a company query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Article {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub keywords: Keywords,
    #[serde(default)]
    pub publish_date: String,
    #[serde(default, deserialize_with = "lenient_label")]
    pub sentiment: Option<SentimentLabel>,
    #[serde(default, deserialize_with = "lenient_score")]
    pub sentiment_score: Option<f64>,
}

impl Article {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = Keywords::List(keywords.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_publish_date(mut self, date: impl Into<String>) -> Self {
        self.publish_date = date.into();
        self
    }

    pub fn with_sentiment(mut self, label: SentimentLabel, score: f64) -> Self {
        self.sentiment = Some(label);
        self.sentiment_score = Some(score);
        self
    }

    /// An article counts as scored once both the label and the score are set.
    pub fn is_scored(&self) -> bool {
        self.sentiment.is_some() && self.sentiment_score.is_some()
    }

    pub fn keyword_list(&self) -> Result<&[String]> {
        match &self.keywords {
            Keywords::List(list) => Ok(list),
            Keywords::Missing => Err(Error::MissingField("keywords")),
            Keywords::Malformed(value) => Err(Error::MalformedField {
                field: "keywords",
                found: value_kind(value).to_string(),
            }),
        }
    }

    /// The score if it is present and usable as a number.
    pub fn score(&self) -> Result<f64> {
        match self.sentiment_score {
            Some(score) if score.is_finite() => Ok(score),
            Some(score) => Err(Error::MalformedField {
                field: "sentiment_score",
                found: score.to_string(),
            }),
            None => Err(Error::MissingField("sentiment_score")),
        }
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array with non-string items",
        Value::Object(_) => "object",
    }
}

/// Everything produced for one company query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyReport {
    pub company_name: String,
    pub articles: Vec<Article>,
    pub comparative_analysis: ComparativeAnalysis,
    pub summary_text: String,
    pub audio_path: Option<PathBuf>,
    pub generated_at: DateTime<Utc>,
}
