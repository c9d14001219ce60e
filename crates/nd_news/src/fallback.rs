use std::sync::{Mutex, PoisonError};

use chrono::NaiveDate;
use nd_core::{Article, FallbackProvider};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

const TONES: [&str; 3] = ["positive", "negative", "neutral"];
const KEYWORDS: [&str; 12] = [
    "business", "finance", "technology", "market", "growth", "decline",
    "strategy", "product", "launch", "innovation", "revenue", "profit",
];
const HEADLINES: [&str; 4] = ["Breaking", "New", "Recent", "Important"];
const RECENCY: [&str; 3] = ["recent", "latest", "ongoing"];
const TOPICS: [&str; 3] = ["developments", "activities", "performance"];
const ATTRIBUTIONS: [&str; 3] = ["The company reported", "Analysts suggest", "Industry experts confirm"];
const FINDINGS: [&str; 3] = ["positive results", "concerning trends", "stable performance"];

/// Generates 5 to 10 varied placeholder articles.
///
/// Use [`SyntheticFallback::seeded`] for reproducible batches.
#[derive(Debug)]
pub struct SyntheticFallback {
    rng: Mutex<StdRng>,
}

impl SyntheticFallback {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }
}

fn pick<'a, R: Rng>(rng: &mut R, options: &[&'a str]) -> &'a str {
    options.choose(rng).copied().unwrap_or_default()
}

fn placeholder<R: Rng>(rng: &mut R, company: &str, index: usize) -> Article {
    let tone = pick(rng, &TONES);

    let mut keywords = vec![company.to_lowercase()];
    keywords.extend(KEYWORDS.choose_multiple(rng, 3).map(|k| k.to_string()));

    let month = rng.gen_range(1..=12);
    let day = rng.gen_range(1..=28);
    let publish_date = NaiveDate::from_ymd_opt(2023, month, day)
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "Unknown date".to_string());

    let title = format!("{} {} news about {}", pick(rng, &HEADLINES), tone, company);
    let summary = format!(
        "A {} summary about {}'s {} {}.",
        tone,
        company,
        pick(rng, &RECENCY),
        pick(rng, &TOPICS)
    );
    let text = format!(
        "This is article {} about {}. {} {}.",
        index,
        company,
        pick(rng, &ATTRIBUTIONS),
        pick(rng, &FINDINGS)
    );

    Article::new(title, format!("https://example.com/article{}", index))
        .with_summary(summary)
        .with_text(text)
        .with_keywords(keywords)
        .with_publish_date(publish_date)
}

impl FallbackProvider for SyntheticFallback {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn placeholders(&self, company: &str) -> Vec<Article> {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        let count = rng.gen_range(5..=10);
        (1..=count).map(|index| placeholder(&mut *rng, company, index)).collect()
    }
}

/// Hands back the same batch on every call.
#[derive(Debug, Clone, Default)]
pub struct FixedFallback {
    articles: Vec<Article>,
}

impl FixedFallback {
    pub fn new(articles: Vec<Article>) -> Self {
        Self { articles }
    }
}

impl FallbackProvider for FixedFallback {
    fn name(&self) -> &str {
        "fixed"
    }

    fn placeholders(&self, _company: &str) -> Vec<Article> {
        self.articles.clone()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoFallback;

impl FallbackProvider for NoFallback {
    fn name(&self) -> &str {
        "none"
    }

    fn placeholders(&self, _company: &str) -> Vec<Article> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_seeded_fallback_is_deterministic() {
        let a = SyntheticFallback::seeded(42).placeholders("Tesla");
        let b = SyntheticFallback::seeded(42).placeholders("Tesla");
        assert_eq!(a, b);
    }

    #[test]
    fn test_placeholder_shape() {
        let fallback = SyntheticFallback::seeded(7);
        for _ in 0..20 {
            let articles = fallback.placeholders("Tesla");
            assert!((5..=10).contains(&articles.len()));

            for (i, article) in articles.iter().enumerate() {
                assert_eq!(article.url, format!("https://example.com/article{}", i + 1));
                assert!(article.title.ends_with("news about Tesla"));
                assert!(article.text.starts_with(&format!("This is article {} about Tesla.", i + 1)));
                assert!(article.publish_date.starts_with("2023-"));
                assert!(!article.is_scored());

                let keywords = article.keyword_list().unwrap();
                assert_eq!(keywords.len(), 4);
                assert_eq!(keywords[0], "tesla");
                let distinct: HashSet<_> = keywords[1..].iter().collect();
                assert_eq!(distinct.len(), 3);
            }
        }
    }

    #[test]
    fn test_fixed_and_empty_fallbacks() {
        let batch = vec![Article::new("fixture", "https://example.com/fixture")];
        assert_eq!(FixedFallback::new(batch.clone()).placeholders("Acme"), batch);
        assert!(NoFallback.placeholders("Acme").is_empty());
    }
}
