use std::sync::Arc;

use nd_core::{Article, Error, FallbackProvider, NewsSource, Result};

use crate::fallback::{NoFallback, SyntheticFallback};
use crate::logging::Logger;
use crate::sources::newsapi::{NewsApiSource, DEFAULT_NEWSAPI_URL};

pub const DEFAULT_MAX_ARTICLES: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackKind {
    #[default]
    Synthetic,
    Disabled,
}

#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// NewsAPI key. Without one only the fallback is used.
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub max_articles: usize,
    pub fallback: FallbackKind,
    /// Seed for the synthetic fallback.
    pub seed: Option<u64>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            max_articles: DEFAULT_MAX_ARTICLES,
            fallback: FallbackKind::default(),
            seed: None,
        }
    }
}

/// Produces a non-empty article batch for a company, or fails.
pub struct ArticleFetcher {
    source: Option<Arc<dyn NewsSource>>,
    fallback: Arc<dyn FallbackProvider>,
    max_articles: usize,
}

impl ArticleFetcher {
    pub fn new(source: Option<Arc<dyn NewsSource>>, fallback: Arc<dyn FallbackProvider>) -> Self {
        Self {
            source,
            fallback,
            max_articles: DEFAULT_MAX_ARTICLES,
        }
    }

    pub fn with_max_articles(mut self, max_articles: usize) -> Self {
        self.max_articles = max_articles;
        self
    }

    pub fn from_config(config: &FetchConfig) -> Result<Self> {
        if config.max_articles == 0 {
            return Err(Error::Config("max_articles must be at least 1".to_string()));
        }

        let source = match &config.api_key {
            Some(key) => {
                let base_url = config.base_url.as_deref().unwrap_or(DEFAULT_NEWSAPI_URL);
                Some(Arc::new(NewsApiSource::new(base_url, key.clone())?) as Arc<dyn NewsSource>)
            }
            None => None,
        };

        let fallback: Arc<dyn FallbackProvider> = match (config.fallback, config.seed) {
            (FallbackKind::Synthetic, Some(seed)) => Arc::new(SyntheticFallback::seeded(seed)),
            (FallbackKind::Synthetic, None) => Arc::new(SyntheticFallback::from_entropy()),
            (FallbackKind::Disabled, _) => Arc::new(NoFallback),
        };

        Ok(Self::new(source, fallback).with_max_articles(config.max_articles))
    }

    pub fn source_name(&self) -> Option<&str> {
        self.source.as_ref().map(|s| s.name())
    }

    pub async fn fetch(&self, company: &str) -> Result<Vec<Article>> {
        let logger = Logger::new().with_prefix(format!("[{}]", company));

        let mut articles = match &self.source {
            Some(source) => match source.fetch_articles(company, self.max_articles).await {
                Ok(articles) => articles,
                Err(e) => {
                    logger.warn(&format!("⚠️ {} failed: {}", source.name(), e));
                    Vec::new()
                }
            },
            None => {
                logger.debug("No news source configured");
                Vec::new()
            }
        };

        articles.truncate(self.max_articles);
        if articles.is_empty() {
            logger.info(&format!("🧪 No articles found, using {} placeholders", self.fallback.name()));
            articles = self.fallback.placeholders(company);
            articles.truncate(self.max_articles);
        }

        if articles.is_empty() {
            return Err(Error::UpstreamUnavailable(format!(
                "No articles available for '{}'",
                company
            )));
        }

        for article in &mut articles {
            article.sentiment = None;
            article.sentiment_score = None;
        }

        logger.info(&format!("🗞️ {} articles ready", articles.len()));
        Ok(articles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback::FixedFallback;
    use async_trait::async_trait;
    use nd_core::SentimentLabel;

    struct StaticSource(Vec<Article>);

    #[async_trait]
    impl NewsSource for StaticSource {
        fn name(&self) -> &str {
            "static"
        }

        async fn fetch_articles(&self, _company: &str, _limit: usize) -> Result<Vec<Article>> {
            Ok(self.0.clone())
        }
    }

    struct BrokenSource;

    #[async_trait]
    impl NewsSource for BrokenSource {
        fn name(&self) -> &str {
            "broken"
        }

        async fn fetch_articles(&self, _company: &str, _limit: usize) -> Result<Vec<Article>> {
            Err(Error::UpstreamUnavailable("connection refused".to_string()))
        }
    }

    fn fixture(n: usize) -> Vec<Article> {
        (0..n)
            .map(|i| Article::new(format!("fixture {}", i), format!("https://example.com/{}", i)).with_keywords(["acme"]))
            .collect()
    }

    #[tokio::test]
    async fn test_source_articles_are_used() {
        let fetcher = ArticleFetcher::new(
            Some(Arc::new(StaticSource(fixture(3)))),
            Arc::new(FixedFallback::new(fixture(1))),
        );
        let articles = fetcher.fetch("Acme").await.unwrap();
        assert_eq!(articles.len(), 3);
    }

    #[tokio::test]
    async fn test_source_failure_falls_back() {
        let fetcher = ArticleFetcher::new(Some(Arc::new(BrokenSource)), Arc::new(FixedFallback::new(fixture(2))));
        let articles = fetcher.fetch("Acme").await.unwrap();
        assert_eq!(articles, fixture(2));
    }

    #[tokio::test]
    async fn test_empty_source_falls_back() {
        let fetcher = ArticleFetcher::new(
            Some(Arc::new(StaticSource(Vec::new()))),
            Arc::new(SyntheticFallback::seeded(1)),
        );
        let articles = fetcher.fetch("Acme").await.unwrap();
        assert!(!articles.is_empty());
    }

    #[tokio::test]
    async fn test_total_failure_is_reported() {
        let fetcher = ArticleFetcher::new(Some(Arc::new(BrokenSource)), Arc::new(NoFallback));
        let err = fetcher.fetch("Acme").await.unwrap_err();
        assert!(matches!(err, Error::UpstreamUnavailable(_)));
    }

    #[tokio::test]
    async fn test_batch_is_capped_and_unscored() {
        let mut batch = fixture(15);
        batch[0] = batch[0].clone().with_sentiment(SentimentLabel::Positive, 0.9);
        let fetcher = ArticleFetcher::new(Some(Arc::new(StaticSource(batch))), Arc::new(NoFallback));

        let articles = fetcher.fetch("Acme").await.unwrap();
        assert_eq!(articles.len(), DEFAULT_MAX_ARTICLES);
        assert!(articles.iter().all(|a| a.sentiment.is_none() && a.sentiment_score.is_none()));
    }

    #[tokio::test]
    async fn test_zero_cap_never_yields_empty_batch() {
        let fetcher = ArticleFetcher::new(None, Arc::new(SyntheticFallback::seeded(1))).with_max_articles(0);
        let err = fetcher.fetch("Acme").await.unwrap_err();
        assert!(matches!(err, Error::UpstreamUnavailable(_)));

        let config = FetchConfig {
            max_articles: 0,
            ..Default::default()
        };
        assert!(matches!(ArticleFetcher::from_config(&config), Err(Error::Config(_))));
    }

    #[tokio::test]
    async fn test_fallback_batch_is_capped() {
        let fetcher = ArticleFetcher::new(None, Arc::new(FixedFallback::new(fixture(5)))).with_max_articles(2);
        let articles = fetcher.fetch("Acme").await.unwrap();
        assert_eq!(articles, fixture(2));
    }

    #[test]
    fn test_from_config() {
        let fetcher = ArticleFetcher::from_config(&FetchConfig::default()).unwrap();
        assert!(fetcher.source_name().is_none());

        let config = FetchConfig {
            api_key: Some("key".to_string()),
            seed: Some(3),
            ..Default::default()
        };
        let fetcher = ArticleFetcher::from_config(&config).unwrap();
        assert_eq!(fetcher.source_name(), Some("NewsAPI"));

        let config = FetchConfig {
            base_url: Some("not a url".to_string()),
            api_key: Some("key".to_string()),
            ..Default::default()
        };
        assert!(ArticleFetcher::from_config(&config).is_err());
    }
}
