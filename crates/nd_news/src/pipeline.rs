use std::sync::Arc;

use chrono::Utc;
use nd_core::{CompanyReport, Error, Result, SpeechSynthesizer};
use nd_inference::narration::{narrate, NARRATION_LANGUAGE};
use nd_inference::{ComparativeAnalyzer, SentimentScorer};

use crate::fetcher::ArticleFetcher;
use crate::logging::Logger;

/// Fetch → score → analyze → narrate → synthesize, one company at a time.
pub struct AnalysisPipeline {
    fetcher: ArticleFetcher,
    scorer: SentimentScorer,
    analyzer: ComparativeAnalyzer,
    synthesizer: Arc<dyn SpeechSynthesizer>,
}

impl AnalysisPipeline {
    pub fn new(fetcher: ArticleFetcher, scorer: SentimentScorer, synthesizer: Arc<dyn SpeechSynthesizer>) -> Self {
        Self {
            fetcher,
            scorer,
            analyzer: ComparativeAnalyzer::new(),
            synthesizer,
        }
    }

    pub async fn process_company(&self, company_name: &str) -> Result<CompanyReport> {
        let company = company_name.trim();
        if company.is_empty() {
            return Err(Error::InvalidInput("Company name must not be empty".to_string()));
        }
        let logger = Logger::new().with_prefix(format!("[{}]", company));

        logger.info("📰 Fetching articles");
        let mut articles = match self.fetcher.fetch(company).await {
            Ok(articles) => articles,
            Err(e) => {
                logger.error(&format!("❌ {}", e));
                return Err(e);
            }
        };

        logger.info(&format!(
            "🤖 Scoring {} articles with {}",
            articles.len(),
            self.scorer.model_name()
        ));
        self.scorer.score_articles(&mut articles).await;

        let analysis = self.analyzer.analyze(&articles);
        logger.info(&format!(
            "📊 {} positive, {} negative, {} neutral, average {:.2}",
            analysis.sentiment_distribution.positive(),
            analysis.sentiment_distribution.negative(),
            analysis.sentiment_distribution.neutral(),
            analysis.average_sentiment
        ));

        let summary_text = narrate(company, analysis.total_articles, &analysis.sentiment_distribution);
        let audio_path = match self.synthesizer.synthesize(&summary_text, NARRATION_LANGUAGE).await {
            Ok(path) => Some(path),
            Err(e) => {
                logger.warn(&format!("⚠️ No audio from {}: {}", self.synthesizer.name(), e));
                None
            }
        };

        logger.info("✅ Analysis complete");
        Ok(CompanyReport {
            company_name: company.to_string(),
            articles,
            comparative_analysis: analysis,
            summary_text,
            audio_path,
            generated_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback::{FixedFallback, NoFallback};
    use async_trait::async_trait;
    use nd_core::Article;
    use nd_inference::models::LexiconModel;
    use nd_inference::speech::DisabledSynthesizer;
    use std::path::PathBuf;
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    struct RecordingSynthesizer {
        calls: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl SpeechSynthesizer for RecordingSynthesizer {
        fn name(&self) -> &str {
            "recording"
        }

        async fn synthesize(&self, text: &str, lang: &str) -> Result<PathBuf> {
            self.calls.lock().unwrap().push((text.to_string(), lang.to_string()));
            Ok(PathBuf::from("/tmp/summary.mp3"))
        }
    }

    fn fixtures() -> Vec<Article> {
        vec![
            Article::new("Acme beats estimates", "https://example.com/1")
                .with_text("Acme posted record profit and strong growth.")
                .with_keywords(["Acme", "profit"]),
            Article::new("Acme faces lawsuit", "https://example.com/2")
                .with_text("A lawsuit and weak sales weigh on Acme.")
                .with_keywords(["Acme", "lawsuit"]),
            Article::new("Acme annual meeting", "https://example.com/3")
                .with_text("")
                .with_keywords(["Acme"]),
        ]
    }

    fn pipeline(fallback: Arc<dyn nd_core::FallbackProvider>, synth: Arc<dyn SpeechSynthesizer>) -> AnalysisPipeline {
        AnalysisPipeline::new(
            ArticleFetcher::new(None, fallback),
            SentimentScorer::new(Arc::new(LexiconModel::new())),
            synth,
        )
    }

    #[tokio::test]
    async fn test_process_company() {
        let synth = Arc::new(RecordingSynthesizer::default());
        let pipeline = pipeline(Arc::new(FixedFallback::new(fixtures())), synth.clone());

        let report = pipeline.process_company("  Acme ").await.unwrap();
        assert_eq!(report.company_name, "Acme");
        assert!(report.articles.iter().all(Article::is_scored));

        let analysis = &report.comparative_analysis;
        assert_eq!(analysis.total_articles, 3);
        assert_eq!(analysis.sentiment_distribution.positive(), 1);
        assert_eq!(analysis.sentiment_distribution.negative(), 1);
        assert_eq!(analysis.sentiment_distribution.neutral(), 1);
        assert_eq!(analysis.top_keywords.iter().next(), Some(("Acme", 3)));

        assert_eq!(report.audio_path, Some(PathBuf::from("/tmp/summary.mp3")));
        let calls = synth.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, report.summary_text);
        assert_eq!(calls[0].1, "hi");
        assert!(report.summary_text.starts_with("Acme के बारे में 3 समाचार"));
    }

    #[tokio::test]
    async fn test_synthesis_failure_is_not_fatal() {
        let pipeline = pipeline(Arc::new(FixedFallback::new(fixtures())), Arc::new(DisabledSynthesizer));
        let report = pipeline.process_company("Acme").await.unwrap();
        assert!(report.audio_path.is_none());
    }

    #[tokio::test]
    async fn test_blank_company_rejected() {
        let pipeline = pipeline(Arc::new(FixedFallback::new(fixtures())), Arc::new(DisabledSynthesizer));
        let err = pipeline.process_company("   ").await.unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_no_articles_anywhere() {
        let pipeline = pipeline(Arc::new(NoFallback), Arc::new(DisabledSynthesizer));
        let err = pipeline.process_company("Acme").await.unwrap_err();
        assert!(matches!(err, Error::UpstreamUnavailable(_)));
    }
}
