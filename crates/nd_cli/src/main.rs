use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use nd_core::CompanyReport;
use nd_inference::speech::{create_synthesizer, SpeechConfig};
use nd_inference::SentimentScorer;
use nd_news::fetcher::DEFAULT_MAX_ARTICLES;
use nd_news::logging::init_logging;
use nd_news::{AnalysisPipeline, ArticleFetcher, FallbackKind, FetchConfig};
use nd_web::AppState;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Company news sentiment digest", long_about = None)]
pub struct Cli {
    /// NewsAPI key. Without it only placeholder articles are analyzed.
    #[arg(long, env = "NEWSAPI_KEY", hide_env_values = true, global = true)]
    news_api_key: Option<String>,
    #[arg(long, global = true)]
    news_url: Option<String>,
    #[arg(long, default_value = "lexicon", global = true, help = "Sentiment model to use. Available models: lexicon (default), hosted")]
    model: String,
    #[arg(long, global = true)]
    model_url: Option<String>,
    #[arg(long, env = "HF_TOKEN", hide_env_values = true, global = true)]
    model_token: Option<String>,
    /// What to analyze when the news source returns nothing
    #[arg(long, value_enum, default_value_t = FallbackArg::Synthetic, global = true)]
    fallback: FallbackArg,
    /// Seed for reproducible placeholder articles
    #[arg(long, global = true)]
    seed: Option<u64>,
    #[arg(long, global = true)]
    no_audio: bool,
    #[arg(long, global = true)]
    audio_dir: Option<PathBuf>,
    #[arg(long, default_value = "info", global = true)]
    log_level: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum FallbackArg {
    Synthetic,
    #[value(name = "none")]
    Disabled,
}

impl From<FallbackArg> for FallbackKind {
    fn from(arg: FallbackArg) -> Self {
        match arg {
            FallbackArg::Synthetic => FallbackKind::Synthetic,
            FallbackArg::Disabled => FallbackKind::Disabled,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze recent news coverage of a company
    Analyze {
        company: String,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Serve the analysis over HTTP
    Serve {
        #[arg(long, default_value = "127.0.0.1")]
        host: IpAddr,
        #[arg(long, default_value_t = 8000)]
        port: u16,
    },
}

fn build_pipeline(cli: &Cli) -> nd_core::Result<AnalysisPipeline> {
    let model = nd_inference::create_model(Some(nd_inference::Config {
        api_key: cli.model_token.clone(),
        model_name: Some(cli.model.clone()),
        model_url: cli.model_url.clone(),
    }))?;

    let fetcher = ArticleFetcher::from_config(&FetchConfig {
        api_key: cli.news_api_key.clone(),
        base_url: cli.news_url.clone(),
        max_articles: DEFAULT_MAX_ARTICLES,
        fallback: cli.fallback.into(),
        seed: cli.seed,
    })?;
    match fetcher.source_name() {
        Some(name) => info!("🗞️ News source: {}", name),
        None => info!("🗞️ No NEWSAPI_KEY set, using placeholder articles"),
    }

    let synthesizer = create_synthesizer(&SpeechConfig {
        enabled: !cli.no_audio,
        base_url: None,
        output_dir: cli.audio_dir.clone(),
    })?;
    info!("🔊 Speech: {}", synthesizer.name());

    Ok(AnalysisPipeline::new(fetcher, SentimentScorer::new(model), synthesizer))
}

/// Terminal rendering of a report.
struct ReportView<'a>(&'a CompanyReport);

impl fmt::Display for ReportView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        let analysis = &report.comparative_analysis;

        writeln!(
            f,
            "📰 News analysis for {} ({} articles)\n",
            report.company_name, analysis.total_articles
        )?;
        for article in &report.articles {
            let label = article.sentiment.as_ref().map(|l| l.as_str()).unwrap_or("-");
            let score = article.sentiment_score.unwrap_or_default();
            writeln!(f, "  {:<8} {:.2}  {}", label, score, article.title)?;
            if !article.url.is_empty() {
                writeln!(f, "                 {}", article.url)?;
            }
        }

        writeln!(f, "\nSentiment distribution:")?;
        for (label, count) in analysis.sentiment_distribution.iter() {
            writeln!(f, "  {:<8} {}", label, count)?;
        }
        writeln!(f, "Average sentiment: {:.2}", analysis.average_sentiment)?;

        let keywords = analysis
            .top_keywords
            .iter()
            .map(|(keyword, count)| format!("{} ({})", keyword, count))
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(f, "Top keywords: {}", if keywords.is_empty() { "-" } else { keywords.as_str() })?;

        writeln!(f, "\n{}", report.summary_text)?;
        match &report.audio_path {
            Some(path) => writeln!(f, "🔊 Audio: {}", path.display()),
            None => writeln!(f, "🔇 Audio: not generated"),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let pipeline = build_pipeline(&cli)?;

    match cli.command {
        Commands::Analyze { company, json } => {
            let report = pipeline.process_company(&company).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", ReportView(&report));
            }
        }
        Commands::Serve { host, port } => {
            nd_web::serve(AppState::new(pipeline), SocketAddr::new(host, port)).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nd_core::{Article, ComparativeAnalysis, SentimentLabel};
    use nd_inference::ComparativeAnalyzer;

    #[test]
    fn test_parse_analyze() {
        let cli = Cli::try_parse_from(["nd", "analyze", "Tesla", "--json", "--seed", "7", "--no-audio"]).unwrap();
        assert_eq!(cli.seed, Some(7));
        assert!(cli.no_audio);
        assert_eq!(cli.model, "lexicon");
        assert_eq!(cli.fallback, FallbackArg::Synthetic);
        match cli.command {
            Commands::Analyze { company, json } => {
                assert_eq!(company, "Tesla");
                assert!(json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_serve() {
        let cli = Cli::try_parse_from(["nd", "--fallback", "none", "serve", "--port", "9000"]).unwrap();
        assert_eq!(cli.fallback, FallbackArg::Disabled);
        match cli.command {
            Commands::Serve { host, port } => {
                assert_eq!(host.to_string(), "127.0.0.1");
                assert_eq!(port, 9000);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_build_pipeline_rejects_unknown_model() {
        let cli = Cli::try_parse_from(["nd", "--model", "gpt", "--no-audio", "analyze", "Acme"]).unwrap();
        assert!(build_pipeline(&cli).is_err());
    }

    #[test]
    fn test_render_report() {
        let articles = vec![
            Article::new("Apple soars", "https://example.com/a")
                .with_keywords(["apple", "iphone", "apple"])
                .with_sentiment(SentimentLabel::Positive, 0.9),
        ];
        let report = CompanyReport {
            company_name: "Apple".to_string(),
            comparative_analysis: ComparativeAnalyzer::new().analyze(&articles),
            articles,
            summary_text: "summary".to_string(),
            audio_path: None,
            generated_at: chrono_now(),
        };

        let text = ReportView(&report).to_string();
        assert!(text.contains("News analysis for Apple (1 articles)"));
        assert!(text.contains("POSITIVE 0.90  Apple soars"));
        assert!(text.contains("Top keywords: apple (2), iphone (1)"));
        assert!(text.contains("Average sentiment: 0.90"));
        assert!(text.contains("Audio: not generated"));
    }

    #[test]
    fn test_render_empty_report() {
        let report = CompanyReport {
            company_name: "Nobody".to_string(),
            articles: Vec::new(),
            comparative_analysis: ComparativeAnalysis::empty(),
            summary_text: String::new(),
            audio_path: Some(PathBuf::from("/tmp/summary.mp3")),
            generated_at: chrono_now(),
        };
        let text = ReportView(&report).to_string();
        assert!(text.contains("Top keywords: -"));
        assert!(text.contains("Average sentiment: 0.50"));
        assert!(text.contains("/tmp/summary.mp3"));
    }

    fn chrono_now() -> chrono::DateTime<chrono::Utc> {
        chrono::Utc::now()
    }
}
