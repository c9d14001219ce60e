use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use nd_core::{Article, Error, NewsSource, Result};
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use super::utils::title_keywords;

pub const DEFAULT_NEWSAPI_URL: &str = "https://newsapi.org";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EverythingResponse {
    status: String,
    #[serde(default)]
    total_results: u64,
    #[serde(default)]
    articles: Vec<NewsApiArticle>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewsApiArticle {
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    content: Option<String>,
    published_at: Option<String>,
}

impl NewsApiArticle {
    fn into_article(self, company: &str) -> Article {
        let title = self.title.unwrap_or_else(|| "Untitled".to_string());
        let keywords = title_keywords(company, &title);
        Article::new(title, self.url.unwrap_or_default())
            .with_summary(self.description.unwrap_or_else(|| "No summary available".to_string()))
            .with_text(self.content.unwrap_or_else(|| "No content available".to_string()))
            .with_keywords(keywords)
            .with_publish_date(self.published_at.unwrap_or_else(|| "Unknown date".to_string()))
    }
}

/// NewsAPI `everything` search.
pub struct NewsApiSource {
    client: Client,
    api_key: String,
    endpoint: Url,
}

impl NewsApiSource {
    pub fn new(base_url: &str, api_key: String) -> Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;
        Ok(Self {
            client,
            api_key,
            endpoint: Url::parse(base_url)?.join("v2/everything")?,
        })
    }
}

impl fmt::Debug for NewsApiSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewsApiSource")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("endpoint", &self.endpoint.as_str())
            .finish()
    }
}

fn into_articles(response: EverythingResponse, company: &str, limit: usize) -> Result<Vec<Article>> {
    if response.status == "error" {
        return Err(Error::UpstreamUnavailable(
            response.message.unwrap_or_else(|| "NewsAPI reported an error".to_string()),
        ));
    }
    if response.status != "ok" || response.total_results == 0 {
        return Ok(Vec::new());
    }

    Ok(response
        .articles
        .into_iter()
        .take(limit)
        .map(|item| item.into_article(company))
        .collect())
}

#[async_trait]
impl NewsSource for NewsApiSource {
    fn name(&self) -> &str {
        "NewsAPI"
    }

    async fn fetch_articles(&self, company: &str, limit: usize) -> Result<Vec<Article>> {
        let page_size = limit.to_string();
        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[
                ("q", company),
                ("apiKey", self.api_key.as_str()),
                ("language", "en"),
                ("pageSize", page_size.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = match response.json::<EverythingResponse>().await {
            Ok(body) => body,
            Err(_) if !status.is_success() => {
                return Err(Error::UpstreamUnavailable(format!("NewsAPI returned status {}", status)))
            }
            Err(e) => return Err(e.into()),
        };

        if !status.is_success() && body.status != "error" {
            return Err(Error::UpstreamUnavailable(format!("NewsAPI returned status {}", status)));
        }
        tracing::debug!("NewsAPI reports {} results for '{}'", body.total_results, company);
        into_articles(body, company, limit)
    }
}
