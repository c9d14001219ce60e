use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use nd_core::{Classification, Error, Result, SentimentModel};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::Config;

pub const DEFAULT_MODEL_URL: &str =
    "https://api-inference.huggingface.co/models/distilbert-base-uncased-finetuned-sst-2-english";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Serialize)]
struct ClassifyRequest<'a> {
    inputs: &'a str,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ClassifyResponse {
    Nested(Vec<Vec<Classification>>),
    Flat(Vec<Classification>),
}

/// Text-classification model served over HTTP (HuggingFace inference API shape).
pub struct HostedModel {
    client: Client,
    api_key: Option<String>,
    url: Url,
}

impl HostedModel {
    pub fn new(url: &str, api_key: Option<String>) -> Result<Self> {
        Self::with_timeout(url, api_key, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(url: &str, api_key: Option<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key,
            url: Url::parse(url)?,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let url = config.model_url.as_deref().unwrap_or(DEFAULT_MODEL_URL);
        Self::new(url, config.api_key.clone())
    }
}

impl fmt::Debug for HostedModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostedModel")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("url", &self.url.as_str())
            .finish()
    }
}

/// Picks the highest-scoring label out of a classifier response body.
pub(crate) fn parse_response(body: Value) -> Result<Classification> {
    if let Some(message) = body.get("error").and_then(Value::as_str) {
        return Err(Error::Classification(message.to_string()));
    }

    let candidates = match serde_json::from_value::<ClassifyResponse>(body)? {
        ClassifyResponse::Nested(batches) => batches.into_iter().next().unwrap_or_default(),
        ClassifyResponse::Flat(candidates) => candidates,
    };

    candidates
        .into_iter()
        .max_by(|a, b| a.score.total_cmp(&b.score))
        .ok_or_else(|| Error::Classification("Classifier returned no labels".to_string()))
}

#[async_trait]
impl SentimentModel for HostedModel {
    fn name(&self) -> &str {
        "Hosted"
    }

    async fn classify(&self, text: &str) -> Result<Classification> {
        let mut request = self.client.post(self.url.clone()).json(&ClassifyRequest { inputs: text });
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.json::<Value>().await?;
        if !status.is_success() && body.get("error").is_none() {
            return Err(Error::Classification(format!("Classifier returned status {}", status)));
        }

        parse_response(body)
    }
}
