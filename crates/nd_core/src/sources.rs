use async_trait::async_trait;

use crate::types::Article;
use crate::Result;

#[async_trait]
pub trait NewsSource: Send + Sync {
    fn name(&self) -> &str;

    /// Fetch at most `limit` articles mentioning `company`
    async fn fetch_articles(&self, company: &str, limit: usize) -> Result<Vec<Article>>;
}

/// Supplies placeholder articles when the news source has nothing.
pub trait FallbackProvider: Send + Sync {
    fn name(&self) -> &str;

    fn placeholders(&self, company: &str) -> Vec<Article>;
}
