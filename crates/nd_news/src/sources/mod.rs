pub mod newsapi;

pub use newsapi::NewsApiSource;

/// Common utilities for news sources
pub(crate) mod utils {
    /// Keywords for an article: the company name, then the first five words
    /// of the lower-cased title.
    pub fn title_keywords(company: &str, title: &str) -> Vec<String> {
        std::iter::once(company.to_string())
            .chain(title.to_lowercase().split_whitespace().take(5).map(str::to_string))
            .collect()
    }
}
