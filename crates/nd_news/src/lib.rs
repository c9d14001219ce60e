pub mod fallback;
pub mod fetcher;
pub mod logging;
pub mod pipeline;
pub mod sources;

pub use fallback::{FixedFallback, NoFallback, SyntheticFallback};
pub use fetcher::{ArticleFetcher, FallbackKind, FetchConfig};
pub use pipeline::AnalysisPipeline;

pub mod prelude {
    pub use super::pipeline::AnalysisPipeline;
    pub use super::fetcher::{ArticleFetcher, FetchConfig};
    pub use nd_core::{Article, CompanyReport, Error, Result};
}
