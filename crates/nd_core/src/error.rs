use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Missing field: {0}")]
    MissingField(&'static str),

    #[error("Malformed field {field}: found {found}")]
    MalformedField { field: &'static str, found: String },

    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Aggregation fault: {0}")]
    AggregationFault(String),

    #[error("Classification error: {0}")]
    Classification(String),

    #[error("Speech synthesis error: {0}")]
    Synthesis(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = Error::MalformedField { field: "keywords", found: "string".to_string() };
        assert_eq!(err.to_string(), "Malformed field keywords: found string");
        assert_eq!(Error::MissingField("sentiment").to_string(), "Missing field: sentiment");
    }
}
