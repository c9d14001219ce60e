use nd_core::SentimentDistribution;

/// Language tag of the narration, passed to the speech synthesizer.
pub const NARRATION_LANGUAGE: &str = "hi";

/// Renders the one-sentence Hindi digest of an analysis.
pub fn narrate(company_name: &str, total_articles: usize, distribution: &SentimentDistribution) -> String {
    format!(
        "{} के बारे में {} समाचार लेखों का विश्लेषण। कुल लेखों में से {} सकारात्मक, {} नकारात्मक, और {} तटस्थ हैं।",
        company_name,
        total_articles,
        distribution.positive(),
        distribution.negative(),
        distribution.neutral(),
    )
}
