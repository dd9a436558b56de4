pub mod tokenizer;
pub mod sentiment;
pub mod tagger;
pub mod analyzer;
pub mod insights;
pub mod pipeline;

pub use tokenizer::tokenize;
pub use sentiment::SentimentScorer;
pub use tagger::ThemeTagger;
pub use analyzer::FeedbackAnalyzer;
pub use insights::InsightAggregator;
pub use pipeline::{FeedbackPipeline, ImportReport, RejectedSubmission};

/// Round to three decimal places.
pub(crate) fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
