use crate::analysis::sentiment::SentimentScorer;
use crate::analysis::tagger::ThemeTagger;
use crate::analysis::tokenizer::tokenize;
use crate::error::{Error, Result};
use crate::models::Analysis;

/// Runs the scorer and tagger over one piece of feedback.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeedbackAnalyzer {
    scorer: SentimentScorer,
    tagger: ThemeTagger,
}

impl FeedbackAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Analyze `title + " " + body`.
    ///
    /// Fails with [`Error::Validation`] when both parts are blank.
    pub fn analyze(&self, title: &str, body: &str) -> Result<Analysis> {
        if title.trim().is_empty() && body.trim().is_empty() {
            return Err(Error::Validation("title or body required".to_string()));
        }

        let text = format!("{} {}", title, body);
        let tokens = tokenize(&text);

        Ok(Analysis {
            sentiment: self.scorer.score_tokens(&tokens),
            tags: self.tagger.tag_tokens(&tokens),
        })
    }
}
