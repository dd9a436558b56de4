use crate::analysis::round3;
use crate::analysis::tokenizer::tokenize;
use crate::taxonomy::{NEGATIVE_PREFIXES, POSITIVE_PREFIXES};

/// Rule-based sentiment scorer over prefix keyword lists.
#[derive(Debug, Clone, Copy)]
pub struct SentimentScorer {
    positive: &'static [&'static str],
    negative: &'static [&'static str],
}

impl SentimentScorer {
    pub fn new() -> Self {
        Self::with_lexicon(POSITIVE_PREFIXES, NEGATIVE_PREFIXES)
    }

    pub fn with_lexicon(
        positive: &'static [&'static str],
        negative: &'static [&'static str],
    ) -> Self {
        Self { positive, negative }
    }

    /// Score text in `[-1.0, 1.0]`, rounded to three decimals.
    pub fn score(&self, text: &str) -> f64 {
        self.score_tokens(&tokenize(text))
    }

    pub fn score_tokens(&self, tokens: &[String]) -> f64 {
        if tokens.is_empty() {
            return 0.0;
        }

        // A token may count on both sides; the lists are checked independently.
        let pos = tokens
            .iter()
            .filter(|t| starts_with_any(t, self.positive))
            .count();
        let neg = tokens
            .iter()
            .filter(|t| starts_with_any(t, self.negative))
            .count();

        let raw = (pos as f64 - neg as f64) / (pos + neg).max(1) as f64;

        // Clamp before rounding.
        round3(raw.clamp(-1.0, 1.0))
    }
}

impl Default for SentimentScorer {
    fn default() -> Self {
        Self::new()
    }
}

fn starts_with_any(token: &str, prefixes: &[&str]) -> bool {
    prefixes.iter().any(|p| token.starts_with(p))
}
