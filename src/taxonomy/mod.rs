//! Fixed keyword tables used by the sentiment scorer and theme tagger.
//!
//! These tables are part of the scoring contract; changing an entry changes
//! the scores and tags of every stored record that gets re-analyzed.

use crate::models::Theme;

/// Token prefixes that count as positive sentiment.
pub const POSITIVE_PREFIXES: &[&str] = &[
    "good",
    "great",
    "excellent",
    "happy",
    "satisfied",
    "love",
    "like",
    "awesome",
    "fast",
    "helpful",
    "resolved",
    "thank",
];

/// Token prefixes that count as negative sentiment.
pub const NEGATIVE_PREFIXES: &[&str] = &[
    "bad",
    "poor",
    "terrible",
    "angry",
    "disappointed",
    "hate",
    "slow",
    "delay",
    "delayed",
    "not",
    "issue",
    "problem",
    "complaint",
    "refund",
    "frustrat",
];

pub type ThemeTable = [(Theme, &'static [&'static str])];

/// Substrings that mark a token as belonging to a theme.
///
/// `general` is absent on purpose: it is the fallback when nothing here matches.
pub const THEME_KEYWORDS: &ThemeTable = &[
    (Theme::Refunds, &["refund", "refunds", "reimbursement"]),
    (
        Theme::Delivery,
        &["delivery", "deliver", "shipping", "shipment", "ship", "delay", "delayed"],
    ),
    (
        Theme::Service,
        &["service", "support", "helpdesk", "customer service", "agent"],
    ),
    (
        Theme::Infrastructure,
        &["road", "water", "electric", "power", "sewage", "street", "lighting"],
    ),
    (Theme::Safety, &["safety", "crime", "police", "accident", "danger"]),
    (Theme::Education, &["school", "college", "education", "teacher", "exam"]),
];
