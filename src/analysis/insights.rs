use std::collections::HashMap;

use crate::analysis::round3;
use crate::models::{
    CategoryCounts, FeedbackRecord, InsightSummary, Recommendation, SummaryReport, Theme,
    ThemeInsight,
};

pub const TOP_THEMES_LIMIT: usize = 6;
pub const NEGATIVE_SENTIMENT_THRESHOLD: f64 = -0.2;

/// Sentiments collected for one theme, in first-seen order across records.
#[derive(Debug, Clone)]
struct ThemeGroup {
    theme: Theme,
    sentiments: Vec<f64>,
}

impl ThemeGroup {
    fn count(&self) -> usize {
        self.sentiments.len()
    }

    fn average(&self) -> f64 {
        self.sentiments.iter().sum::<f64>() / self.sentiments.len().max(1) as f64
    }
}

/// Aggregates stored feedback into summary statistics and recommendations.
pub struct InsightAggregator {
    top_themes_limit: usize,
    negative_threshold: f64,
}

impl InsightAggregator {
    pub fn new() -> Self {
        Self {
            top_themes_limit: TOP_THEMES_LIMIT,
            negative_threshold: NEGATIVE_SENTIMENT_THRESHOLD,
        }
    }

    pub fn summarize(&self, records: &[FeedbackRecord]) -> SummaryReport {
        if records.is_empty() {
            return SummaryReport::no_data();
        }

        let mut groups = group_by_theme(records);
        // Stable sort keeps first-seen order between equal counts.
        groups.sort_by(|a, b| b.count().cmp(&a.count()));

        let top_themes = groups
            .iter()
            .take(self.top_themes_limit)
            .map(|group| ThemeInsight {
                theme: group.theme,
                count: group.count(),
                avg_sentiment: round3(group.average()),
            })
            .collect();

        let by_category = count_categories(records);

        SummaryReport::Summary(InsightSummary {
            total_feedback: by_category.iter().map(|(_, count)| count).sum(),
            by_category,
            top_themes,
        })
    }

    /// One recommendation per theme whose average sentiment is below the
    /// threshold, or a single note when no theme qualifies.
    pub fn recommend(&self, records: &[FeedbackRecord]) -> Vec<Recommendation> {
        let recommendations: Vec<_> = group_by_theme(records)
            .into_iter()
            .filter(|group| group.average() < self.negative_threshold)
            .map(|group| Recommendation::investigate(group.theme))
            .collect();

        if recommendations.is_empty() {
            vec![Recommendation::no_negative_themes()]
        } else {
            recommendations
        }
    }
}

impl Default for InsightAggregator {
    fn default() -> Self {
        Self::new()
    }
}

fn group_by_theme(records: &[FeedbackRecord]) -> Vec<ThemeGroup> {
    let mut groups: Vec<ThemeGroup> = Vec::new();
    let mut index: HashMap<Theme, usize> = HashMap::new();

    for record in records {
        for theme in record.effective_tags() {
            let slot = *index.entry(theme).or_insert_with(|| {
                groups.push(ThemeGroup {
                    theme,
                    sentiments: Vec::new(),
                });
                groups.len() - 1
            });
            groups[slot].sentiments.push(record.sentiment);
        }
    }

    groups
}

fn count_categories(records: &[FeedbackRecord]) -> CategoryCounts {
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for record in records {
        match index.get(record.category.as_str()) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                index.insert(record.category.as_str(), counts.len());
                counts.push((record.category.clone(), 1));
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    CategoryCounts(counts)
}
