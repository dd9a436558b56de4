use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use super::theme::Theme;

pub const NO_DATA: &str = "no data";
pub const NO_NEGATIVE_THEMES_NOTE: &str = "No strongly negative themes detected. Monitor trends.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeInsight {
    pub theme: Theme,
    pub count: usize,
    pub avg_sentiment: f64,
}

/// Per-category counts, kept in descending count order.
///
/// Serialized as a JSON object whose keys follow that order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryCounts(pub Vec<(String, usize)>);

impl CategoryCounts {
    pub fn get(&self, category: &str) -> Option<usize> {
        self.0
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, count)| *count)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(String, usize)> {
        self.0.iter()
    }
}

impl Serialize for CategoryCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (category, count) in &self.0 {
            map.serialize_entry(category, count)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightSummary {
    pub total_feedback: usize,
    pub by_category: CategoryCounts,
    pub top_themes: Vec<ThemeInsight>,
}

/// Outcome of summarizing a batch of records.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SummaryReport {
    NoData { summary: &'static str },
    Summary(InsightSummary),
}

impl SummaryReport {
    pub fn no_data() -> Self {
        SummaryReport::NoData { summary: NO_DATA }
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, SummaryReport::NoData { .. })
    }

    pub fn as_summary(&self) -> Option<&InsightSummary> {
        match self {
            SummaryReport::Summary(summary) => Some(summary),
            SummaryReport::NoData { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Issue {
    NegativeSentiment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Recommendation {
    Action {
        theme: Theme,
        issue: Issue,
        suggestion: String,
    },
    Note {
        note: String,
    },
}

impl Recommendation {
    pub fn investigate(theme: Theme) -> Self {
        Recommendation::Action {
            theme,
            issue: Issue::NegativeSentiment,
            suggestion: format!(
                "Investigate {} complaints; prioritize root-cause analysis and targeted communication.",
                theme
            ),
        }
    }

    pub fn no_negative_themes() -> Self {
        Recommendation::Note {
            note: NO_NEGATIVE_THEMES_NOTE.to_string(),
        }
    }

    pub fn theme(&self) -> Option<Theme> {
        match self {
            Recommendation::Action { theme, .. } => Some(*theme),
            Recommendation::Note { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_counts_keep_order_in_json() {
        let counts = CategoryCounts(vec![
            ("roads".to_string(), 5),
            ("logistics".to_string(), 3),
            ("agriculture".to_string(), 1),
        ]);
        let json = serde_json::to_string(&counts).unwrap();
        assert_eq!(json, r#"{"roads":5,"logistics":3,"agriculture":1}"#);
        assert_eq!(counts.get("logistics"), Some(3));
        assert_eq!(counts.get("parks"), None);
    }

    #[test]
    fn test_no_data_report_shape() {
        let json = serde_json::to_value(SummaryReport::no_data()).unwrap();
        assert_eq!(json, serde_json::json!({"summary": "no data"}));
    }

    #[test]
    fn test_recommendation_shapes() {
        let json = serde_json::to_value(Recommendation::investigate(Theme::Delivery)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "theme": "delivery",
                "issue": "negative_sentiment",
                "suggestion": "Investigate delivery complaints; prioritize root-cause analysis and targeted communication."
            })
        );

        let json = serde_json::to_value(Recommendation::no_negative_themes()).unwrap();
        assert_eq!(json, serde_json::json!({"note": NO_NEGATIVE_THEMES_NOTE}));
    }
}
