use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::theme::{Theme, ThemeSet};

pub const DEFAULT_CATEGORY: &str = "uncategorized";

/// Raw feedback as sent by a citizen.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedbackSubmission {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub contact: Option<String>,
}

impl FeedbackSubmission {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            category: None,
            contact: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_contact(mut self, contact: impl Into<String>) -> Self {
        self.contact = Some(contact.into());
        self
    }

    /// Trims every field and fills in the default category.
    pub fn normalized(&self) -> Self {
        let category = self
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_CATEGORY);

        Self {
            title: self.title.trim().to_string(),
            body: self.body.trim().to_string(),
            category: Some(category.to_string()),
            contact: Some(self.contact.as_deref().unwrap_or("").trim().to_string()),
        }
    }
}

/// Result of running one submission through the analyzer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub sentiment: f64,
    pub tags: ThemeSet,
}

/// A record ready for the store; the store assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFeedback {
    pub title: String,
    pub body: String,
    pub category: String,
    pub contact: String,
    pub tags: ThemeSet,
    pub sentiment: f64,
    pub created_at: DateTime<Utc>,
}

impl NewFeedback {
    pub fn from_analysis(
        submission: &FeedbackSubmission,
        analysis: Analysis,
        created_at: DateTime<Utc>,
    ) -> Self {
        let normalized = submission.normalized();
        Self {
            title: normalized.title,
            body: normalized.body,
            category: normalized.category.unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            contact: normalized.contact.unwrap_or_default(),
            tags: analysis.tags,
            sentiment: analysis.sentiment,
            created_at,
        }
    }

    pub fn with_id(self, id: i64) -> FeedbackRecord {
        FeedbackRecord {
            id,
            title: self.title,
            body: self.body,
            category: self.category,
            contact: self.contact,
            tags: self.tags,
            sentiment: self.sentiment,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub category: String,
    pub contact: String,
    pub tags: ThemeSet,
    pub sentiment: f64,
    pub created_at: DateTime<Utc>,
}

impl FeedbackRecord {
    /// Tags used for aggregation; an empty set counts as `general`.
    pub fn effective_tags(&self) -> ThemeSet {
        if self.tags.is_empty() {
            ThemeSet::from([Theme::General])
        } else {
            self.tags.clone()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub id: i64,
    pub sentiment: f64,
    pub tags: ThemeSet,
}

impl From<&FeedbackRecord> for SubmissionReceipt {
    fn from(record: &FeedbackRecord) -> Self {
        Self {
            id: record.id,
            sentiment: record.sentiment,
            tags: record.tags.clone(),
        }
    }
}

/// Filters applied to a store snapshot when listing feedback.
#[derive(Debug, Clone)]
pub struct FeedbackFilter {
    pub tag: Option<Theme>,
    pub min_sentiment: f64,
}

impl Default for FeedbackFilter {
    fn default() -> Self {
        Self {
            tag: None,
            min_sentiment: -1.0,
        }
    }
}

impl FeedbackFilter {
    pub fn matches(&self, record: &FeedbackRecord) -> bool {
        if let Some(tag) = self.tag {
            if !record.tags.contains(&tag) {
                return false;
            }
        }
        record.sentiment >= self.min_sentiment
    }

    pub fn apply(&self, records: Vec<FeedbackRecord>) -> Vec<FeedbackRecord> {
        records.into_iter().filter(|r| self.matches(r)).collect()
    }
}
