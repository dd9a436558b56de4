use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;

use crate::error::Error;

/// Topical label assigned to a piece of feedback.
///
/// Declaration order is the iteration order of a [`ThemeSet`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Refunds,
    Delivery,
    Service,
    Infrastructure,
    Safety,
    Education,
    General,
}

pub type ThemeSet = BTreeSet<Theme>;

impl Theme {
    pub const ALL: [Theme; 7] = [
        Theme::Refunds,
        Theme::Delivery,
        Theme::Service,
        Theme::Infrastructure,
        Theme::Safety,
        Theme::Education,
        Theme::General,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Refunds => "refunds",
            Theme::Delivery => "delivery",
            Theme::Service => "service",
            Theme::Infrastructure => "infrastructure",
            Theme::Safety => "safety",
            Theme::Education => "education",
            Theme::General => "general",
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Theme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Theme::ALL
            .iter()
            .copied()
            .find(|theme| theme.as_str() == lower)
            .ok_or_else(|| Error::ParseError(format!("unknown theme: {}", s)))
    }
}
