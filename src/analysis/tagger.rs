use crate::analysis::tokenizer::tokenize;
use crate::models::{Theme, ThemeSet};
use crate::taxonomy::{ThemeTable, THEME_KEYWORDS};

/// Assigns themes by substring keyword matching over tokens.
#[derive(Debug, Clone, Copy)]
pub struct ThemeTagger {
    table: &'static ThemeTable,
}

impl ThemeTagger {
    pub fn new() -> Self {
        Self::with_table(THEME_KEYWORDS)
    }

    pub fn with_table(table: &'static ThemeTable) -> Self {
        Self { table }
    }

    /// Never returns an empty set: falls back to `general`.
    pub fn tag(&self, text: &str) -> ThemeSet {
        self.tag_tokens(&tokenize(text))
    }

    pub fn tag_tokens(&self, tokens: &[String]) -> ThemeSet {
        let mut tags: ThemeSet = self
            .table
            .iter()
            .filter(|(_, keywords)| {
                keywords
                    .iter()
                    .any(|kw| tokens.iter().any(|t| t.contains(kw)))
            })
            .map(|(theme, _)| *theme)
            .collect();

        if tags.is_empty() {
            tags.insert(Theme::General);
        }
        tags
    }
}

impl Default for ThemeTagger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn themes(list: &[Theme]) -> ThemeSet {
        list.iter().copied().collect()
    }

    #[test]
    fn test_empty_text_is_general() {
        assert_eq!(ThemeTagger::new().tag(""), themes(&[Theme::General]));
    }

    #[test]
    fn test_unmatched_text_is_general() {
        assert_eq!(
            ThemeTagger::new().tag("The park benches need paint"),
            themes(&[Theme::General])
        );
    }

    #[test]
    fn test_multiple_themes() {
        assert_eq!(
            ThemeTagger::new().tag("Police ignored the broken street lighting near the school"),
            themes(&[Theme::Infrastructure, Theme::Safety, Theme::Education])
        );
    }

    #[test]
    fn test_substring_match_inside_tokens() {
        let tagger = ThemeTagger::new();
        // "powerless" contains "power", "reshipped" contains "ship"
        assert_eq!(tagger.tag("powerless"), themes(&[Theme::Infrastructure]));
        assert_eq!(tagger.tag("reshipped twice"), themes(&[Theme::Delivery]));
        assert!(tagger.tag("Waiting on my reimbursement").contains(&Theme::Refunds));
    }

    #[test]
    fn test_general_never_mixed_with_keyword_themes() {
        let tags = ThemeTagger::new().tag("Refund for the delayed shipment");
        assert_eq!(tags, themes(&[Theme::Refunds, Theme::Delivery]));
        assert!(!tags.contains(&Theme::General));
    }

    #[test]
    fn test_custom_table() {
        static TABLE: &ThemeTable = &[(Theme::Safety, &["flood"])];
        let tagger = ThemeTagger::with_table(TABLE);
        assert_eq!(tagger.tag("Flooding downtown"), themes(&[Theme::Safety]));
        assert_eq!(tagger.tag("police"), themes(&[Theme::General]));
    }
}
