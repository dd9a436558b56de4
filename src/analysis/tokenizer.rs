/// Splits text into lowercase word tokens.
///
/// A word is a run of Unicode alphanumeric characters or underscores; every
/// other character separates words and is dropped. Alphabetic combining marks
/// (Devanagari vowel signs and the like) count as word characters, so such
/// scripts stay whole words instead of splitting at each mark.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !is_word_char(c))
        .filter(|word| !word.is_empty())
        .map(|word| word.to_lowercase())
        .collect()
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
