//! Stopword filtering
//!
//! The set is built once at startup and handed to the word counter. It is never
//! mutated after construction.

use std::collections::HashSet;

/// Common English words ignored by frequency counting.
pub const ENGLISH_STOPWORDS: &[&str] = &[
    "a", "the", "and", "or", "but", "if", "then", "else", "when", "at", "by", "from", "of", "on",
    "for", "with", "about", "against", "between", "into", "through", "during", "before", "after",
    "above", "below", "to", "up", "down", "in", "out", "over", "under", "again", "further", "once",
    "here", "there", "where", "why", "how", "all", "any", "both", "each", "few", "more", "most",
    "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than", "too",
    "very", "s", "t", "can", "will", "just", "don", "should", "now", "th", "an", "it", "is",
    "that", "he", "i", "this", "as", "were", "those", "who", "was", "do", "you", "your", "re",
    "they", "her", "rd", "st", "u", "per", "we", "what", "c", "am", "m", "f", "she", "nd", "q",
    "our",
];

/// Immutable set of lowercase stopwords
#[derive(Debug, Clone, Default)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    /// The built-in English list
    pub fn english() -> Self {
        Self::from_words(ENGLISH_STOPWORDS.iter().copied())
    }

    /// Build a set from arbitrary words; they are lowercased on the way in
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words.into_iter().map(|w| w.as_ref().trim().to_lowercase()).collect(),
        }
    }

    /// Consume the set and return it with `extra` words added
    pub fn with_extra<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.words
            .extend(extra.into_iter().map(|w| w.as_ref().trim().to_lowercase()));
        self.words.remove("");
        self
    }

    /// Expects an already-lowercased token.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_list() {
        let set = StopwordSet::english();
        assert_eq!(set.len(), ENGLISH_STOPWORDS.len());
        assert!(set.contains("the"));
        assert!(set.contains("again"));
        assert!(!set.contains("hello"));
    }

    #[test]
    fn test_from_words_deduplicates() {
        let set = StopwordSet::from_words(["the", "The", "a", "the "]);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_extra_words_are_lowercased() {
        let set = StopwordSet::english().with_extra(["Lorem", " IPSUM ", ""]);
        assert!(set.contains("lorem"));
        assert!(set.contains("ipsum"));
        assert!(!set.contains(""));
    }
}
