//! Word frequency extraction
//!
//! Text is cleaned in a fixed order before tokenizing:
//! 1. decimal numbers are removed (`42`, `3.14`)
//! 2. emoji in the face, pictograph, transport and flag blocks are removed
//! 3. the remainder is lowercased and split into `\w+` runs
//! 4. stopwords are dropped and the survivors counted

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;

use crate::stopwords::StopwordSet;

/// Word -> occurrence count for one entry. Iteration order is unspecified.
pub type WordFrequencies = HashMap<String, u32>;

const NUMBER_PATTERN: &str = r"\d+(?:\.\d+)?";
const EMOJI_PATTERN: &str =
    r"[\x{1F600}-\x{1F64F}\x{1F300}-\x{1F5FF}\x{1F680}-\x{1F6FF}\x{1F1E0}-\x{1F1FF}]";
const WORD_PATTERN: &str = r"\b\w+\b";

fn number_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(NUMBER_PATTERN).expect("number pattern is valid"))
}

fn emoji_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(EMOJI_PATTERN).expect("emoji pattern is valid"))
}

fn word_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(WORD_PATTERN).expect("word pattern is valid"))
}

/// Turns free text into word counts
pub trait WordCounter {
    fn count_words(&self, text: &str) -> WordFrequencies;
}

/// Regex-based counter backed by an explicit stopword set
#[derive(Debug, Clone)]
pub struct RegexWordCounter {
    stopwords: StopwordSet,
}

impl RegexWordCounter {
    pub fn new(stopwords: StopwordSet) -> Self {
        Self { stopwords }
    }

    pub fn stopwords(&self) -> &StopwordSet {
        &self.stopwords
    }
}

impl Default for RegexWordCounter {
    fn default() -> Self {
        Self::new(StopwordSet::english())
    }
}

impl WordCounter for RegexWordCounter {
    fn count_words(&self, text: &str) -> WordFrequencies {
        let without_numbers = number_regex().replace_all(text, "");
        let without_emoji = emoji_regex().replace_all(&without_numbers, "");
        let lowered = without_emoji.to_lowercase();

        let mut counts = WordFrequencies::new();
        for token in word_regex().find_iter(&lowered).map(|m| m.as_str()) {
            if self.stopwords.contains(token) {
                continue;
            }
            *counts.entry(token.to_string()).or_insert(0) += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter() -> RegexWordCounter {
        RegexWordCounter::default()
    }

    fn freq(pairs: &[(&str, u32)]) -> WordFrequencies {
        pairs.iter().map(|(w, c)| (w.to_string(), *c)).collect()
    }

    #[test]
    fn test_basic_sentence() {
        let result = counter().count_words("Hello world! This is a test text. Hello again.");
        assert_eq!(
            result,
            freq(&[("hello", 2), ("world", 1), ("test", 1), ("text", 1)])
        );
    }

    #[test]
    fn test_case_insensitive() {
        let result = counter().count_words("Hello hello HELLO");
        assert_eq!(result, freq(&[("hello", 3)]));
    }

    #[test]
    fn test_numbers_removed() {
        let result = counter().count_words("pi is 3.14 and the answer is 42, version2");
        assert_eq!(result, freq(&[("pi", 1), ("answer", 1), ("version", 1)]));
        assert!(result.keys().all(|k| !k.chars().all(|c| c.is_ascii_digit())));
    }

    #[test]
    fn test_emoji_removed() {
        let result = counter().count_words("great 😀 trip 🚀 flag 🇫🇷 party🎉");
        assert_eq!(
            result,
            freq(&[("great", 1), ("trip", 1), ("flag", 1), ("party", 1)])
        );
    }

    #[test]
    fn test_stopwords_never_counted() {
        let c = counter();
        let text = "The cat and the dog were out in the rain, but she was not there.";
        let result = c.count_words(text);
        assert!(result.keys().all(|k| !c.stopwords().contains(k)));
        assert_eq!(result.get("cat"), Some(&1));
        assert_eq!(result.get("rain"), Some(&1));
    }

    #[test]
    fn test_custom_stopwords() {
        let c = RegexWordCounter::new(StopwordSet::from_words(["hello"]));
        let result = c.count_words("hello the world");
        assert_eq!(result, freq(&[("the", 1), ("world", 1)]));
    }

    #[test]
    fn test_empty_and_punctuation_only() {
        assert!(counter().count_words("").is_empty());
        assert!(counter().count_words("  ... !!! 123 4.5 ").is_empty());
    }

    #[test]
    fn test_underscore_and_unicode_words() {
        let result = counter().count_words("snake_case café Café");
        assert_eq!(result, freq(&[("snake_case", 1), ("café", 2)]));
    }
}
