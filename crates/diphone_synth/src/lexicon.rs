//! Pronouncing dictionary

use std::collections::HashMap;

use crate::types::Pronunciation;

/// Mapping from lowercase word to its pronunciation variants
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    entries: HashMap<String, Vec<Pronunciation>>,
}

impl Lexicon {
    /// Create an empty lexicon
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a pronunciation variant for a word
    ///
    /// Variants keep their insertion order.
    pub fn insert(&mut self, word: &str, pronunciation: Pronunciation) {
        self.entries
            .entry(word.to_lowercase())
            .or_default()
            .push(pronunciation);
    }

    /// Add a word with its phonemes, builder style
    #[must_use]
    pub fn with_entry<I, S>(mut self, word: &str, phones: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(word, Pronunciation::new(phones));
        self
    }

    /// All variants for a word
    pub fn variants(&self, word: &str) -> Option<&[Pronunciation]> {
        self.entries.get(word).map(Vec::as_slice)
    }

    /// The pronunciation used for a word
    ///
    /// Always the first variant: there is no part-of-speech tagging to pick
    /// between homographs.
    pub fn pronounce(&self, word: &str) -> Option<&Pronunciation> {
        self.variants(word)
            .and_then(|variants| variants.get(Self::variant_index(variants)))
    }

    const fn variant_index(_variants: &[Pronunciation]) -> usize {
        0
    }

    /// Whether the word has an entry
    pub fn contains(&self, word: &str) -> bool {
        self.entries.contains_key(word)
    }

    /// Number of distinct words
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the lexicon has no words
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_variant_is_used() {
        let lexicon = Lexicon::new()
            .with_entry("read", ["R", "IY1", "D"])
            .with_entry("read", ["R", "EH1", "D"]);

        assert_eq!(lexicon.variants("read").map(<[_]>::len), Some(2));
        assert_eq!(
            lexicon.pronounce("read"),
            Some(&Pronunciation::new(["R", "IY1", "D"]))
        );
        assert_eq!(lexicon.len(), 1);
    }

    #[test]
    fn words_are_stored_lowercase() {
        let lexicon = Lexicon::new().with_entry("Hello", ["HH", "AH0", "L", "OW1"]);
        assert!(lexicon.contains("hello"));
        assert!(!lexicon.contains("Hello"));
    }

    #[test]
    fn missing_word_has_no_pronunciation() {
        let lexicon = Lexicon::new();
        assert!(lexicon.pronounce("absent").is_none());
        assert!(lexicon.is_empty());
    }
}
