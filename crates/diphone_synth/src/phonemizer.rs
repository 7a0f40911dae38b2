//! Word to phoneme resolution
//!
//! Words found in the lexicon are returned as-is. Unknown words are cut
//! into the longest known prefixes, left to right; after three prefixes
//! the rest of the word is spelled letter by letter.

use tracing::{debug, warn};

use crate::lexicon::Lexicon;
use crate::types::Pronunciation;

/// Prefix resolutions allowed before falling back to spelling
pub const MAX_PREFIX_RESOLUTIONS: usize = 3;

/// How a word's pronunciation was found
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Exact lexicon entry
    Lexicon,
    /// Built from known prefixes and spelled letters
    Fallback {
        /// Lexicon words the token was cut into, in order
        prefixes: Vec<String>,
        /// Tail spelled letter by letter after the prefix limit
        spelled: String,
        /// Characters that had no entry at all and contribute no phonemes
        omitted: String,
    },
}

/// A resolved pronunciation and where it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phonemized {
    /// Phonemes in order; empty only if nothing in the word was pronounceable
    pub pronunciation: Pronunciation,
    /// Resolution path
    pub resolution: Resolution,
}

/// Resolves tokens to pronunciations using a lexicon
#[derive(Debug, Clone, Copy)]
pub struct Phonemizer<'a> {
    lexicon: &'a Lexicon,
}

impl<'a> Phonemizer<'a> {
    /// Create a phonemizer over a lexicon
    #[must_use]
    pub const fn new(lexicon: &'a Lexicon) -> Self {
        Self { lexicon }
    }

    /// Resolve a token to a pronunciation
    pub fn phonemize(&self, word: &str) -> Phonemized {
        if let Some(pronunciation) = self.lexicon.pronounce(word) {
            return Phonemized {
                pronunciation: pronunciation.clone(),
                resolution: Resolution::Lexicon,
            };
        }

        debug!("'{word}' not in lexicon, decomposing");

        let mut pronunciation = Pronunciation::default();
        let mut prefixes = Vec::new();
        let mut spelled = String::new();
        let mut omitted = String::new();
        let mut remaining = word;

        // Each pass consumes at least one character.
        while !remaining.is_empty() {
            if prefixes.len() >= MAX_PREFIX_RESOLUTIONS {
                for letter in remaining.chars() {
                    match self.lexicon.pronounce(letter.encode_utf8(&mut [0; 4])) {
                        Some(letter_pron) => {
                            pronunciation.extend_from(letter_pron);
                            spelled.push(letter);
                        },
                        None => omitted.push(letter),
                    }
                }
                break;
            }

            match self.longest_prefix(remaining) {
                Some((end, prefix_pron)) => {
                    pronunciation.extend_from(prefix_pron);
                    prefixes.push(remaining[..end].to_string());
                    remaining = &remaining[end..];
                },
                None => {
                    let skip = remaining.chars().next().map_or(remaining.len(), char::len_utf8);
                    omitted.push_str(&remaining[..skip]);
                    remaining = &remaining[skip..];
                },
            }
        }

        if !omitted.is_empty() {
            warn!("No pronunciation for '{omitted}' in '{word}', leaving it silent");
        }

        Phonemized {
            pronunciation,
            resolution: Resolution::Fallback {
                prefixes,
                spelled,
                omitted,
            },
        }
    }

    /// Longest prefix of `text` with a lexicon entry, as (byte end, pronunciation)
    fn longest_prefix(&self, text: &str) -> Option<(usize, &'a Pronunciation)> {
        let lexicon = self.lexicon;
        text.char_indices()
            .map(|(start, c)| start + c.len_utf8())
            .rev()
            .find_map(|end| lexicon.pronounce(&text[..end]).map(|pron| (end, pron)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lexicon() -> Lexicon {
        Lexicon::new()
            .with_entry("sun", ["S", "AH1", "N"])
            .with_entry("flower", ["F", "L", "AW1", "ER0"])
            .with_entry("flow", ["F", "L", "OW1"])
            .with_entry("pot", ["P", "AA1", "T"])
            .with_entry("s", ["EH1", "S"])
            .with_entry("x", ["EH1", "K", "S"])
            .with_entry("a", ["EY1"])
            .with_entry("b", ["B", "IY1"])
    }

    fn phones(phonemized: &Phonemized) -> Vec<&str> {
        phonemized
            .pronunciation
            .phones()
            .iter()
            .map(String::as_str)
            .collect()
    }

    #[test]
    fn exact_hit_is_returned_directly() {
        let lexicon = lexicon();
        let result = Phonemizer::new(&lexicon).phonemize("sun");

        assert_eq!(phones(&result), ["S", "AH1", "N"]);
        assert_eq!(result.resolution, Resolution::Lexicon);
    }

    #[test]
    fn miss_uses_longest_prefix_first() {
        let lexicon = lexicon();
        let result = Phonemizer::new(&lexicon).phonemize("sunflowerpot");

        assert_eq!(
            phones(&result),
            ["S", "AH1", "N", "F", "L", "AW1", "ER0", "P", "AA1", "T"]
        );
        let Resolution::Fallback { prefixes, spelled, omitted } = result.resolution else {
            unreachable!("expected a fallback resolution");
        };
        assert_eq!(prefixes, ["sun", "flower", "pot"]);
        assert!(spelled.is_empty());
        assert!(omitted.is_empty());
    }

    #[test]
    fn letters_after_three_prefixes_are_spelled() {
        let lexicon = lexicon();
        let result = Phonemizer::new(&lexicon).phonemize("sunsunsunpotab");

        let Resolution::Fallback { prefixes, spelled, omitted } = &result.resolution else {
            unreachable!("expected a fallback resolution");
        };
        assert_eq!(prefixes, &["sun", "sun", "sun"]);
        // "pot" is not looked up as a word any more, and p, o, t have no entries
        assert_eq!(spelled, "ab");
        assert_eq!(omitted, "pot");
        assert_eq!(&phones(&result)[9..], ["EY1", "B", "IY1"]);
    }

    #[test]
    fn unknown_letter_contributes_nothing() {
        let lexicon = lexicon();
        let result = Phonemizer::new(&lexicon).phonemize("sunqpot");

        assert_eq!(phones(&result), ["S", "AH1", "N", "P", "AA1", "T"]);
        let Resolution::Fallback { omitted, .. } = result.resolution else {
            unreachable!("expected a fallback resolution");
        };
        assert_eq!(omitted, "q");
    }

    #[test]
    fn nonsense_token_terminates_with_empty_pronunciation() {
        let lexicon = lexicon();
        let result = Phonemizer::new(&lexicon).phonemize("ñññ¿¿¿zzzqqq");

        assert!(result.pronunciation.is_empty());
        let Resolution::Fallback { prefixes, omitted, .. } = result.resolution else {
            unreachable!("expected a fallback resolution");
        };
        assert!(prefixes.is_empty());
        assert_eq!(omitted, "ñññ¿¿¿zzzqqq");
    }

    #[test]
    fn single_letters_count_as_prefixes() {
        let lexicon = lexicon();
        let result = Phonemizer::new(&lexicon).phonemize("xsab");

        let Resolution::Fallback { prefixes, spelled, .. } = result.resolution else {
            unreachable!("expected a fallback resolution");
        };
        assert_eq!(prefixes, ["x", "s", "a"]);
        assert_eq!(spelled, "b");
    }

    #[test]
    fn empty_token_has_empty_pronunciation() {
        let lexicon = lexicon();
        let result = Phonemizer::new(&lexicon).phonemize("");
        assert!(result.pronunciation.is_empty());
    }
}
