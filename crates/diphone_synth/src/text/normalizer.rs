//! Text normalization
//!
//! Turns a raw phrase into word tokens: dates and numbers are read out,
//! emphasis braces are removed and trailing punctuation is recorded so the
//! sequencer can insert pauses.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::config::SynthMode;
use crate::error::{NormalizeError, SynthError};
use crate::text::numbers::{date_words, number_words};
use crate::types::{PunctuationMarker, Token};

/// Characters removed before the phrase is split
const STRIPPED_CHARS: &[char] = &[
    '^', '%', '$', '@', ')', '(', '>', '<', '=', '+', '&', '[', ']', '`', '-',
];

/// Punctuation recorded for pauses and removed from token text
const PUNCTUATION: &[char] = &['.', ',', ';', ':', '?', '!'];

/// Mark placed after every letter in spell mode
const SPELL_MARK: char = '.';

/// A token that starts like a date: digits, slash, digits
static DATE_LIKE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)] // Infallible with a valid static pattern
    Regex::new(r"^\d+/\d+").expect("Failed to compile date detection pattern")
});

/// Output of normalization
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedPhrase {
    /// Word tokens in reading order
    pub tokens: Vec<Token>,
    /// Punctuation positions, strictly increasing by token index
    pub punctuation: Vec<PunctuationMarker>,
    /// Indices of emphasized tokens
    pub emphasis: Vec<usize>,
    /// Tokens that could not be normalized and were dropped
    pub discarded: Vec<NormalizeError>,
}

impl NormalizedPhrase {
    fn from_tokens(tokens: Vec<Token>, discarded: Vec<NormalizeError>) -> Self {
        let punctuation = tokens
            .iter()
            .enumerate()
            .filter_map(|(token_index, token)| {
                token.punctuation.map(|mark| PunctuationMarker { token_index, mark })
            })
            .collect();
        let emphasis = tokens
            .iter()
            .enumerate()
            .filter(|(_, token)| token.emphasis)
            .map(|(index, _)| index)
            .collect();

        Self {
            tokens,
            punctuation,
            emphasis,
            discarded,
        }
    }

    /// Token texts in order
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(|token| token.text.as_str())
    }

    /// Whether normalization left nothing to say
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Rewrites a raw phrase into plain word tokens
#[derive(Debug, Clone, Copy, Default)]
pub struct TextNormalizer {
    mode: SynthMode,
}

impl TextNormalizer {
    /// Create a normalizer for the given reading mode
    #[must_use]
    pub const fn new(mode: SynthMode) -> Self {
        Self { mode }
    }

    /// Normalize a phrase
    ///
    /// Malformed dates and numbers are dropped with a warning and listed in
    /// [`NormalizedPhrase::discarded`]; normalization itself never fails.
    pub fn normalize(&self, phrase: &str) -> NormalizedPhrase {
        let cleaned: String = phrase
            .chars()
            .filter(|c| !STRIPPED_CHARS.contains(c))
            .collect::<String>()
            .to_lowercase();

        let mut tokens: Vec<Token> = Vec::new();
        let mut discarded = Vec::new();

        for raw in cleaned.split_whitespace() {
            match expand_token(raw) {
                Ok(expanded) if expanded.is_empty() => {
                    if let Some(mark) = raw.chars().last().filter(|c| PUNCTUATION.contains(c)) {
                        attach_to_previous(&mut tokens, mark);
                    }
                },
                Ok(expanded) => tokens.extend(expanded),
                Err(err) => {
                    warn!("Discarding '{}': {}", err.token(), SynthError::from(err.clone()));
                    discarded.push(err);
                },
            }
        }

        if self.mode == SynthMode::Spell {
            tokens = spell_out(&tokens);
        }

        let normalized = NormalizedPhrase::from_tokens(tokens, discarded);
        debug!(
            "Normalized '{phrase}' into {} tokens ({} punctuation marks, {} discarded)",
            normalized.tokens.len(),
            normalized.punctuation.len(),
            normalized.discarded.len()
        );
        normalized
    }
}

/// Expand one whitespace-separated token into zero or more word tokens
fn expand_token(raw: &str) -> Result<Vec<Token>, NormalizeError> {
    let body = raw.trim_end_matches(PUNCTUATION);
    let mark = if body.len() == raw.len() {
        None
    } else {
        raw.chars().last()
    };

    let emphasis = body.starts_with('{') && body.ends_with('}');
    let body: String = body.chars().filter(|c| !matches!(c, '{' | '}')).collect();

    let words: Vec<String> = if DATE_LIKE.is_match(&body) {
        date_words(&body)?.split(' ').map(str::to_string).collect()
    } else if body.starts_with(|c: char| c.is_ascii_digit()) {
        number_words(&body)?.split(' ').map(str::to_string).collect()
    } else {
        let word: String = body.chars().filter(|c| !PUNCTUATION.contains(c)).collect();
        if word.is_empty() { Vec::new() } else { vec![word] }
    };

    let count = words.len();
    Ok(words
        .into_iter()
        .enumerate()
        .map(|(i, word)| {
            let mut token = Token::new(word);
            if emphasis {
                token = token.emphasized();
            }
            match mark {
                Some(mark) if i + 1 == count => token.with_punctuation(mark),
                _ => token,
            }
        })
        .collect())
}

/// A bare punctuation token pauses after the word before it
fn attach_to_previous(tokens: &mut [Token], mark: char) {
    if let Some(previous) = tokens.last_mut() {
        if previous.punctuation.is_none() {
            previous.punctuation = Some(mark);
        }
    }
}

/// One token per character, each followed by a full stop
fn spell_out(tokens: &[Token]) -> Vec<Token> {
    tokens
        .iter()
        .flat_map(|token| {
            token.text.chars().map(move |c| {
                let letter = Token::new(c).with_punctuation(SPELL_MARK);
                if token.emphasis {
                    letter.emphasized()
                } else {
                    letter
                }
            })
        })
        .collect()
}
