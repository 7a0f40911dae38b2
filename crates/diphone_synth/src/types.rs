//! Types shared by the synthesis pipeline
//!
//! Contains tokens, pronunciations, diphone keys and sample buffers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Separator between the two phones of a diphone key
pub const DIPHONE_SEPARATOR: char = '-';

/// Plain pause phone used as the utterance-start boundary
pub const PAUSE_PHONE: &str = "pau";

/// A word-like token that survived normalization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Lowercase token text without punctuation
    pub text: String,
    /// Punctuation that trailed the token, if any
    pub punctuation: Option<char>,
    /// Whether the token was wrapped in emphasis braces
    pub emphasis: bool,
}

impl Token {
    /// Create a plain token
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            punctuation: None,
            emphasis: false,
        }
    }

    /// Attach trailing punctuation
    #[must_use]
    pub const fn with_punctuation(mut self, mark: char) -> Self {
        self.punctuation = Some(mark);
        self
    }

    /// Mark the token as emphasized
    #[must_use]
    pub const fn emphasized(mut self) -> Self {
        self.emphasis = true;
        self
    }
}

/// Position of a punctuation mark in the normalized token list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PunctuationMarker {
    /// Index of the token the mark trailed
    pub token_index: usize,
    /// The punctuation character
    pub mark: char,
}

/// Ordered phoneme symbols for one token
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pronunciation(Vec<String>);

impl Pronunciation {
    /// Create a pronunciation from phoneme symbols
    pub fn new<I, S>(phones: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(phones.into_iter().map(Into::into).collect())
    }

    /// Phoneme symbols in order
    pub fn phones(&self) -> &[String] {
        &self.0
    }

    /// Number of phonemes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the pronunciation has no phonemes
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Append the phonemes of another pronunciation
    pub fn extend_from(&mut self, other: &Self) {
        self.0.extend(other.0.iter().cloned());
    }
}

impl FromIterator<String> for Pronunciation {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Silence inserted after a pause-marked diphone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PauseLength {
    /// 200ms, written `pau2`
    Short,
    /// 400ms, written `pau4`
    Long,
}

impl PauseLength {
    /// Stream marker for this pause
    #[must_use]
    pub const fn marker(&self) -> &'static str {
        match self {
            Self::Short => "pau2",
            Self::Long => "pau4",
        }
    }

    /// Duration in milliseconds
    #[must_use]
    pub const fn millis(&self) -> u32 {
        match self {
            Self::Short => 200,
            Self::Long => 400,
        }
    }

    /// Number of silent samples, `round(seconds × rate)`
    #[must_use]
    pub fn samples(&self, sample_rate: u32) -> usize {
        (f64::from(self.millis()) / 1000.0 * f64::from(sample_rate)).round() as usize
    }

    /// Pause that a punctuation mark calls for
    #[must_use]
    pub const fn for_punctuation(mark: char) -> Option<Self> {
        match mark {
            '.' | ':' | '?' | '!' => Some(Self::Long),
            ',' | ';' => Some(Self::Short),
            _ => None,
        }
    }

    /// Pause encoded by a duration digit
    #[must_use]
    pub const fn from_digit(digit: char) -> Option<Self> {
        match digit {
            '2' => Some(Self::Short),
            '4' => Some(Self::Long),
            _ => None,
        }
    }
}

/// Diphone key: `phoneA-phoneB`, where either side may be a pause marker
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiphoneKey(String);

impl DiphoneKey {
    /// Join two adjacent stream elements
    pub fn pair(left: &str, right: &str) -> Self {
        Self(format!("{left}{DIPHONE_SEPARATOR}{right}"))
    }

    /// The key as written
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Silence requested by the key's trailing duration digit
    #[must_use]
    pub fn pause(&self) -> Option<PauseLength> {
        self.0.chars().last().and_then(PauseLength::from_digit)
    }

    /// Inventory lookup key: duration digits `2`/`4` removed
    #[must_use]
    pub fn acoustic(&self) -> String {
        self.0.chars().filter(|c| !matches!(c, '2' | '4')).collect()
    }
}

impl From<&str> for DiphoneKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl From<String> for DiphoneKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl fmt::Display for DiphoneKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Mono signed 16-bit PCM at a fixed sample rate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleBuffer {
    samples: Vec<i16>,
    sample_rate: u32,
}

impl SampleBuffer {
    /// Create a buffer from samples
    #[must_use]
    pub const fn new(samples: Vec<i16>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// Create a buffer of `len` zero samples
    #[must_use]
    pub fn silence(len: usize, sample_rate: u32) -> Self {
        Self::new(vec![0; len], sample_rate)
    }

    /// The samples
    #[must_use]
    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    /// Consume and return the samples
    #[must_use]
    pub fn into_samples(self) -> Vec<i16> {
        self.samples
    }

    /// Sample rate in Hz
    #[must_use]
    pub const fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of samples
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the buffer has no samples
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in milliseconds
    #[must_use]
    pub fn duration_ms(&self) -> u64 {
        if self.sample_rate == 0 {
            return 0;
        }
        self.samples.len() as u64 * 1000 / u64::from(self.sample_rate)
    }
}
