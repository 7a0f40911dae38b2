//! Lexicon from a CMU Pronouncing Dictionary file
//!
//! The format is one entry per line, `WORD  PH1 PH2 ...`, with alternate
//! pronunciations written as `WORD(2)`, `WORD(3)` and so on. Lines starting
//! with `;;;` or `#` are comments.

use std::fs;
use std::path::PathBuf;

use tracing::{debug, instrument, warn};

use crate::error::SynthError;
use crate::lexicon::Lexicon;
use crate::ports::LexiconSource;
use crate::types::Pronunciation;

/// Lexicon source backed by a CMU dictionary file
#[derive(Debug, Clone)]
pub struct CmuDictLexicon {
    path: PathBuf,
}

impl CmuDictLexicon {
    /// Create a source for the dictionary at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl LexiconSource for CmuDictLexicon {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn load(&self) -> Result<Lexicon, SynthError> {
        let bytes = fs::read(&self.path)?;
        let lexicon = parse(&String::from_utf8_lossy(&bytes));
        debug!("Loaded {} words from {}", lexicon.len(), self.path.display());
        Ok(lexicon)
    }
}

/// Parse dictionary text
///
/// Malformed lines are skipped with a warning.
pub fn parse(text: &str) -> Lexicon {
    let mut lexicon = Lexicon::new();

    for (number, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with(";;;") || line.starts_with('#') {
            continue;
        }

        let mut fields = line.split_whitespace();
        let Some(head) = fields.next() else {
            continue;
        };
        let phones: Vec<&str> = fields.collect();
        if phones.is_empty() {
            warn!("Dictionary line {} has no phonemes: '{line}'", number + 1);
            continue;
        }

        lexicon.insert(headword(head), Pronunciation::new(phones));
    }

    lexicon
}

/// Headword without its `(N)` variant suffix
fn headword(head: &str) -> &str {
    match head.strip_suffix(')').and_then(|rest| rest.rsplit_once('(')) {
        Some((word, variant))
            if !word.is_empty()
                && !variant.is_empty()
                && variant.chars().all(|c| c.is_ascii_digit()) =>
        {
            word
        },
        _ => head,
    }
}
