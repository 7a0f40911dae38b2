//! Linguistic front-end: text normalization and the emphasis hook

pub mod emphasis;
pub mod normalizer;
pub mod numbers;

pub use emphasis::{EmphasisHook, NeutralEmphasis};
pub use normalizer::{NormalizedPhrase, TextNormalizer};
pub use numbers::{date_words, day_words, number_words, year_words};
