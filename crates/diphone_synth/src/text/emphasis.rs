//! Emphasis realization hook
//!
//! Emphasis braces are parsed and recorded by the normalizer, but nothing
//! realizes them acoustically yet. The hook keeps the marker list flowing
//! through the pipeline so a realization can be plugged in later.

use std::fmt::Debug;

use tracing::debug;

use crate::text::normalizer::NormalizedPhrase;

/// Applies recorded emphasis markers to a normalized phrase
pub trait EmphasisHook: Debug + Send + Sync {
    /// Realize the emphasis recorded in `phrase.emphasis`
    fn apply(&self, phrase: &mut NormalizedPhrase);
}

/// Leaves the phrase untouched
#[derive(Debug, Clone, Copy, Default)]
pub struct NeutralEmphasis;

impl EmphasisHook for NeutralEmphasis {
    fn apply(&self, phrase: &mut NormalizedPhrase) {
        if !phrase.emphasis.is_empty() {
            debug!(
                "Emphasis recorded on tokens {:?}, no realization available",
                phrase.emphasis
            );
        }
    }
}
