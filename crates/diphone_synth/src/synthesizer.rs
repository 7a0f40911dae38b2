//! Synthesis entry point
//!
//! Runs one phrase through normalization, phonemization, diphone
//! sequencing, unit selection and assembly. Recovered diagnostics are
//! logged and collected into a [`SynthesisReport`]; only assembly failures
//! and, under [`MissingUnitPolicy::FailFast`], exhausted emergency searches
//! are returned as errors.

use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::assembler::{Segment, WaveformAssembler};
use crate::config::{MissingUnitPolicy, SynthConfig, SynthMode};
use crate::error::SynthError;
use crate::inventory::UnitInventory;
use crate::lexicon::Lexicon;
use crate::phonemizer::{Phonemized, Phonemizer, Resolution};
use crate::selector::UnitSelector;
use crate::sequencer::DiphoneSequencer;
use crate::text::{EmphasisHook, NeutralEmphasis, TextNormalizer};
use crate::types::{DiphoneKey, Pronunciation, SampleBuffer};

/// A word that was not in the lexicon
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FallbackWord {
    /// The token as normalized
    pub word: String,
    /// Lexicon words it was cut into
    pub prefixes: Vec<String>,
    /// Letters spelled after the prefix limit
    pub spelled: String,
    /// Characters left silent
    pub omitted: String,
}

/// A diphone served by emergency search
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Substitution {
    /// Key as sequenced
    pub requested: DiphoneKey,
    /// Inventory key that was used instead
    pub used: String,
}

/// Everything that was recovered from during one synthesis
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SynthesisReport {
    /// Diphone keys in output order
    pub diphones: Vec<DiphoneKey>,
    /// Date and number parse errors for tokens dropped by normalization
    pub discarded: Vec<String>,
    /// Words pronounced through fallback decomposition
    pub fallbacks: Vec<FallbackWord>,
    /// Emergency substitutions
    pub substitutions: Vec<Substitution>,
    /// Keys left out under the skip policy
    pub skipped: Vec<DiphoneKey>,
}

/// Diphone synthesizer over a lexicon and a unit inventory
#[derive(Debug)]
pub struct Synthesizer<'a> {
    config: SynthConfig,
    lexicon: &'a Lexicon,
    inventory: &'a UnitInventory,
    emphasis: Box<dyn EmphasisHook>,
}

impl<'a> Synthesizer<'a> {
    /// Create a synthesizer
    ///
    /// # Errors
    ///
    /// Returns `SynthError::Configuration` if the config is invalid or its
    /// sample rate differs from the inventory's.
    pub fn new(
        config: SynthConfig,
        lexicon: &'a Lexicon,
        inventory: &'a UnitInventory,
    ) -> Result<Self, SynthError> {
        config.validate().map_err(SynthError::Configuration)?;

        if config.sample_rate != inventory.sample_rate() {
            return Err(SynthError::Configuration(format!(
                "Sample rate {} Hz does not match the inventory ({} Hz)",
                config.sample_rate,
                inventory.sample_rate()
            )));
        }

        Ok(Self {
            config,
            lexicon,
            inventory,
            emphasis: Box::new(NeutralEmphasis),
        })
    }

    /// Replace the emphasis hook
    #[must_use]
    pub fn with_emphasis_hook(mut self, hook: Box<dyn EmphasisHook>) -> Self {
        self.emphasis = hook;
        self
    }

    /// Configuration in use
    pub const fn config(&self) -> &SynthConfig {
        &self.config
    }

    /// Synthesize a phrase
    ///
    /// # Errors
    ///
    /// See [`Synthesizer::synthesize_with_report`].
    pub fn synthesize(&self, phrase: &str) -> Result<SampleBuffer, SynthError> {
        self.synthesize_with_report(phrase)
            .map(|(waveform, _)| waveform)
    }

    /// Synthesize a phrase and describe what had to be recovered
    ///
    /// # Errors
    ///
    /// Returns `SynthError::Assembly` if nothing in the phrase could be
    /// pronounced or no unit survived selection, and
    /// `SynthError::EmergencySearchExhausted` if a unit is missing under the
    /// fail-fast policy.
    #[instrument(skip(self, phrase), fields(phrase_len = phrase.len(), mode = ?self.config.mode))]
    pub fn synthesize_with_report(
        &self,
        phrase: &str,
    ) -> Result<(SampleBuffer, SynthesisReport), SynthError> {
        let mut report = SynthesisReport::default();

        let mut normalized = TextNormalizer::new(self.config.mode).normalize(phrase);
        if self.config.emphasis {
            self.emphasis.apply(&mut normalized);
        }
        report.discarded = normalized
            .discarded
            .iter()
            .cloned()
            .map(|err| SynthError::from(err).to_string())
            .collect();

        let phonemizer = Phonemizer::new(self.lexicon);
        let mut pronunciations: Vec<Pronunciation> = Vec::with_capacity(normalized.tokens.len());
        for word in normalized.words() {
            let Phonemized {
                pronunciation,
                resolution,
            } = phonemizer.phonemize(word);

            if let Resolution::Fallback {
                prefixes,
                spelled,
                omitted,
            } = resolution
            {
                if pronunciation.is_empty() {
                    warn!("{}", SynthError::LexiconMiss(word.to_string()));
                }
                report.fallbacks.push(FallbackWord {
                    word: word.to_string(),
                    prefixes,
                    spelled,
                    omitted,
                });
            }
            pronunciations.push(pronunciation);
        }

        let keys = DiphoneSequencer::new().sequence(&pronunciations, &normalized.punctuation);
        if keys.is_empty() {
            return Err(SynthError::Assembly(
                "phrase has nothing to pronounce".to_string(),
            ));
        }

        let segments = self.select_units(&keys, &mut report)?;
        let waveform = WaveformAssembler::from_config(&self.config).assemble(segments)?;

        debug!(
            "Synthesized {} diphones into {} ms ({} substituted, {} skipped)",
            keys.len(),
            waveform.duration_ms(),
            report.substitutions.len(),
            report.skipped.len()
        );
        report.diphones = keys;
        Ok((waveform, report))
    }

    fn select_units(
        &self,
        keys: &[DiphoneKey],
        report: &mut SynthesisReport,
    ) -> Result<Vec<Segment<'a>>, SynthError> {
        let selector = UnitSelector::new(self.inventory);
        let mut segments = Vec::with_capacity(keys.len());

        for key in keys {
            match selector.select(key) {
                Ok(selection) => {
                    if selection.substituted {
                        report.substitutions.push(Substitution {
                            requested: key.clone(),
                            used: selection.key.to_string(),
                        });
                    }
                    segments.push(Segment::Unit(selection.buffer.samples()));
                },
                Err(e @ SynthError::EmergencySearchExhausted { .. }) => {
                    match self.config.missing_unit_policy {
                        MissingUnitPolicy::Skip => {
                            warn!("{e}, leaving a gap");
                            report.skipped.push(key.clone());
                        },
                        MissingUnitPolicy::FailFast => return Err(e),
                    }
                },
                Err(e) => return Err(e),
            }

            // The pause belongs to the key, so it survives a skipped unit.
            if let Some(pause) = key.pause() {
                segments.push(Segment::Silence(pause.samples(self.config.sample_rate)));
            }
        }

        if !segments.iter().any(|segment| matches!(segment, Segment::Unit(_))) {
            return Err(SynthError::Assembly(
                "no unit could be selected".to_string(),
            ));
        }

        Ok(segments)
    }
}

/// One-call synthesis with default settings for everything but the flags
///
/// # Errors
///
/// Same as [`Synthesizer::synthesize`], plus `SynthError::Configuration`
/// for an inventory with a zero sample rate.
pub fn synthesize(
    phrase: &str,
    mode: SynthMode,
    crossfade: bool,
    lexicon: &Lexicon,
    inventory: &UnitInventory,
) -> Result<SampleBuffer, SynthError> {
    let config = SynthConfig {
        mode,
        crossfade,
        sample_rate: inventory.sample_rate(),
        ..SynthConfig::default()
    };
    Synthesizer::new(config, lexicon, inventory)?.synthesize(phrase)
}
