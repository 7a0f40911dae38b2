//! Diphone Synth - Concatenative diphone speech synthesis
//!
//! Turns a line of English text into a 16-bit mono waveform by gluing
//! together prerecorded diphone units:
//! - `text` - Normalize dates, numbers, punctuation and emphasis markers
//! - `phonemizer` - Look words up in a pronouncing dictionary, decomposing
//!   unknown words into known prefixes and spelled letters
//! - `sequencer` - Pair adjacent phonemes and pauses into diphone keys
//! - `selector` - Find a recorded unit per key, with emergency substitution
//! - `assembler` - Concatenate or crossfade the units into one waveform
//!
//! # Architecture
//!
//! This crate follows the ports & adapters pattern:
//! - `ports` module defines the collaborator traits (ports)
//! - `providers` module contains the file-based implementations (adapters)
//!   and, with the `playback` feature, speaker output
//!
//! The pipeline itself is synchronous and keeps no state between calls.
//! Inventories and lexicons are read-only once loaded and can be shared by
//! reference between concurrent syntheses.
//!
//! # Example
//!
//! ```ignore
//! use diphone_synth::{
//!     CmuDictLexicon, InventorySource, LexiconSource, SynthConfig, Synthesizer,
//!     WavDirectoryInventory,
//! };
//!
//! let config = SynthConfig::default();
//! let lexicon = CmuDictLexicon::new("cmudict.dict").load()?;
//! let inventory = WavDirectoryInventory::new("diphones", config.sample_rate).load()?;
//!
//! let synth = Synthesizer::new(config, &lexicon, &inventory)?;
//! let (waveform, report) = synth.synthesize_with_report("Hello, world!")?;
//! println!("{} samples, {} substitutions", waveform.len(), report.substitutions.len());
//! ```

pub mod assembler;
pub mod config;
pub mod error;
pub mod inventory;
pub mod lexicon;
pub mod phonemizer;
pub mod ports;
pub mod providers;
pub mod selector;
pub mod sequencer;
pub mod synthesizer;
pub mod text;
pub mod types;
pub mod volume;

pub use assembler::{AssemblyMode, Segment, WaveformAssembler};
pub use config::{MissingUnitPolicy, SynthConfig, SynthMode};
pub use error::{NormalizeError, SynthError};
pub use inventory::UnitInventory;
pub use lexicon::Lexicon;
pub use phonemizer::{Phonemized, Phonemizer, Resolution};
pub use ports::{InventorySource, LexiconSource, WaveformSink};
#[cfg(feature = "playback")]
pub use providers::SpeakerSink;
pub use providers::{CmuDictLexicon, WavDirectoryInventory, WavFileSink};
pub use selector::{Selection, UnitSelector};
pub use sequencer::DiphoneSequencer;
pub use synthesizer::{FallbackWord, Substitution, SynthesisReport, Synthesizer, synthesize};
pub use text::{EmphasisHook, NeutralEmphasis, NormalizedPhrase, TextNormalizer};
pub use types::{DiphoneKey, PauseLength, Pronunciation, SampleBuffer, Token};
pub use volume::Volume;
