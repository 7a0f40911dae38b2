//! File-based collaborator implementations
//!
//! Contains concrete implementations of the `InventorySource`,
//! `LexiconSource` and `WaveformSink` ports. Speaker playback needs the
//! `playback` feature.

pub mod cmudict;
#[cfg(feature = "playback")]
pub mod playback;
pub mod wav_directory;
pub mod wav_writer;

pub use cmudict::CmuDictLexicon;
#[cfg(feature = "playback")]
pub use playback::SpeakerSink;
pub use wav_directory::WavDirectoryInventory;
pub use wav_writer::WavFileSink;
