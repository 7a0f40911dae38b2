//! Port definitions for synthesis collaborators
//!
//! The synthesis core only sees an in-memory [`UnitInventory`] and
//! [`Lexicon`]. Where they come from and where the waveform goes are
//! behind these traits; the `providers` module holds the file-based
//! adapters.

use crate::error::SynthError;
use crate::inventory::UnitInventory;
use crate::lexicon::Lexicon;
use crate::types::SampleBuffer;

/// Port for diphone unit inventories
///
/// # Example
///
/// ```ignore
/// use diphone_synth::{InventorySource, WavDirectoryInventory};
///
/// let inventory = WavDirectoryInventory::new("./diphones", 16_000).load()?;
/// println!("{} units", inventory.len());
/// ```
pub trait InventorySource {
    /// Build the inventory
    ///
    /// Platform metadata entries must already be excluded, and every unit
    /// must be mono 16-bit at the inventory's sample rate.
    ///
    /// # Errors
    ///
    /// Returns `SynthError` if the units cannot be read or are invalid.
    fn load(&self) -> Result<UnitInventory, SynthError>;
}

/// Port for pronouncing dictionaries
pub trait LexiconSource {
    /// Build the lexicon
    ///
    /// # Errors
    ///
    /// Returns `SynthError` if the dictionary cannot be read.
    fn load(&self) -> Result<Lexicon, SynthError>;
}

/// Port for waveform output
pub trait WaveformSink {
    /// Hand a finished waveform to the collaborator
    ///
    /// # Errors
    ///
    /// Returns `SynthError` if the waveform cannot be written.
    fn write(&self, waveform: &SampleBuffer) -> Result<(), SynthError>;
}
