//! Diphone inventory from a directory of WAV files
//!
//! Every `*.wav` file below the root becomes one unit, keyed by its file
//! stem (`aa-b.wav` is unit `aa-b`). Entries are visited in file name
//! order so that emergency search sees the same inventory order on every
//! run. Symlinked directories are not descended into.

use std::io;
use std::path::{Path, PathBuf};

use hound::{SampleFormat, WavReader};
use tracing::{debug, instrument};
use walkdir::WalkDir;

use crate::error::SynthError;
use crate::inventory::UnitInventory;
use crate::ports::InventorySource;
use crate::types::SampleBuffer;

/// Prefix of metadata files some platforms drop next to real files
const METADATA_PREFIX: &str = "._";

/// Inventory source backed by a WAV directory tree
#[derive(Debug, Clone)]
pub struct WavDirectoryInventory {
    root: PathBuf,
    sample_rate: u32,
}

impl WavDirectoryInventory {
    /// Create a source for `root`, expecting units at `sample_rate`
    pub fn new(root: impl Into<PathBuf>, sample_rate: u32) -> Self {
        Self {
            root: root.into(),
            sample_rate,
        }
    }

    /// Root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn read_unit(&self, key: &str, path: &Path) -> Result<SampleBuffer, SynthError> {
        let reader = WavReader::open(path)?;
        let spec = reader.spec();

        if spec.channels != 1 {
            return Err(SynthError::invalid_unit(
                key,
                format!("{} channels, expected mono", spec.channels),
            ));
        }
        if spec.sample_format != SampleFormat::Int || spec.bits_per_sample != 16 {
            return Err(SynthError::invalid_unit(
                key,
                format!(
                    "{}-bit {:?} samples, expected 16-bit integer",
                    spec.bits_per_sample, spec.sample_format
                ),
            ));
        }
        if spec.sample_rate != self.sample_rate {
            return Err(SynthError::invalid_unit(
                key,
                format!(
                    "sample rate {} Hz, expected {} Hz",
                    spec.sample_rate, self.sample_rate
                ),
            ));
        }

        let samples = reader.into_samples::<i16>().collect::<Result<Vec<_>, _>>()?;
        Ok(SampleBuffer::new(samples, spec.sample_rate))
    }
}

impl InventorySource for WavDirectoryInventory {
    #[instrument(skip(self), fields(root = %self.root.display()))]
    fn load(&self) -> Result<UnitInventory, SynthError> {
        let mut inventory = UnitInventory::new(self.sample_rate);

        for entry in WalkDir::new(&self.root).sort_by_file_name() {
            let entry = entry.map_err(io::Error::from)?;
            let path = entry.path();
            if entry.file_type().is_dir() || !is_unit_file(path) {
                continue;
            }

            let Some(key) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            let buffer = self.read_unit(key, path)?;
            inventory.insert(key, buffer)?;
        }

        debug!(
            "Loaded {} diphone units from {}",
            inventory.len(),
            self.root.display()
        );
        Ok(inventory)
    }
}

fn is_unit_file(path: &Path) -> bool {
    let is_metadata = path
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with(METADATA_PREFIX));
    let is_wav = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("wav"));

    is_wav && !is_metadata
}
