//! Diphone unit selection with emergency substitution
//!
//! A key missing from the inventory is split at its separator into the
//! former fragment (`aa-`) and the latter phone (`zz`). Candidates are the
//! former fragment followed by one character of the latter phone and a
//! wildcard (`aa-z*`); a one-character latter phone gives just `aa-*`.
//! The first inventory key matching a candidate, in inventory order, wins.

use tracing::{debug, warn};

use crate::error::SynthError;
use crate::inventory::UnitInventory;
use crate::types::{DIPHONE_SEPARATOR, DiphoneKey, PauseLength, SampleBuffer};

/// Wildcard shown in candidate patterns
const WILDCARD: char = '*';

/// A unit chosen for one diphone key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection<'a> {
    /// Inventory key that supplied the samples
    pub key: &'a str,
    /// The samples
    pub buffer: &'a SampleBuffer,
    /// Whether the key came from emergency search
    pub substituted: bool,
    /// Silence to insert after the unit
    pub pause: Option<PauseLength>,
}

/// Resolves diphone keys against an inventory
#[derive(Debug, Clone, Copy)]
pub struct UnitSelector<'a> {
    inventory: &'a UnitInventory,
}

impl<'a> UnitSelector<'a> {
    /// Create a selector over an inventory
    #[must_use]
    pub const fn new(inventory: &'a UnitInventory) -> Self {
        Self { inventory }
    }

    /// Select the unit for a diphone key
    ///
    /// # Errors
    ///
    /// Returns `SynthError::EmergencySearchExhausted` if neither the exact
    /// key nor any emergency candidate is in the inventory.
    pub fn select(&self, key: &DiphoneKey) -> Result<Selection<'a>, SynthError> {
        let acoustic = key.acoustic();
        let pause = key.pause();

        if let Some((key, buffer)) = self.inventory.get_key_value(&acoustic) {
            return Ok(Selection {
                key,
                buffer,
                substituted: false,
                pause,
            });
        }

        warn!("{}, searching for a substitute", SynthError::UnitMiss(acoustic.clone()));

        let (key, buffer) = self.emergency(&acoustic)?;
        Ok(Selection {
            key,
            buffer,
            substituted: true,
            pause,
        })
    }

    /// Near-match search for a key missing from the inventory
    ///
    /// # Errors
    ///
    /// Returns `SynthError::EmergencySearchExhausted` if no candidate matches.
    pub fn emergency(&self, key: &str) -> Result<(&'a str, &'a SampleBuffer), SynthError> {
        let candidates = emergency_candidates(key);
        let inventory = self.inventory;

        for candidate in &candidates {
            if let Some(found) = inventory.first_with_prefix(candidate) {
                if let Some(buffer) = inventory.get(found) {
                    debug!("Using '{found}' for missing '{key}' ({candidate}{WILDCARD})");
                    return Ok((found, buffer));
                }
            }
        }

        let patterns: Vec<String> = candidates
            .iter()
            .map(|candidate| format!("{candidate}{WILDCARD}"))
            .collect();
        Err(SynthError::exhausted(key, &patterns))
    }
}

/// Wildcard prefixes to try for a missing key, in order
pub fn emergency_candidates(key: &str) -> Vec<String> {
    let Some(separator) = key.find(DIPHONE_SEPARATOR) else {
        return Vec::new();
    };
    let (former, latter) = key.split_at(separator + DIPHONE_SEPARATOR.len_utf8());

    match latter.chars().count() {
        0 => Vec::new(),
        1 => vec![former.to_string()],
        _ => latter.chars().map(|c| format!("{former}{c}")).collect(),
    }
}
