//! Diphone unit inventory
//!
//! Units keep the order they were added in. Emergency search resolves a
//! wildcard to the first key in that order, so the inventory carries a
//! prefix trie that answers "first key starting with X" without scanning.

use std::collections::{BTreeMap, HashMap};

use tracing::warn;

use crate::error::SynthError;
use crate::types::SampleBuffer;

/// Read-only mapping from acoustic diphone key to recorded samples
#[derive(Debug, Clone)]
pub struct UnitInventory {
    sample_rate: u32,
    units: Vec<(String, SampleBuffer)>,
    positions: HashMap<String, usize>,
    prefixes: PrefixIndex,
}

impl UnitInventory {
    /// Create an empty inventory for the given sample rate
    #[must_use]
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            units: Vec::new(),
            positions: HashMap::new(),
            prefixes: PrefixIndex::default(),
        }
    }

    /// Add a unit
    ///
    /// A key that is already present keeps its first buffer; the duplicate
    /// is ignored with a warning.
    ///
    /// # Errors
    ///
    /// Returns `SynthError::InvalidUnit` if the buffer's sample rate differs
    /// from the inventory's.
    pub fn insert(&mut self, key: impl Into<String>, buffer: SampleBuffer) -> Result<(), SynthError> {
        let key = key.into();

        if buffer.sample_rate() != self.sample_rate {
            return Err(SynthError::invalid_unit(
                key,
                format!(
                    "sample rate {} Hz, inventory expects {} Hz",
                    buffer.sample_rate(),
                    self.sample_rate
                ),
            ));
        }

        if self.positions.contains_key(&key) {
            warn!("Duplicate diphone unit '{key}', keeping the first one");
            return Ok(());
        }

        let position = self.units.len();
        self.prefixes.insert(&key, position);
        self.positions.insert(key.clone(), position);
        self.units.push((key, buffer));
        Ok(())
    }

    /// Add a unit, builder style
    ///
    /// # Errors
    ///
    /// Same as [`UnitInventory::insert`].
    pub fn with_unit(mut self, key: &str, buffer: SampleBuffer) -> Result<Self, SynthError> {
        self.insert(key, buffer)?;
        Ok(self)
    }

    /// Exact lookup
    pub fn get(&self, key: &str) -> Option<&SampleBuffer> {
        self.get_key_value(key).map(|(_, buffer)| buffer)
    }

    /// Exact lookup returning the stored key alongside its unit
    pub fn get_key_value(&self, key: &str) -> Option<(&str, &SampleBuffer)> {
        self.positions.get(key).map(|&position| {
            let (key, buffer) = &self.units[position];
            (key.as_str(), buffer)
        })
    }

    /// First key, in insertion order, that starts with `prefix`
    pub fn first_with_prefix(&self, prefix: &str) -> Option<&str> {
        self.prefixes
            .first(prefix)
            .map(|position| self.units[position].0.as_str())
    }

    /// Keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.units.iter().map(|(key, _)| key.as_str())
    }

    /// Whether the key is present
    pub fn contains(&self, key: &str) -> bool {
        self.positions.contains_key(key)
    }

    /// Sample rate of every unit
    pub const fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of units
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Whether there are no units
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

/// Character trie over inventory keys
///
/// Every node remembers the smallest insertion position below it. Positions
/// only grow, so that is the position of the key that created the node.
#[derive(Debug, Clone, Default)]
struct PrefixIndex {
    nodes: Vec<TrieNode>,
}

#[derive(Debug, Clone)]
struct TrieNode {
    children: BTreeMap<char, usize>,
    first: usize,
}

impl TrieNode {
    const fn new(first: usize) -> Self {
        Self {
            children: BTreeMap::new(),
            first,
        }
    }
}

impl PrefixIndex {
    fn insert(&mut self, key: &str, position: usize) {
        if self.nodes.is_empty() {
            self.nodes.push(TrieNode::new(position));
        }

        let mut node = 0;
        for c in key.chars() {
            let existing = self.nodes[node].children.get(&c).copied();
            node = match existing {
                Some(child) => child,
                None => {
                    let child = self.nodes.len();
                    self.nodes.push(TrieNode::new(position));
                    self.nodes[node].children.insert(c, child);
                    child
                },
            };
        }
    }

    fn first(&self, prefix: &str) -> Option<usize> {
        let mut node = self.nodes.first()?;
        for c in prefix.chars() {
            node = &self.nodes[*node.children.get(&c)?];
        }
        Some(node.first)
    }
}
