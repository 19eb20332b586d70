use std::collections::HashMap;

use crate::types::row::RowLocation;

/// Equality index from a value's canonical key to the locations holding it,
/// in the order they were added.
#[derive(Debug, Clone, Default)]
pub struct HashIndex {
    entries: HashMap<String, Vec<RowLocation>>,
}

impl HashIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: impl Into<String>, location: RowLocation) {
        self.entries.entry(key.into()).or_default().push(location);
    }

    /// Drop `location` from `key`. Keys with no locations left disappear.
    pub fn remove(&mut self, key: &str, location: RowLocation) {
        let Some(locations) = self.entries.get_mut(key) else {
            return;
        };
        locations.retain(|existing| *existing != location);
        if locations.is_empty() {
            self.entries.remove(key);
        }
    }

    pub fn find(&self, key: &str) -> &[RowLocation] {
        self.entries.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn key_count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
