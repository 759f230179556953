use std::collections::HashMap;

use foundation::color::Rgb;
use foundation::math::Vec3;
use formats::BrainData;
use tracing::warn;

/// Bounding-sphere radius of a consideration marker.
pub const ENTRY_RADIUS: f64 = 0.6;

/// Fixed label palette; unknown labels render white.
pub fn consideration_color(label: &str) -> Rgb {
    match label {
        "Value?" => Rgb::from_hex(0xFF9EF2),
        "Resource?" => Rgb::from_hex(0xFED0A8),
        "People?" => Rgb::from_hex(0x5DA2E5),
        _ => Rgb::WHITE,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConsiderationEntry {
    pub label: String,
    pub position: Vec3,
    pub base_color: Rgb,
}

/// Label -> entry mapping, built once from brain data.
///
/// Ordering contract:
/// - Iteration follows first-insertion order of each label.
/// - Re-inserting a label replaces the entry in place (the index is stable).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConsiderationRegistry {
    entries: Vec<ConsiderationEntry>,
    by_label: HashMap<String, usize>,
}

impl ConsiderationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_brain_data(data: &BrainData) -> Self {
        for skipped in &data.skipped {
            warn!(line = skipped.line, "skipping brain-data row: {}", skipped.reason);
        }

        let mut registry = Self::new();
        for row in &data.rows {
            if let Some(previous) = registry.insert(row.label.clone(), row.position) {
                warn!(
                    "duplicate consideration '{}': {:?} replaced by {:?}",
                    previous.label, previous.position, row.position
                );
            }
        }
        registry
    }

    /// Inserts or replaces the entry for `label`.
    ///
    /// Returns the replaced entry, if any.
    pub fn insert(
        &mut self,
        label: impl Into<String>,
        position: Vec3,
    ) -> Option<ConsiderationEntry> {
        let label = label.into();
        let entry = ConsiderationEntry {
            base_color: consideration_color(&label),
            label: label.clone(),
            position,
        };

        match self.by_label.get(&label) {
            Some(&idx) => Some(std::mem::replace(&mut self.entries[idx], entry)),
            None => {
                self.by_label.insert(label, self.entries.len());
                self.entries.push(entry);
                None
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.by_label.contains_key(label)
    }

    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.by_label.get(label).copied()
    }

    pub fn get(&self, label: &str) -> Option<&ConsiderationEntry> {
        self.index_of(label).map(|idx| &self.entries[idx])
    }

    pub fn entry(&self, index: usize) -> Option<&ConsiderationEntry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConsiderationEntry> + '_ {
        self.entries.iter()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|e| e.label.as_str())
    }
}
