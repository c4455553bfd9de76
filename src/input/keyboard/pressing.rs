//! Tracking of which physical keys are currently held down.

use ::std::collections::HashMap;

use super::{LogicalKey, PhysicalKey};

/// The set of physical keys which are down, each with the logical key it was
/// pressed as.
///
/// A record exists for a physical key exactly when that key is down. Keeping
/// the logical key of the original press lets repeats and the final release
/// report the same logical key, even if the layout changed in between.
#[derive(Clone, Debug, Default)]
pub struct PressingRecords {
    records: HashMap<PhysicalKey, LogicalKey>,
}

impl PressingRecords {
    pub fn new() -> Self {
        Self::default()
    }

    /// The logical key the physical key was pressed as, or `None` if it is
    /// not down.
    pub fn get(&self, physical: PhysicalKey) -> Option<LogicalKey> {
        self.records.get(&physical).copied()
    }

    pub fn is_pressed(&self, physical: PhysicalKey) -> bool {
        self.records.contains_key(&physical)
    }

    /// Records the physical key as down, replacing any previous record.
    pub fn press(&mut self, physical: PhysicalKey, logical: LogicalKey) {
        self.records.insert(physical, logical);
    }

    /// Removes the record for the physical key, returning the logical key it
    /// was pressed as.
    pub fn release(&mut self, physical: PhysicalKey) -> Option<LogicalKey> {
        self.records.remove(&physical)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates over all keys which are down, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (PhysicalKey, LogicalKey)> + '_ {
        self.records.iter().map(|(&p, &l)| (p, l))
    }
}
