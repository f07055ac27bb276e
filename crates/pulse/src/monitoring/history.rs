use std::collections::VecDeque;

use super::types::StatusRecord;
use crate::HISTORY_CAPACITY;

/// Fixed-capacity ring of check results, oldest first.
///
/// Appending to a full buffer evicts the oldest record. Records are never
/// edited once stored. Not synchronized on its own; the owning monitor's lock
/// covers it.
#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    records: VecDeque<StatusRecord>,
    capacity: usize,
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }
}

impl HistoryBuffer {
    /// Create a buffer holding at most `capacity` records (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self { records: VecDeque::with_capacity(capacity), capacity }
    }

    pub fn append(&mut self, record: StatusRecord) {
        if self.records.len() == self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    /// Copy of the stored records, oldest first
    pub fn snapshot(&self) -> Vec<StatusRecord> {
        self.records.iter().copied().collect()
    }

    pub fn newest_first(&self) -> impl Iterator<Item = &StatusRecord> {
        self.records.iter().rev()
    }

    pub fn latest(&self) -> Option<&StatusRecord> {
        self.records.back()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
