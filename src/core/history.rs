// src/core/history.rs — Session interaction history
//
// Append-only until an explicit clear. No cap and no eviction.

use super::types::InteractionRecord;

#[derive(Debug, Default)]
pub struct HistoryStore {
    records: Vec<InteractionRecord>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, record: InteractionRecord) {
        self.records.push(record);
    }

    /// The current record: the one a review would look at.
    pub fn last(&self) -> Option<&InteractionRecord> {
        self.records.last()
    }

    pub fn clear(&mut self) {
        let dropped = self.records.len();
        self.records.clear();
        tracing::debug!("History cleared ({} record(s) dropped)", dropped);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in insertion order.
    pub fn records(&self) -> &[InteractionRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &InteractionRecord> {
        self.records.iter()
    }
}
