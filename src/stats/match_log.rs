use crate::model::MatchRecord;
use serde::{Deserialize, Serialize};

/// Append-only, chronological list of submitted matches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchLog {
    records: Vec<MatchRecord>,
}

impl MatchLog {
    pub fn push(&mut self, record: MatchRecord) {
        self.records.push(record);
    }

    pub fn get(&self, index: usize) -> Option<&MatchRecord> {
        self.records.get(index)
    }

    pub fn last(&self) -> Option<&MatchRecord> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MatchRecord> {
        self.records.iter()
    }

    /// The `count` most recent records, newest first.
    pub fn recent(&self, count: usize) -> impl Iterator<Item = &MatchRecord> {
        self.records.iter().rev().take(count)
    }
}
