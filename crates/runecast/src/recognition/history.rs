use std::collections::VecDeque;
use serde::{Deserialize, Serialize};
use crate::api::types::Timestamp;

/// One successful recognition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub pattern_id: String,
    pub score: f32,
    pub timestamp: Timestamp,
    pub associated_action: String,
}

/// Bounded most-recent-first log of recognitions.
/// Appending beyond capacity evicts the oldest entry.
#[derive(Debug, Clone)]
pub struct HistoryLedger {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl HistoryLedger {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.min(256)),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert at the head, dropping the tail once over capacity.
    pub fn append(&mut self, entry: HistoryEntry) {
        self.entries.push_front(entry);
        self.entries.truncate(self.capacity);
    }

    /// Up to `n` most recent entries, newest first.
    pub fn recent(&self, n: usize) -> Vec<HistoryEntry> {
        self.entries.iter().take(n).cloned().collect()
    }

    /// Iterate newest first.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Snapshot of every entry, newest first.
    pub fn export_all(&self) -> Vec<HistoryEntry> {
        self.entries.iter().cloned().collect()
    }

    /// Replace the contents. Input is newest first; anything past capacity is dropped.
    pub fn import_all(&mut self, entries: Vec<HistoryEntry>) {
        self.entries = entries.into_iter().take(self.capacity).collect();
    }

    /// Pattern recognized most often. Ties go to the most recently used.
    pub fn most_used(&self) -> Option<&str> {
        let mut counts: Vec<(&str, usize)> = Vec::new();
        for entry in &self.entries {
            match counts.iter_mut().find(|(id, _)| *id == entry.pattern_id) {
                Some((_, n)) => *n += 1,
                None => counts.push((&entry.pattern_id, 1)),
            }
        }

        let mut best: Option<(&str, usize)> = None;
        for (id, n) in counts {
            if best.map_or(true, |(_, b)| n > b) {
                best = Some((id, n));
            }
        }
        best.map(|(id, _)| id)
    }
}

impl Default for HistoryLedger {
    fn default() -> Self {
        Self::new(30)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, t: Timestamp) -> HistoryEntry {
        HistoryEntry {
            pattern_id: id.to_string(),
            score: 0.8,
            timestamp: t,
            associated_action: format!("{id} spell"),
        }
    }

    #[test]
    fn newest_first() {
        let mut h = HistoryLedger::new(5);
        h.append(entry("circle", 1));
        h.append(entry("zigzag", 2));
        let recent = h.recent(10);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].pattern_id, "zigzag");
        assert_eq!(recent[1].pattern_id, "circle");
    }

    #[test]
    fn evicts_oldest_past_capacity() {
        let mut h = HistoryLedger::new(30);
        for t in 0..35 {
            h.append(entry("circle", t));
        }
        assert_eq!(h.len(), 30);
        let all = h.export_all();
        assert_eq!(all[0].timestamp, 34);
        assert_eq!(all[29].timestamp, 5);
    }

    #[test]
    fn recent_does_not_mutate() {
        let mut h = HistoryLedger::new(3);
        h.append(entry("a", 0));
        let _ = h.recent(1);
        assert_eq!(h.len(), 1);
    }

    #[test]
    fn import_replaces_and_truncates() {
        let mut h = HistoryLedger::new(2);
        h.append(entry("old", 0));
        h.import_all(vec![entry("c", 3), entry("b", 2), entry("a", 1)]);
        let ids: Vec<_> = h.iter().map(|e| e.pattern_id.as_str()).collect();
        assert_eq!(ids, vec!["c", "b"]);
    }

    #[test]
    fn most_used_breaks_ties_by_recency() {
        let mut h = HistoryLedger::new(10);
        assert_eq!(h.most_used(), None);
        h.append(entry("circle", 1));
        h.append(entry("zigzag", 2));
        assert_eq!(h.most_used(), Some("zigzag"));
        h.append(entry("circle", 3));
        h.append(entry("heart", 4));
        assert_eq!(h.most_used(), Some("circle"));
    }

    #[test]
    fn clear_empties() {
        let mut h = HistoryLedger::default();
        h.append(entry("a", 0));
        h.clear();
        assert!(h.is_empty());
        assert_eq!(h.capacity(), 30);
    }
}
