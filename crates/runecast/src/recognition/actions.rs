use std::collections::{HashMap, VecDeque};
use serde::{Deserialize, Serialize};
use crate::api::types::Timestamp;

/// Maximum dispatch records kept.
pub const ACTION_LOG_CAPACITY: usize = 100;

/// One attempt to hand a pattern's action to the dispatcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionRecord {
    pub pattern_id: String,
    pub action: String,
    pub score: f32,
    pub succeeded: bool,
    pub timestamp: Timestamp,
}

/// Aggregates over the action log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionStats {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    pub average_confidence: f32,
}

/// Remaining cooldown of one pattern.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CooldownStatus {
    pub pattern_id: String,
    pub remaining_ms: u64,
}

/// Dispatch log and per-pattern cooldown tracker.
#[derive(Debug, Clone)]
pub struct ActionLog {
    records: VecDeque<ActionRecord>,
    capacity: usize,
    /// pattern id -> time the cooldown ends
    cooldowns: HashMap<String, Timestamp>,
}

impl ActionLog {
    pub fn new() -> Self {
        Self::with_capacity(ACTION_LOG_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: VecDeque::new(),
            capacity,
            cooldowns: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn is_on_cooldown(&self, pattern_id: &str, now: Timestamp) -> bool {
        self.cooldowns.get(pattern_id).is_some_and(|&until| now < until)
    }

    /// Block the pattern's action until `now + duration_ms`. A zero duration clears it.
    pub fn start_cooldown(&mut self, pattern_id: &str, duration_ms: u64, now: Timestamp) {
        if duration_ms == 0 {
            self.cooldowns.remove(pattern_id);
        } else {
            self.cooldowns.insert(pattern_id.to_string(), now.saturating_add(duration_ms));
        }
    }

    /// Log a dispatch, newest first, evicting the oldest past capacity.
    pub fn record(&mut self, record: ActionRecord) {
        self.records.push_front(record);
        self.records.truncate(self.capacity);
    }

    pub fn recent(&self, n: usize) -> Vec<ActionRecord> {
        self.records.iter().take(n).cloned().collect()
    }

    pub fn stats(&self) -> ActionStats {
        let total = self.records.len();
        let successful = self.records.iter().filter(|r| r.succeeded).count();
        let average_confidence = if total == 0 {
            0.0
        } else {
            self.records.iter().map(|r| r.score).sum::<f32>() / total as f32
        };
        ActionStats {
            total,
            successful,
            failed: total - successful,
            average_confidence,
        }
    }

    /// Patterns still cooling down at `now`, sorted by id.
    pub fn cooldown_status(&self, now: Timestamp) -> Vec<CooldownStatus> {
        let mut out: Vec<_> = self
            .cooldowns
            .iter()
            .filter(|(_, &until)| now < until)
            .map(|(id, &until)| CooldownStatus {
                pattern_id: id.clone(),
                remaining_ms: until - now,
            })
            .collect();
        out.sort_by(|a, b| a.pattern_id.cmp(&b.pattern_id));
        out
    }

    pub fn active_cooldowns(&self, now: Timestamp) -> usize {
        self.cooldowns.values().filter(|&&until| now < until).count()
    }

    /// Forget all records and cooldowns.
    pub fn clear(&mut self) {
        self.records.clear();
        self.cooldowns.clear();
    }

    pub fn export_all(&self) -> Vec<ActionRecord> {
        self.records.iter().cloned().collect()
    }

    /// Replace the records (newest first). Cooldowns are runtime-only and left alone.
    pub fn import_all(&mut self, records: Vec<ActionRecord>) {
        self.records = records.into_iter().take(self.capacity).collect();
    }
}

impl Default for ActionLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(id: &str, score: f32, ok: bool) -> ActionRecord {
        ActionRecord {
            pattern_id: id.into(),
            action: "open portal".into(),
            score,
            succeeded: ok,
            timestamp: 0,
        }
    }

    #[test]
    fn cooldown_expires() {
        let mut log = ActionLog::new();
        log.start_cooldown("circle", 1000, 5_000);
        assert!(log.is_on_cooldown("circle", 5_000));
        assert!(log.is_on_cooldown("circle", 5_999));
        assert!(!log.is_on_cooldown("circle", 6_000));
        assert!(!log.is_on_cooldown("zigzag", 5_000));
    }

    #[test]
    fn zero_cooldown_never_blocks() {
        let mut log = ActionLog::new();
        log.start_cooldown("wave", 0, 10);
        assert!(!log.is_on_cooldown("wave", 10));
        assert_eq!(log.active_cooldowns(10), 0);
    }

    #[test]
    fn status_reports_remaining() {
        let mut log = ActionLog::new();
        log.start_cooldown("star", 5000, 0);
        log.start_cooldown("circle", 1000, 0);
        let status = log.cooldown_status(400);
        assert_eq!(status.len(), 2);
        assert_eq!(status[0].pattern_id, "circle");
        assert_eq!(status[0].remaining_ms, 600);
        assert_eq!(status[1].remaining_ms, 4600);
        assert_eq!(log.cooldown_status(2000).len(), 1);
    }

    #[test]
    fn bounded_and_newest_first() {
        let mut log = ActionLog::new();
        for i in 0..120 {
            let mut r = rec("circle", 0.8, true);
            r.timestamp = i;
            log.record(r);
        }
        assert_eq!(log.len(), ACTION_LOG_CAPACITY);
        assert_eq!(log.recent(1)[0].timestamp, 119);
    }

    #[test]
    fn stats_split_outcomes() {
        let mut log = ActionLog::new();
        assert_eq!(log.stats(), ActionStats::default());
        log.record(rec("circle", 1.0, true));
        log.record(rec("zigzag", 0.5, false));
        let s = log.stats();
        assert_eq!(s.total, 2);
        assert_eq!(s.successful, 1);
        assert_eq!(s.failed, 1);
        assert!((s.average_confidence - 0.75).abs() < 1e-6);
    }

    #[test]
    fn clear_resets_everything() {
        let mut log = ActionLog::new();
        log.record(rec("circle", 1.0, true));
        log.start_cooldown("circle", 1000, 0);
        log.clear();
        assert!(log.is_empty());
        assert!(!log.is_on_cooldown("circle", 0));
    }
}
