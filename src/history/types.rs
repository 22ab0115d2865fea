use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::input::RawScores;
use crate::scoring::CalculatedScores;

pub const HISTORY_VERSION: u32 = 1;

/// Saved score history for every user, keyed by username.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryState {
    pub version: u32,
    #[serde(default)]
    pub scores: HashMap<String, Vec<ScoreRecord>>,
}

/// One saved calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRecord {
    pub id: u64,
    pub date: DateTime<Utc>,
    pub raw_scores: RawScores,
    pub results: CalculatedScores,
}

impl Default for HistoryState {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryState {
    /// Create a new empty history with the current version
    pub fn new() -> Self {
        Self {
            version: HISTORY_VERSION,
            scores: HashMap::new(),
        }
    }

    /// Append a record for `user`. Ids start at 1 and continue from the
    /// highest existing id, so they are never reused while records remain.
    pub fn add(
        &mut self,
        user: &str,
        raw_scores: RawScores,
        results: CalculatedScores,
        date: DateTime<Utc>,
    ) -> ScoreRecord {
        let records = self.scores.entry(user.to_string()).or_default();
        let id = records.iter().map(|r| r.id).max().map_or(1, |max| max + 1);
        let record = ScoreRecord {
            id,
            date,
            raw_scores,
            results,
        };
        records.push(record.clone());
        record
    }

    /// A user's records, newest first. Records with the same date keep
    /// insertion order reversed (higher id first).
    pub fn records_for(&self, user: &str) -> Vec<&ScoreRecord> {
        let mut records: Vec<&ScoreRecord> = self
            .scores
            .get(user)
            .map(|r| r.iter().collect())
            .unwrap_or_default();
        records.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        records
    }

    pub fn find(&self, user: &str, id: u64) -> Option<&ScoreRecord> {
        self.scores.get(user)?.iter().find(|r| r.id == id)
    }

    /// Remove all of a user's records. Returns how many were removed.
    pub fn clear(&mut self, user: &str) -> usize {
        self.scores.remove(user).map_or(0, |r| r.len())
    }
}
