use anyhow::{Context, Result};

use super::types::{HistoryState, HISTORY_VERSION};
use crate::store::{load_json, save_json, KeyValueStore};

/// Store key holding every user's score history
pub const SCORES_KEY: &str = "fce_scores";

/// Load score history from the store
///
/// If nothing has been saved yet, returns a new empty state.
/// If the stored state has an unsupported version, returns an error.
pub fn load_history<S: KeyValueStore + ?Sized>(store: &S) -> Result<HistoryState> {
    let state: HistoryState = match load_json(store, SCORES_KEY).context("Failed to load score history")? {
        Some(state) => state,
        None => return Ok(HistoryState::new()),
    };

    if state.version != HISTORY_VERSION {
        anyhow::bail!("Unsupported score history version: {}", state.version);
    }

    Ok(state)
}

/// Save score history to the store
pub fn save_history<S: KeyValueStore + ?Sized>(store: &mut S, state: &HistoryState) -> Result<()> {
    save_json(store, SCORES_KEY, state).context("Failed to save score history")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::RawScores;
    use crate::scoring::{compute_overall, ScoringConfig};
    use crate::store::{FileStore, MemoryStore};
    use chrono::Utc;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_returns_empty() {
        let store = MemoryStore::new();
        let state = load_history(&store).unwrap();
        assert_eq!(state.version, 1);
        assert!(state.scores.is_empty());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let mut store = FileStore::new(dir.path());

        let raw = RawScores {
            reading_and_use_of_english: [8, 7, 6, 5, 4, 3, 9],
            writing: 30,
            listening: [7, 8, 4, 6],
            speaking: 48,
        };
        let results = compute_overall(&raw, &ScoringConfig::default());
        let mut state = HistoryState::new();
        let saved = state.add("alice", raw, results, Utc::now());

        save_history(&mut store, &state).unwrap();
        let loaded = load_history(&store).unwrap();

        assert_eq!(loaded.version, 1);
        assert_eq!(loaded.find("alice", saved.id), Some(&saved));
    }

    #[test]
    fn test_unsupported_version_rejected() {
        let mut store = MemoryStore::new();
        store
            .set(SCORES_KEY, r#"{"version": 2, "scores": {}}"#)
            .unwrap();
        let err = load_history(&store).unwrap_err();
        assert!(err.to_string().contains("Unsupported score history version"));
    }
}
