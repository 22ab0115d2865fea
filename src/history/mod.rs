pub mod storage;
pub mod types;

pub use storage::{load_history, save_history, SCORES_KEY};
pub use types::{HistoryState, ScoreRecord, HISTORY_VERSION};
