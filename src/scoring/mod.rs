pub mod classify;
pub mod config;
pub mod conversion;
pub mod engine;
pub mod paper;
pub mod validation;

pub use classify::{cefr_for_paper, classify, Cefr, Classification, Grade};
pub use config::*;
pub use conversion::{convert_raw_to_scale, ConversionPoints};
pub use engine::{calculate_score, compute_overall, CalculatedScores, PaperContribution, ScoreResult};
pub use paper::Paper;
pub use validation::validate_scoring;
