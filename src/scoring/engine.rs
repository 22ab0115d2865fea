use serde::{Deserialize, Serialize};

use super::classify::{cefr_for_paper, classify, Cefr, Grade};
use super::config::ScoringConfig;
use super::conversion::convert_raw_to_scale;
use super::paper::Paper;
use crate::input::RawScores;

/// Result of one calculation. Field names serialize in camelCase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatedScores {
    pub reading_and_use_of_english: u32,
    pub writing: u32,
    pub listening: u32,
    pub speaking: u32,
    pub overall: u32,
    pub grade: Grade,
    pub cefr: Cefr,
}

impl CalculatedScores {
    pub fn scale_for(&self, paper: Paper) -> u32 {
        match paper {
            Paper::ReadingAndUseOfEnglish => self.reading_and_use_of_english,
            Paper::Writing => self.writing,
            Paper::Listening => self.listening,
            Paper::Speaking => self.speaking,
        }
    }
}

/// How one paper's scale score was reached.
#[derive(Debug, Clone)]
pub struct PaperContribution {
    pub paper: Paper,
    pub raw: u32,
    pub total: u32,
    pub scale: u32,
    pub cefr: Cefr,
}

#[derive(Debug, Clone)]
pub struct ScoreResult {
    pub scores: CalculatedScores,
    pub breakdown: Vec<PaperContribution>,
}

/// Convert raw scores to scale scores, average them and classify the result.
pub fn compute_overall(raw: &RawScores, config: &ScoringConfig) -> CalculatedScores {
    calculate_score(raw, config).scores
}

/// Same as [`compute_overall`] but keeps the per-paper breakdown for display.
pub fn calculate_score(raw: &RawScores, config: &ScoringConfig) -> ScoreResult {
    let contributions: [PaperContribution; 4] = Paper::ALL.map(|paper| {
        let paper_config = config.paper(paper);
        let raw_total = raw_for(raw, paper);
        let scale = convert_raw_to_scale(raw_total, &paper_config.points(), paper_config.total);
        tracing::debug!(paper = paper.config_key(), raw = raw_total, scale, "converted paper");
        PaperContribution {
            paper,
            raw: raw_total,
            total: paper_config.total,
            scale,
            cefr: cefr_for_paper(scale),
        }
    });

    // Same order as Paper::ALL
    let [reading, writing, listening, speaking] = contributions.each_ref().map(|c| c.scale);

    let sum = f64::from(reading + writing + listening + speaking);
    let overall = (sum / 4.0).round() as u32;
    let classification = classify(overall);
    tracing::debug!(
        overall,
        grade = %classification.grade,
        passed = classification.grade.is_pass(),
        "classified overall score"
    );

    ScoreResult {
        scores: CalculatedScores {
            reading_and_use_of_english: reading,
            writing,
            listening,
            speaking,
            overall,
            grade: classification.grade,
            cefr: classification.cefr,
        },
        breakdown: contributions.to_vec(),
    }
}

fn raw_for(raw: &RawScores, paper: Paper) -> u32 {
    match paper {
        Paper::ReadingAndUseOfEnglish => raw.reading_raw(),
        Paper::Writing => raw.writing_raw(),
        Paper::Listening => raw.listening_raw(),
        Paper::Speaking => raw.speaking_raw(),
    }
}
