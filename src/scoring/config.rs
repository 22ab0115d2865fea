use serde::{Deserialize, Serialize};

use super::conversion::ConversionPoints;
use super::paper::Paper;

/// Conversion points for every paper.
///
/// The published conversion tables are not public, so these thresholds are
/// estimates and can be overridden per paper in the config file. A paper left
/// out falls back to its default.
///
/// Example YAML:
/// ```yaml
/// scoring:
///   reading_and_use_of_english: { low: 25, pass: 42, high: 63, total: 70 }
///   writing: { low: 14, pass: 24, high: 36, total: 40 }
///   listening: { low: 10, pass: 18, high: 27, total: 30 }
///   speaking: { low: 21, pass: 36, high: 54, total: 60 }
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    #[serde(default)]
    pub reading_and_use_of_english: Option<PaperConfig>,

    #[serde(default)]
    pub writing: Option<PaperConfig>,

    #[serde(default)]
    pub listening: Option<PaperConfig>,

    #[serde(default)]
    pub speaking: Option<PaperConfig>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            reading_and_use_of_english: Some(PaperConfig::default_for(Paper::ReadingAndUseOfEnglish)),
            writing: Some(PaperConfig::default_for(Paper::Writing)),
            listening: Some(PaperConfig::default_for(Paper::Listening)),
            speaking: Some(PaperConfig::default_for(Paper::Speaking)),
        }
    }
}

impl ScoringConfig {
    /// Effective settings for a paper, falling back to the built-in estimate.
    pub fn paper(&self, paper: Paper) -> PaperConfig {
        let configured = match paper {
            Paper::ReadingAndUseOfEnglish => self.reading_and_use_of_english,
            Paper::Writing => self.writing,
            Paper::Listening => self.listening,
            Paper::Speaking => self.speaking,
        };
        configured.unwrap_or_else(|| PaperConfig::default_for(paper))
    }

    /// Replace the settings for one paper.
    pub fn set_paper(&mut self, paper: Paper, value: PaperConfig) {
        let slot = match paper {
            Paper::ReadingAndUseOfEnglish => &mut self.reading_and_use_of_english,
            Paper::Writing => &mut self.writing,
            Paper::Listening => &mut self.listening,
            Paper::Speaking => &mut self.speaking,
        };
        *slot = Some(value);
    }
}

/// Conversion thresholds and raw maximum for one paper.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PaperConfig {
    /// Raw score mapped to 140
    pub low: u32,

    /// Raw score mapped to 160
    pub pass: u32,

    /// Raw score mapped to 180
    pub high: u32,

    /// Highest attainable raw score, mapped to 190. Must match the paper.
    pub total: u32,
}

impl PaperConfig {
    pub fn default_for(paper: Paper) -> Self {
        let (low, pass, high) = match paper {
            Paper::ReadingAndUseOfEnglish => (25, 42, 63),
            Paper::Writing => (14, 24, 36),
            Paper::Listening => (10, 18, 27),
            Paper::Speaking => (21, 36, 54),
        };
        Self {
            low,
            pass,
            high,
            total: paper.total_raw_max(),
        }
    }

    pub fn points(&self) -> ConversionPoints {
        ConversionPoints::new(self.low, self.pass, self.high)
    }
}
