use serde::{Deserialize, Serialize};
use std::fmt;

/// Overall grade for the exam.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    #[serde(rename = "Level B1")]
    LevelB1,
    Fail,
}

impl Grade {
    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::LevelB1 => "Level B1",
            Grade::Fail => "Fail",
        }
    }

    /// True for the grades that award the B2 First certificate.
    pub fn is_pass(&self) -> bool {
        matches!(self, Grade::A | Grade::B | Grade::C)
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// CEFR band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cefr {
    C1,
    B2,
    B1,
    #[serde(rename = "Below B1")]
    BelowB1,
}

impl Cefr {
    pub fn as_str(&self) -> &'static str {
        match self {
            Cefr::C1 => "C1",
            Cefr::B2 => "B2",
            Cefr::B1 => "B1",
            Cefr::BelowB1 => "Below B1",
        }
    }
}

impl fmt::Display for Cefr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub grade: Grade,
    pub cefr: Cefr,
}

/// Classify an overall scale score. Thresholds are checked high to low and
/// the first match wins.
///
/// | Overall | Grade    | CEFR     |
/// |---------|----------|----------|
/// | >= 180  | A        | C1       |
/// | >= 173  | B        | B2       |
/// | >= 160  | C        | B2       |
/// | >= 140  | Level B1 | B1       |
/// | < 140   | Fail     | Below B1 |
pub fn classify(overall: u32) -> Classification {
    let (grade, cefr) = match overall {
        s if s >= 180 => (Grade::A, Cefr::C1),
        s if s >= 173 => (Grade::B, Cefr::B2),
        s if s >= 160 => (Grade::C, Cefr::B2),
        s if s >= 140 => (Grade::LevelB1, Cefr::B1),
        _ => (Grade::Fail, Cefr::BelowB1),
    };
    Classification { grade, cefr }
}

/// CEFR band reported next to a single paper's scale score.
pub fn cefr_for_paper(scaled: u32) -> Cefr {
    match scaled {
        s if s >= 180 => Cefr::C1,
        s if s >= 160 => Cefr::B2,
        s if s >= 140 => Cefr::B1,
        _ => Cefr::BelowB1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(overall: u32) -> (Grade, Cefr) {
        let c = classify(overall);
        (c.grade, c.cefr)
    }

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(pair(190), (Grade::A, Cefr::C1));
        assert_eq!(pair(180), (Grade::A, Cefr::C1));
        assert_eq!(pair(179), (Grade::B, Cefr::B2));
        assert_eq!(pair(173), (Grade::B, Cefr::B2));
        assert_eq!(pair(172), (Grade::C, Cefr::B2));
        assert_eq!(pair(160), (Grade::C, Cefr::B2));
        assert_eq!(pair(159), (Grade::LevelB1, Cefr::B1));
        assert_eq!(pair(140), (Grade::LevelB1, Cefr::B1));
        assert_eq!(pair(139), (Grade::Fail, Cefr::BelowB1));
        assert_eq!(pair(122), (Grade::Fail, Cefr::BelowB1));
    }

    #[test]
    fn test_cefr_for_paper_boundaries() {
        assert_eq!(cefr_for_paper(180), Cefr::C1);
        assert_eq!(cefr_for_paper(179), Cefr::B2);
        assert_eq!(cefr_for_paper(160), Cefr::B2);
        assert_eq!(cefr_for_paper(159), Cefr::B1);
        assert_eq!(cefr_for_paper(140), Cefr::B1);
        assert_eq!(cefr_for_paper(139), Cefr::BelowB1);
    }

    #[test]
    fn test_labels_match_display_strings() {
        assert_eq!(Grade::LevelB1.to_string(), "Level B1");
        assert_eq!(Cefr::BelowB1.to_string(), "Below B1");
        assert_eq!(serde_json::to_string(&Grade::LevelB1).unwrap(), "\"Level B1\"");
        assert_eq!(serde_json::to_string(&Cefr::BelowB1).unwrap(), "\"Below B1\"");
    }

    #[test]
    fn test_is_pass() {
        assert!(Grade::C.is_pass());
        assert!(!Grade::LevelB1.is_pass());
        assert!(!Grade::Fail.is_pass());
    }
}
