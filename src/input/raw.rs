use serde::{Deserialize, Serialize};

use super::parse::parse_non_negative_int_or_zero;

/// Maximum and per-item weight for one exam part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartLimit {
    pub max: u32,
    pub points_per_item: u32,
}

const fn part(max: u32, points_per_item: u32) -> PartLimit {
    PartLimit { max, points_per_item }
}

/// Reading & Use of English parts 1-7. Parts 4-6 score two points per item.
pub const READING_PARTS: [PartLimit; 7] = [
    part(8, 1),
    part(8, 1),
    part(8, 1),
    part(6, 2),
    part(6, 2),
    part(6, 2),
    part(10, 1),
];

pub const WRITING_MAX: u32 = 40;

/// Listening parts 1-4, one mark per item.
pub const LISTENING_PARTS: [PartLimit; 4] = [part(8, 1), part(10, 1), part(5, 1), part(7, 1)];

pub const SPEAKING_MAX: u32 = 60;

/// Raw scores for one exam sitting. Values are counts of correct items per
/// part, already clamped to each part's maximum when built through
/// [`RawScores::from_text`] or [`RawScores::clamped`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawScores {
    pub reading_and_use_of_english: [u32; 7],
    pub writing: u32,
    pub listening: [u32; 4],
    pub speaking: u32,
}

/// Raw scores as typed by the user, before parsing.
#[derive(Debug, Clone, Default)]
pub struct RawScoresText {
    pub reading_and_use_of_english: [String; 7],
    pub writing: String,
    pub listening: [String; 4],
    pub speaking: String,
}

impl RawScores {
    /// Parse user text with the permissive policy and clamp to part maximums.
    pub fn from_text(text: &RawScoresText) -> Self {
        let parsed = Self {
            reading_and_use_of_english: text
                .reading_and_use_of_english
                .each_ref()
                .map(|s| parse_non_negative_int_or_zero(s)),
            writing: parse_non_negative_int_or_zero(&text.writing),
            listening: text.listening.each_ref().map(|s| parse_non_negative_int_or_zero(s)),
            speaking: parse_non_negative_int_or_zero(&text.speaking),
        };
        parsed.clamped()
    }

    /// Copy with every part capped at its maximum.
    pub fn clamped(&self) -> Self {
        let mut out = *self;
        for (value, limit) in out.reading_and_use_of_english.iter_mut().zip(READING_PARTS) {
            *value = (*value).min(limit.max);
        }
        out.writing = out.writing.min(WRITING_MAX);
        for (value, limit) in out.listening.iter_mut().zip(LISTENING_PARTS) {
            *value = (*value).min(limit.max);
        }
        out.speaking = out.speaking.min(SPEAKING_MAX);
        out
    }

    /// Weighted Reading & Use of English total.
    pub fn reading_raw(&self) -> u32 {
        weighted_sum(&self.reading_and_use_of_english, &READING_PARTS)
    }

    pub fn writing_raw(&self) -> u32 {
        self.writing
    }

    pub fn listening_raw(&self) -> u32 {
        weighted_sum(&self.listening, &LISTENING_PARTS)
    }

    pub fn speaking_raw(&self) -> u32 {
        self.speaking
    }
}

fn weighted_sum(values: &[u32], limits: &[PartLimit]) -> u32 {
    values
        .iter()
        .zip(limits)
        .map(|(v, l)| v.saturating_mul(l.points_per_item))
        .fold(0u32, u32::saturating_add)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_marks() -> RawScores {
        RawScores {
            reading_and_use_of_english: READING_PARTS.map(|p| p.max),
            writing: WRITING_MAX,
            listening: LISTENING_PARTS.map(|p| p.max),
            speaking: SPEAKING_MAX,
        }
    }

    #[test]
    fn test_full_marks_reach_paper_maximums() {
        let raw = full_marks();
        // 8 + 8 + 8 + 12 + 12 + 12 + 10
        assert_eq!(raw.reading_raw(), 70);
        assert_eq!(raw.writing_raw(), 40);
        assert_eq!(raw.listening_raw(), 30);
        assert_eq!(raw.speaking_raw(), 60);
    }

    #[test]
    fn test_parts_four_to_six_double_weighted() {
        let raw = RawScores {
            reading_and_use_of_english: [1, 1, 1, 1, 1, 1, 1],
            ..RawScores::default()
        };
        assert_eq!(raw.reading_raw(), 10);
    }

    #[test]
    fn test_clamped_caps_each_part() {
        let raw = RawScores {
            reading_and_use_of_english: [99, 0, 3, 7, 6, 100, 11],
            writing: 41,
            listening: [9, 10, 6, 1],
            speaking: 500,
        }
        .clamped();
        assert_eq!(raw.reading_and_use_of_english, [8, 0, 3, 6, 6, 6, 10]);
        assert_eq!(raw.writing, 40);
        assert_eq!(raw.listening, [8, 10, 5, 1]);
        assert_eq!(raw.speaking, 60);
    }

    #[test]
    fn test_from_text_parses_and_clamps() {
        let text = RawScoresText {
            reading_and_use_of_english: [
                "8".into(),
                "".into(),
                "abc".into(),
                "-2".into(),
                " 5 ".into(),
                "9".into(),
                "7.5".into(),
            ],
            writing: "33".into(),
            listening: ["3".into(), "".into(), "".into(), "70".into()],
            speaking: "45".into(),
        };
        let raw = RawScores::from_text(&text);
        assert_eq!(raw.reading_and_use_of_english, [8, 0, 0, 0, 5, 6, 7]);
        assert_eq!(raw.writing, 33);
        assert_eq!(raw.listening, [3, 0, 0, 7]);
        assert_eq!(raw.speaking, 45);
    }

    #[test]
    fn test_empty_text_is_all_zero() {
        assert_eq!(RawScores::from_text(&RawScoresText::default()), RawScores::default());
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(RawScores::default()).unwrap();
        assert!(json.get("readingAndUseOfEnglish").is_some());
        assert!(json.get("listening").is_some());
    }
}
