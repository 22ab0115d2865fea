use std::fmt;

/// The four papers of the B2 First exam.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Paper {
    ReadingAndUseOfEnglish,
    Writing,
    Listening,
    Speaking,
}

impl Paper {
    pub const ALL: [Paper; 4] = [
        Paper::ReadingAndUseOfEnglish,
        Paper::Writing,
        Paper::Listening,
        Paper::Speaking,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Paper::ReadingAndUseOfEnglish => "Reading & Use of English",
            Paper::Writing => "Writing",
            Paper::Listening => "Listening",
            Paper::Speaking => "Speaking",
        }
    }

    /// Key used for this paper in the config file.
    pub fn config_key(&self) -> &'static str {
        match self {
            Paper::ReadingAndUseOfEnglish => "reading_and_use_of_english",
            Paper::Writing => "writing",
            Paper::Listening => "listening",
            Paper::Speaking => "speaking",
        }
    }

    /// Highest weighted raw score attainable on the paper.
    pub fn total_raw_max(&self) -> u32 {
        match self {
            Paper::ReadingAndUseOfEnglish => 70,
            Paper::Writing => 40,
            Paper::Listening => 30,
            Paper::Speaking => 60,
        }
    }
}

impl fmt::Display for Paper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
