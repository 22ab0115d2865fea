pub mod parse;
pub mod raw;

pub use parse::parse_non_negative_int_or_zero;
pub use raw::{
    PartLimit, RawScores, RawScoresText, LISTENING_PARTS, READING_PARTS, SPEAKING_MAX,
    WRITING_MAX,
};
