pub mod formatter;

pub use formatter::{
    format_age, format_breakdown, format_date, format_history_table, format_raw_scores,
    format_record_detail, format_results, should_use_colors,
};
