use chrono::{DateTime, Duration, Local, Utc};
use owo_colors::OwoColorize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::history::ScoreRecord;
use crate::input::{RawScores, LISTENING_PARTS, READING_PARTS, SPEAKING_MAX, WRITING_MAX};
use crate::scoring::{cefr_for_paper, CalculatedScores, Grade, Paper, PaperContribution};

/// Widest paper label ("Reading & Use of English")
const LABEL_WIDTH: usize = 24;
const MAX_RULE_WIDTH: usize = 40;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

fn rule() -> String {
    let width = get_terminal_width()
        .map(|w| w.min(MAX_RULE_WIDTH))
        .unwrap_or(MAX_RULE_WIDTH);
    "-".repeat(width)
}

/// Color a grade label: A green, B cyan, C yellow, anything else bright red
fn paint_grade(grade: Grade, use_colors: bool) -> String {
    let text = grade.as_str();
    if !use_colors {
        return text.to_string();
    }
    match grade {
        Grade::A => text.green().bold().to_string(),
        Grade::B => text.cyan().bold().to_string(),
        Grade::C => text.yellow().bold().to_string(),
        Grade::LevelB1 | Grade::Fail => text.bright_red().bold().to_string(),
    }
}

/// Format calculated scores: one line per paper with its CEFR band, then the
/// overall score, grade and CEFR.
pub fn format_results(scores: &CalculatedScores, use_colors: bool) -> String {
    let mut lines: Vec<String> = Paper::ALL
        .iter()
        .map(|&paper| {
            let scale = scores.scale_for(paper);
            let cefr = cefr_for_paper(scale);
            if use_colors {
                format!(
                    "{:<width$}  {:>3}  {}",
                    paper.label(),
                    scale.bold(),
                    format!("({})", cefr).dimmed(),
                    width = LABEL_WIDTH
                )
            } else {
                format!(
                    "{:<width$}  {:>3}  ({})",
                    paper.label(),
                    scale,
                    cefr,
                    width = LABEL_WIDTH
                )
            }
        })
        .collect();

    lines.push(rule());

    let overall = if use_colors {
        scores.overall.bold().to_string()
    } else {
        scores.overall.to_string()
    };
    lines.push(format!("{:<width$}  {:>3}", "Overall", overall, width = LABEL_WIDTH));
    lines.push(format!(
        "{:<width$}  {}",
        "Grade",
        paint_grade(scores.grade, use_colors),
        width = LABEL_WIDTH
    ));
    lines.push(format!("{:<width$}  {}", "CEFR", scores.cefr, width = LABEL_WIDTH));

    lines.join("\n")
}

/// Format the raw-to-scale conversion per paper (for verbose mode)
pub fn format_breakdown(breakdown: &[PaperContribution]) -> String {
    breakdown
        .iter()
        .map(|c| {
            format!(
                "  {:<width$}  raw {:>2}/{:<2} -> {}",
                c.paper.label(),
                c.raw,
                c.total,
                c.scale,
                width = LABEL_WIDTH
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a record timestamp in local time ("2024-03-01 14:05")
pub fn format_date(date: DateTime<Utc>) -> String {
    date.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

/// Format a duration into a human-readable age string
/// "2h" for hours, "3d" for days, "1w" for weeks
pub fn format_age(duration: Duration) -> String {
    let hours = duration.num_hours();
    let days = duration.num_days();
    let weeks = days / 7;

    if weeks >= 1 {
        format!("{}w", weeks)
    } else if days >= 1 {
        format!("{}d", days)
    } else if hours >= 1 {
        format!("{}h", hours)
    } else {
        let minutes = duration.num_minutes();
        if minutes >= 1 {
            format!("{}m", minutes)
        } else {
            "now".to_string()
        }
    }
}

/// Format saved records as a table with columns: Id, Date, Age, Overall, Grade, CEFR
/// Records are shown in the order given (callers pass newest first).
pub fn format_history_table(records: &[&ScoreRecord], use_colors: bool) -> String {
    if records.is_empty() {
        return "No saved scores.".to_string();
    }

    let now = Utc::now();
    let header = format!(
        "{:>4}  {:<16}  {:>4}  {:>7}  {:<8}  {}",
        "Id", "Date", "Age", "Overall", "Grade", "CEFR"
    );
    let header = if use_colors {
        header.bold().to_string()
    } else {
        header
    };

    let rows = records.iter().map(|record| {
        let grade = paint_grade(record.results.grade, use_colors);
        // Pad on the plain label; escape codes would skew the width.
        let padding = " ".repeat(8usize.saturating_sub(record.results.grade.as_str().len()));
        format!(
            "{:>4}  {:<16}  {:>4}  {:>7}  {}{}  {}",
            record.id,
            format_date(record.date),
            format_age(now - record.date),
            record.results.overall,
            grade,
            padding,
            record.results.cefr
        )
    });

    std::iter::once(header)
        .chain(rows)
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_parts(label: &str, values: &[u32], maxes: &[u32]) -> Vec<String> {
    let mut lines = vec![format!("  {}", label)];
    if values.len() == 1 {
        lines.push(format!("    Total: {} / {}", values[0], maxes[0]));
    } else {
        lines.extend(
            values
                .iter()
                .zip(maxes)
                .enumerate()
                .map(|(i, (v, m))| format!("    Part {}: {} / {}", i + 1, v, m)),
        );
    }
    lines
}

/// Format the raw part breakdown of a saved record
pub fn format_raw_scores(raw: &RawScores) -> String {
    let mut lines = Vec::new();
    lines.extend(format_parts(
        Paper::ReadingAndUseOfEnglish.label(),
        &raw.reading_and_use_of_english,
        &READING_PARTS.map(|p| p.max),
    ));
    lines.extend(format_parts(Paper::Writing.label(), &[raw.writing], &[WRITING_MAX]));
    lines.extend(format_parts(
        Paper::Listening.label(),
        &raw.listening,
        &LISTENING_PARTS.map(|p| p.max),
    ));
    lines.extend(format_parts(Paper::Speaking.label(), &[raw.speaking], &[SPEAKING_MAX]));
    lines.join("\n")
}

/// Format a single saved record with results and raw breakdown
pub fn format_record_detail(record: &ScoreRecord, use_colors: bool) -> String {
    let title = format!("Score #{} - {}", record.id, format_date(record.date));
    let title = if use_colors {
        title.bold().to_string()
    } else {
        title
    };
    format!(
        "{}\n\n{}\n\nScore Breakdown\n{}",
        title,
        format_results(&record.results, use_colors),
        format_raw_scores(&record.raw_scores)
    )
}
