//! B2 First score calculator.
//!
//! Converts raw paper scores to the Cambridge English Scale, classifies the
//! overall result into a grade and CEFR band, and keeps per-user score
//! history in a local key-value store.

pub mod accounts;
pub mod config;
pub mod history;
pub mod input;
pub mod output;
pub mod scoring;
pub mod store;
