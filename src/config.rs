//! Quiz configuration resolved from the command line.

use std::path::PathBuf;

pub const DEFAULT_QUESTION_COUNT: usize = 20;

/// Setup screen bounds on the requested count.
pub const MIN_SETUP_COUNT: usize = 5;
pub const MAX_SETUP_COUNT: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizConfig {
    /// Requested questions per session.
    pub question_count: usize,
    /// Fixed seed; drawn from entropy when absent.
    pub seed: Option<u64>,
    /// Where to write the last session result as JSON.
    pub export_path: Option<PathBuf>,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            question_count: DEFAULT_QUESTION_COUNT,
            seed: None,
            export_path: None,
        }
    }
}

/// Inclusive range the setup screen offers for a source of `source_len` items.
pub fn count_bounds(source_len: usize) -> (usize, usize) {
    (
        MIN_SETUP_COUNT.min(source_len),
        MAX_SETUP_COUNT.min(source_len),
    )
}

/// Fit a requested count into [`count_bounds`].
pub fn clamp_count(requested: usize, source_len: usize) -> usize {
    let (min, max) = count_bounds(source_len);
    requested.clamp(min, max)
}
