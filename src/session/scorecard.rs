use crate::models::{AnswerLog, QuizQuestion, SessionResult};

/// Accumulates answer logs and the running score.
#[derive(Debug, Default)]
pub(crate) struct Scorecard {
    score: usize,
    history: Vec<AnswerLog>,
}

impl Scorecard {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            score: 0,
            history: Vec::with_capacity(capacity),
        }
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn history(&self) -> &[AnswerLog] {
        &self.history
    }

    /// Log a chosen option and return whether it was correct.
    pub fn record(&mut self, question: &QuizQuestion, chosen: &str) -> bool {
        let log = AnswerLog::answered(question.clone(), chosen);
        let is_correct = log.is_correct;
        if is_correct {
            self.score += 1;
        }
        self.history.push(log);
        is_correct
    }

    /// Log every question in `remaining` as unanswered.
    pub fn fail_remaining(&mut self, remaining: &[QuizQuestion]) {
        self.history
            .extend(remaining.iter().cloned().map(AnswerLog::unanswered));
    }

    /// Snapshot of the final score and logs. The card keeps its own copy.
    pub fn finish(&self) -> SessionResult {
        SessionResult {
            score: self.score,
            history: self.history.clone(),
        }
    }
}
