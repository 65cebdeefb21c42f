use std::fmt;

use serde::{Serialize, Serializer};

use super::QuizQuestion;

/// Marker recorded for questions left open when a session is turned in early.
pub const UNANSWERED: &str = "unanswered";

/// What the user picked for a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAnswer {
    Chosen(String),
    Unanswered,
}

impl UserAnswer {
    pub fn as_str(&self) -> &str {
        match self {
            UserAnswer::Chosen(option) => option,
            UserAnswer::Unanswered => UNANSWERED,
        }
    }

    pub fn is_answered(&self) -> bool {
        matches!(self, UserAnswer::Chosen(_))
    }
}

impl fmt::Display for UserAnswer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for UserAnswer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One entry of the session history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerLog {
    pub question: QuizQuestion,
    pub user_answer: UserAnswer,
    pub correct_answer: String,
    pub is_correct: bool,
}

impl AnswerLog {
    pub(crate) fn answered(question: QuizQuestion, chosen: &str) -> Self {
        let correct_answer = question.correct_answer().to_string();
        let is_correct = chosen == correct_answer;
        Self {
            question,
            user_answer: UserAnswer::Chosen(chosen.to_string()),
            correct_answer,
            is_correct,
        }
    }

    pub(crate) fn unanswered(question: QuizQuestion) -> Self {
        let correct_answer = question.correct_answer().to_string();
        Self {
            question,
            user_answer: UserAnswer::Unanswered,
            correct_answer,
            is_correct: false,
        }
    }
}

/// Final score and history of a finished session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionResult {
    pub score: usize,
    pub history: Vec<AnswerLog>,
}

impl SessionResult {
    /// Number of questions presented.
    pub fn total(&self) -> usize {
        self.history.len()
    }

    /// Number of questions the user actually answered.
    pub fn answered(&self) -> usize {
        self.history
            .iter()
            .filter(|log| log.user_answer.is_answered())
            .count()
    }

    pub fn percentage(&self) -> f64 {
        if self.history.is_empty() {
            0.0
        } else {
            (self.score as f64 / self.history.len() as f64) * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unanswered_serializes_as_marker() {
        let json = serde_json::to_string(&UserAnswer::Unanswered).unwrap();
        assert_eq!(json, "\"unanswered\"");
        assert_eq!(UserAnswer::Chosen("は".into()).to_string(), "は");
    }
}
