use std::fmt;

use serde::{Deserialize, Serialize};

use super::VocabularyPool;

/// Number of options shown for every question.
pub const NUM_OPTIONS: usize = 4;

/// Offset added to a pool index when synthesising ids for vocabulary questions.
pub const SYNTHETIC_ID_OFFSET: usize = 9999;

/// Identifier of a quiz question.
///
/// Bank ids and synthesised ids live in separate variants so they never collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum QuestionId {
    Bank(String),
    Synthesized(usize),
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionId::Bank(id) => write!(f, "{}", id),
            QuestionId::Synthesized(id) => write!(f, "#{}", id),
        }
    }
}

/// Which attribute a question asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    Reading,
    Meaning,
    /// Taken as-is from a pre-built bank.
    Bank,
}

/// A multiple-choice question. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizQuestion {
    id: QuestionId,
    kind: QuestionKind,
    prompt: String,
    options: [String; NUM_OPTIONS],
    correct_answer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    explanation: Option<String>,
}

impl QuizQuestion {
    pub(crate) fn new(
        id: QuestionId,
        kind: QuestionKind,
        prompt: String,
        options: [String; NUM_OPTIONS],
        correct_answer: String,
        explanation: Option<String>,
    ) -> Self {
        debug_assert!(options.contains(&correct_answer));
        Self {
            id,
            kind,
            prompt,
            options,
            correct_answer,
            explanation,
        }
    }

    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    pub fn kind(&self) -> QuestionKind {
        self.kind
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn options(&self) -> &[String; NUM_OPTIONS] {
        &self.options
    }

    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    /// Slot of the correct answer within `options`.
    pub fn correct_index(&self) -> usize {
        self.options
            .iter()
            .position(|option| *option == self.correct_answer)
            .unwrap_or_default()
    }

    pub fn explanation(&self) -> Option<&str> {
        self.explanation.as_deref()
    }
}

/// Bank ids appear both as strings ("v1-1") and as plain numbers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
enum RawBankId {
    Number(u64),
    Text(String),
}

impl From<RawBankId> for String {
    fn from(id: RawBankId) -> Self {
        match id {
            RawBankId::Number(n) => n.to_string(),
            RawBankId::Text(s) => s,
        }
    }
}

/// A ready-made question record from a question bank.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BankQuestion {
    #[serde(deserialize_with = "deserialize_bank_id")]
    pub id: String,
    #[serde(alias = "q")]
    pub prompt: String,
    pub options: Vec<String>,
    #[serde(alias = "a")]
    pub answer: String,
    #[serde(default)]
    pub explanation: Option<String>,
}

fn deserialize_bank_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    RawBankId::deserialize(deserializer).map(String::from)
}

impl BankQuestion {
    pub fn new(
        id: impl Into<String>,
        prompt: impl Into<String>,
        options: Vec<String>,
        answer: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            prompt: prompt.into(),
            options,
            answer: answer.into(),
            explanation: None,
        }
    }

    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = Some(explanation.into());
        self
    }
}

/// Where a session draws its questions from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionSource {
    /// Raw vocabulary; options are synthesised from the rest of the pool.
    Vocabulary(VocabularyPool),
    /// Pre-built questions that already carry their options.
    Bank(Vec<BankQuestion>),
}

impl QuestionSource {
    /// Number of questions the source can ask.
    pub fn len(&self) -> usize {
        match self {
            QuestionSource::Vocabulary(pool) => pool.question_indices().len(),
            QuestionSource::Bank(questions) => questions.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn vocabulary(&self) -> Option<&VocabularyPool> {
        match self {
            QuestionSource::Vocabulary(pool) => Some(pool),
            QuestionSource::Bank(_) => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            QuestionSource::Vocabulary(_) => "Vocabulary",
            QuestionSource::Bank(_) => "Question bank",
        }
    }
}
