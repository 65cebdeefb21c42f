mod question;
mod result;
mod vocabulary;

pub use question::{
    BankQuestion, NUM_OPTIONS, QuestionId, QuestionKind, QuestionSource, QuizQuestion,
    SYNTHETIC_ID_OFFSET,
};
pub use result::{AnswerLog, SessionResult, UNANSWERED, UserAnswer};
pub use vocabulary::{VocabularyItem, VocabularyPool};

/// Screen the terminal application is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Welcome,
    Quiz,
    Result,
}
