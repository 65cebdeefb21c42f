//! Error types for quiz sessions.

use thiserror::Error;

/// Inputs that cannot produce a playable session.
///
/// Raised by `QuizSession::begin`; the caller has to change the pool or the
/// count before trying again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConfigurationError {
    #[error("not enough items to quiz: the pool is empty")]
    EmptyPool,
    #[error("requested question count must be at least 1")]
    ZeroCount,
    #[error(
        "insufficient pool size for distractor generation: need at least {required} items, found {found}"
    )]
    InsufficientPool { required: usize, found: usize },
    #[error("duplicate surface form in pool: {0}")]
    DuplicateSurfaceForm(String),
    #[error("not enough distinct options to build a question for {prompt}")]
    InsufficientDistinctOptions { prompt: String },
    #[error("question {id} is malformed: {reason}")]
    MalformedQuestion { id: String, reason: String },
}

/// The caller broke the forward-only answering contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum InvalidStateError {
    #[error("session already finished")]
    Finished,
    #[error("answer for question {got} out of sequence, expected {expected}")]
    OutOfSequence { expected: usize, got: usize },
}

/// Any error a session can report.
///
/// Lets code that drives a whole session propagate both kinds with `?`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    InvalidState(#[from] InvalidStateError),
}
