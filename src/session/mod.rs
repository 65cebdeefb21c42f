//! Quiz session engine.
//!
//! A [`QuizSession`] turns a [`QuestionSource`] and a requested count into a
//! fixed, shuffled sequence of four-option questions, then scores answers
//! strictly in order. A session ends either when the last question is
//! answered or when it is turned in early, and it yields its
//! [`SessionResult`] exactly once. The finished session still reports the
//! same score and history. Start a new session to retry.

mod distractors;
mod error;
mod sampler;
mod scorecard;

use std::collections::HashSet;

use rand::Rng;

use crate::models::{
    AnswerLog, BankQuestion, NUM_OPTIONS, QuestionId, QuestionKind, QuestionSource, QuizQuestion,
    SessionResult,
};

pub use distractors::MIN_SYNTHESIS_POOL;
pub use error::{ConfigurationError, InvalidStateError, SessionError};
pub use sampler::Sampler;

use scorecard::Scorecard;

/// Lifecycle of a session. No transition leaves `Finished`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Created,
    InProgress,
    Finished,
}

/// Immediate feedback for one answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub is_correct: bool,
    pub correct_answer: String,
}

/// Whether the session continues after an answer.
#[derive(Debug, Clone, PartialEq)]
pub enum Progress {
    Continue,
    Finished(SessionResult),
}

/// Returned by [`QuizSession::answer`].
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerOutcome {
    pub feedback: Feedback,
    pub progress: Progress,
}

impl AnswerOutcome {
    pub fn is_finished(&self) -> bool {
        matches!(self.progress, Progress::Finished(_))
    }
}

/// One quiz attempt.
#[derive(Debug)]
pub struct QuizSession {
    questions: Vec<QuizQuestion>,
    cursor: usize,
    state: SessionState,
    scorecard: Scorecard,
}

impl QuizSession {
    /// Select and build the questions for a new session.
    ///
    /// The count is clamped to the number of questions the source can ask.
    /// Vocabulary sources need at least [`MIN_SYNTHESIS_POOL`] items in the
    /// whole pool so every question gets three distractors; bank sources are
    /// validated in full before any are drawn.
    pub fn begin<R: Rng>(
        source: &QuestionSource,
        requested: usize,
        sampler: &mut Sampler<R>,
    ) -> Result<Self, ConfigurationError> {
        if source.is_empty() {
            return Err(ConfigurationError::EmptyPool);
        }
        if requested == 0 {
            return Err(ConfigurationError::ZeroCount);
        }
        let count = requested.min(source.len()).max(1);

        let questions = match source {
            QuestionSource::Vocabulary(pool) => {
                if pool.len() < MIN_SYNTHESIS_POOL {
                    return Err(ConfigurationError::InsufficientPool {
                        required: MIN_SYNTHESIS_POOL,
                        found: pool.len(),
                    });
                }
                let askable = pool.question_indices();
                sampler
                    .sample_indices(askable.len(), count)
                    .into_iter()
                    .map(|slot| distractors::synthesize(pool, askable[slot], sampler))
                    .collect::<Result<Vec<_>, _>>()?
            }
            QuestionSource::Bank(bank) => {
                let checked = bank
                    .iter()
                    .map(checked_options)
                    .collect::<Result<Vec<_>, _>>()?;
                sampler
                    .sample_indices(bank.len(), count)
                    .into_iter()
                    .map(|index| {
                        let record = &bank[index];
                        let mut options = checked[index].clone();
                        sampler.shuffle(&mut options);
                        QuizQuestion::new(
                            QuestionId::Bank(record.id.clone()),
                            QuestionKind::Bank,
                            record.prompt.clone(),
                            options,
                            record.answer.clone(),
                            record.explanation.clone(),
                        )
                    })
                    .collect::<Vec<_>>()
            }
        };

        log::info!(
            "session started: {} of {} requested questions from {} ({} items)",
            questions.len(),
            requested,
            source.label(),
            source.len()
        );

        Ok(Self {
            scorecard: Scorecard::with_capacity(questions.len()),
            questions,
            cursor: 0,
            state: SessionState::Created,
        })
    }

    /// Answer the question at `index`, which must be the current one.
    ///
    /// Answering the last question finishes the session and hands back the
    /// result in [`Progress::Finished`].
    pub fn answer(
        &mut self,
        index: usize,
        chosen: &str,
    ) -> Result<AnswerOutcome, InvalidStateError> {
        if self.state == SessionState::Finished {
            log::warn!("answer for question {} rejected: session finished", index);
            return Err(InvalidStateError::Finished);
        }
        if index != self.cursor {
            log::warn!(
                "answer for question {} rejected: current question is {}",
                index,
                self.cursor
            );
            return Err(InvalidStateError::OutOfSequence {
                expected: self.cursor,
                got: index,
            });
        }

        let question = &self.questions[self.cursor];
        let is_correct = self.scorecard.record(question, chosen);
        let feedback = Feedback {
            is_correct,
            correct_answer: question.correct_answer().to_string(),
        };
        log::debug!(
            "question {} ({}) answered {:?}, correct: {}",
            self.cursor,
            question.id(),
            chosen,
            is_correct
        );

        self.cursor += 1;
        self.state = SessionState::InProgress;

        let progress = if self.cursor == self.questions.len() {
            Progress::Finished(self.finish())
        } else {
            Progress::Continue
        };

        Ok(AnswerOutcome { feedback, progress })
    }

    /// Turn the session in now. Every open question is logged as unanswered.
    pub fn submit_early(&mut self) -> Result<SessionResult, InvalidStateError> {
        if self.state == SessionState::Finished {
            log::warn!("early submit rejected: session finished");
            return Err(InvalidStateError::Finished);
        }

        log::debug!(
            "turned in early with {} of {} questions open",
            self.remaining(),
            self.questions.len()
        );
        self.scorecard.fail_remaining(&self.questions[self.cursor..]);
        self.cursor = self.questions.len();
        Ok(self.finish())
    }

    fn finish(&mut self) -> SessionResult {
        self.state = SessionState::Finished;
        let result = self.scorecard.finish();
        log::info!("session finished: {}/{}", result.score, result.total());
        result
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    /// The question awaiting an answer, if any.
    pub fn current(&self) -> Option<&QuizQuestion> {
        match self.state {
            SessionState::Finished => None,
            _ => self.questions.get(self.cursor),
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn remaining(&self) -> usize {
        self.questions.len() - self.cursor
    }

    pub fn score(&self) -> usize {
        self.scorecard.score()
    }

    /// Answers logged so far, including unanswered ones after an early submit.
    pub fn history(&self) -> &[AnswerLog] {
        self.scorecard.history()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state == SessionState::Finished
    }
}

/// Check a bank record and return its options as a fixed array.
fn checked_options(record: &BankQuestion) -> Result<[String; NUM_OPTIONS], ConfigurationError> {
    let malformed = |reason: String| ConfigurationError::MalformedQuestion {
        id: record.id.clone(),
        reason,
    };

    let options: [String; NUM_OPTIONS] = record.options.clone().try_into().map_err(|_| {
        malformed(format!(
            "expected {} options, found {}",
            NUM_OPTIONS,
            record.options.len()
        ))
    })?;

    let distinct: HashSet<&str> = options.iter().map(String::as_str).collect();
    if distinct.len() != NUM_OPTIONS {
        return Err(malformed("options are not distinct".to_string()));
    }
    if !distinct.contains(record.answer.as_str()) {
        return Err(malformed(format!(
            "answer {:?} is not among the options",
            record.answer
        )));
    }

    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{UNANSWERED, UserAnswer, VocabularyItem, VocabularyPool};

    fn vocabulary(n: usize) -> QuestionSource {
        let items = (0..n)
            .map(|i| VocabularyItem::new(format!("語{i}"), format!("ご{i}"), format!("word {i}")))
            .collect();
        QuestionSource::Vocabulary(VocabularyPool::new(items).unwrap())
    }

    fn bank() -> QuestionSource {
        let options = || ["は", "が", "を", "に"].map(String::from).to_vec();
        QuestionSource::Bank(vec![
            BankQuestion::new("p1", "わたし（　）がくせいです。", options(), "は"),
            BankQuestion::new("p2", "みず（　）のみます。", options(), "を")
                .with_explanation("を marks the object"),
            BankQuestion::new("p3", "がっこう（　）いきます。", options(), "に"),
        ])
    }

    #[test]
    fn test_begin_clamps_count() {
        let mut sampler = Sampler::seeded(0);
        let session = QuizSession::begin(&vocabulary(10), 100, &mut sampler).unwrap();
        assert_eq!(session.question_count(), 10);
        assert_eq!(session.state(), SessionState::Created);
    }

    #[test]
    fn test_begin_rejects_bad_configuration() {
        let mut sampler = Sampler::seeded(0);
        assert_eq!(
            QuizSession::begin(&vocabulary(0), 5, &mut sampler).unwrap_err(),
            ConfigurationError::EmptyPool
        );
        assert_eq!(
            QuizSession::begin(&vocabulary(3), 5, &mut sampler).unwrap_err(),
            ConfigurationError::InsufficientPool {
                required: 4,
                found: 3
            }
        );
        assert_eq!(
            QuizSession::begin(&vocabulary(8), 0, &mut sampler).unwrap_err(),
            ConfigurationError::ZeroCount
        );
    }

    #[test]
    fn test_focused_pool_draws_distractors_from_all_items() {
        let QuestionSource::Vocabulary(mut pool) = vocabulary(8) else {
            unreachable!()
        };
        pool.focus_on_surface_forms(&["語2", "語5"]);
        let source = QuestionSource::Vocabulary(pool);
        assert_eq!(source.len(), 2);

        // Two focus words alone could never fill four options.
        for seed in 0..20 {
            let session = QuizSession::begin(&source, 10, &mut Sampler::seeded(seed)).unwrap();
            assert_eq!(session.question_count(), 2);
            for question in session.questions() {
                assert!(["語2", "語5"].contains(&question.prompt()));
                assert_eq!(question.options().len(), NUM_OPTIONS);
            }
        }
    }

    #[test]
    fn test_focus_with_no_matches_is_empty() {
        let QuestionSource::Vocabulary(mut pool) = vocabulary(6) else {
            unreachable!()
        };
        pool.focus_on_surface_forms(&["missing"]);
        assert_eq!(
            QuizSession::begin(&QuestionSource::Vocabulary(pool), 3, &mut Sampler::seeded(0))
                .unwrap_err(),
            ConfigurationError::EmptyPool
        );
    }

    #[test]
    fn test_bank_smaller_than_four_is_fine() {
        let mut sampler = Sampler::seeded(4);
        let session = QuizSession::begin(&bank(), 10, &mut sampler).unwrap();
        assert_eq!(session.question_count(), 3);
        let with_explanation = session
            .questions()
            .iter()
            .find(|q| q.id() == &QuestionId::Bank("p2".into()))
            .unwrap();
        assert_eq!(with_explanation.explanation(), Some("を marks the object"));
        assert_eq!(with_explanation.kind(), QuestionKind::Bank);
    }

    #[test]
    fn test_malformed_bank_question_rejected() {
        let source = QuestionSource::Bank(vec![BankQuestion::new(
            "bad",
            "?",
            ["a", "b", "c"].map(String::from).to_vec(),
            "a",
        )]);
        let err = QuizSession::begin(&source, 1, &mut Sampler::seeded(0)).unwrap_err();
        assert!(matches!(err, ConfigurationError::MalformedQuestion { ref id, .. } if id == "bad"));

        let source = QuestionSource::Bank(vec![BankQuestion::new(
            "missing",
            "?",
            ["a", "b", "c", "d"].map(String::from).to_vec(),
            "e",
        )]);
        assert!(QuizSession::begin(&source, 1, &mut Sampler::seeded(0)).is_err());

        let source = QuestionSource::Bank(vec![BankQuestion::new(
            "dupes",
            "?",
            ["a", "a", "c", "d"].map(String::from).to_vec(),
            "a",
        )]);
        assert!(QuizSession::begin(&source, 1, &mut Sampler::seeded(0)).is_err());
    }

    #[test]
    fn test_answering_in_order_finishes() {
        let mut sampler = Sampler::seeded(11);
        let mut session = QuizSession::begin(&vocabulary(6), 2, &mut sampler).unwrap();

        let first = session.questions()[0].correct_answer().to_string();
        let outcome = session.answer(0, &first).unwrap();
        assert!(outcome.feedback.is_correct);
        assert_eq!(outcome.progress, Progress::Continue);
        assert_eq!(session.state(), SessionState::InProgress);
        assert_eq!(session.score(), 1);

        let outcome = session.answer(1, "not an option").unwrap();
        assert!(!outcome.feedback.is_correct);
        assert_eq!(
            outcome.feedback.correct_answer,
            session.questions()[1].correct_answer()
        );
        let Progress::Finished(result) = outcome.progress else {
            panic!("session should be finished");
        };
        assert_eq!(result.score, 1);
        assert_eq!(result.history.len(), 2);
        assert!(session.is_finished());
        assert!(session.current().is_none());
    }

    #[test]
    fn test_out_of_sequence_has_no_side_effect() {
        let mut sampler = Sampler::seeded(5);
        let mut session = QuizSession::begin(&vocabulary(6), 3, &mut sampler).unwrap();
        let answer = session.questions()[0].correct_answer().to_string();

        assert_eq!(
            session.answer(1, &answer).unwrap_err(),
            InvalidStateError::OutOfSequence {
                expected: 0,
                got: 1
            }
        );
        assert_eq!(session.score(), 0);
        assert!(session.history().is_empty());
        assert_eq!(session.state(), SessionState::Created);

        session.answer(0, &answer).unwrap();
        assert!(session.answer(0, &answer).is_err());
        assert_eq!(session.score(), 1);
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_submit_early_marks_rest_unanswered() {
        let mut sampler = Sampler::seeded(9);
        let mut session = QuizSession::begin(&vocabulary(8), 4, &mut sampler).unwrap();
        let answer = session.questions()[0].correct_answer().to_string();
        session.answer(0, &answer).unwrap();

        let result = session.submit_early().unwrap();
        assert_eq!(result.score, 1);
        assert_eq!(result.total(), 4);
        assert_eq!(result.answered(), 1);
        for log in &result.history[1..] {
            assert_eq!(log.user_answer, UserAnswer::Unanswered);
            assert_eq!(log.user_answer.as_str(), UNANSWERED);
            assert!(!log.is_correct);
        }

        assert_eq!(session.submit_early().unwrap_err(), InvalidStateError::Finished);
        assert_eq!(session.answer(1, "x").unwrap_err(), InvalidStateError::Finished);
    }

    #[test]
    fn test_finished_session_keeps_score_and_history() {
        let mut sampler = Sampler::seeded(13);
        let mut session = QuizSession::begin(&vocabulary(8), 3, &mut sampler).unwrap();
        let answer = session.questions()[0].correct_answer().to_string();
        session.answer(0, &answer).unwrap();

        let result = session.submit_early().unwrap();
        assert_eq!(session.score(), result.score);
        assert_eq!(session.history(), result.history.as_slice());
        assert_eq!(
            session.score(),
            session.history().iter().filter(|log| log.is_correct).count()
        );
    }

    #[test]
    fn test_submit_early_before_any_answer() {
        let mut sampler = Sampler::seeded(2);
        let mut session = QuizSession::begin(&bank(), 3, &mut sampler).unwrap();
        let result = session.submit_early().unwrap();
        assert_eq!(result.score, 0);
        assert_eq!(result.answered(), 0);
        assert_eq!(result.total(), 3);
    }
}
