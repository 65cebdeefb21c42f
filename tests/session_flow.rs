use std::collections::HashSet;

use jlpt_quiz::{
    BankQuestion, ConfigurationError, InvalidStateError, NUM_OPTIONS, Progress, QuestionKind,
    QuestionSource, QuizSession, Sampler, SessionError, SessionResult, SessionState, UNANSWERED,
    UserAnswer, VocabularyItem, VocabularyPool,
};

const WORDS: [(&str, &str, &str); 10] = [
    ("先生", "せんせい", "teacher"),
    ("学生", "がくせい", "student"),
    ("学校", "がっこう", "school"),
    ("電車", "でんしゃ", "train"),
    ("時計", "とけい", "clock"),
    ("お茶", "おちゃ", "green tea"),
    ("天気", "てんき", "weather"),
    ("テレビ", "テレビ", "television"),
    ("ここ", "ここ", "here"),
    ("右", "みぎ", "right"),
];

fn vocabulary(n: usize) -> QuestionSource {
    let items = WORDS[..n]
        .iter()
        .map(|(s, r, m)| VocabularyItem::new(*s, *r, *m))
        .collect();
    QuestionSource::Vocabulary(VocabularyPool::new(items).unwrap())
}

fn answer_all(session: &mut QuizSession, correct: impl Fn(usize) -> bool) -> SessionResult {
    loop {
        let index = session.cursor();
        let question = session.current().unwrap();
        let chosen = if correct(index) {
            question.correct_answer().to_string()
        } else {
            question
                .options()
                .iter()
                .find(|o| *o != question.correct_answer())
                .unwrap()
                .clone()
        };
        if let Progress::Finished(result) = session.answer(index, &chosen).unwrap().progress {
            return result;
        }
    }
}

#[test]
fn scenario_a_all_correct() {
    let source = vocabulary(5);
    let mut sampler = Sampler::seeded(100);
    let mut session = QuizSession::begin(&source, 3, &mut sampler).unwrap();
    assert_eq!(session.question_count(), 3);

    let result = answer_all(&mut session, |_| true);
    assert_eq!(result.score, 3);
    assert_eq!(result.history.len(), 3);
    assert_eq!(session.state(), SessionState::Finished);
}

#[test]
fn scenario_b_pool_too_small_for_distractors() {
    let err = QuizSession::begin(&vocabulary(3), 3, &mut Sampler::seeded(0)).unwrap_err();
    assert!(matches!(err, ConfigurationError::InsufficientPool { .. }));
    assert!(err.to_string().contains("insufficient pool size"));
}

#[test]
fn scenario_c_count_clamps_to_pool() {
    let session = QuizSession::begin(&vocabulary(10), 100, &mut Sampler::seeded(3)).unwrap();
    assert_eq!(session.question_count(), 10);
}

#[test]
fn scenario_d_submit_early_after_two() {
    let mut sampler = Sampler::seeded(21);
    let mut session = QuizSession::begin(&vocabulary(10), 5, &mut sampler).unwrap();

    let right = session.questions()[0].correct_answer().to_string();
    assert!(session.answer(0, &right).unwrap().feedback.is_correct);

    let question = &session.questions()[1];
    let wrong = question
        .options()
        .iter()
        .find(|o| *o != question.correct_answer())
        .unwrap()
        .clone();
    assert!(!session.answer(1, &wrong).unwrap().feedback.is_correct);

    let result = session.submit_early().unwrap();
    assert_eq!(result.history.len(), 5);
    assert_eq!(result.score, 1);
    for log in &result.history[2..] {
        assert_eq!(log.user_answer, UserAnswer::Unanswered);
        assert_eq!(log.user_answer.as_str(), UNANSWERED);
        assert!(!log.is_correct);
    }
}

#[test]
fn coverage_uses_distinct_items() {
    for seed in 0..25 {
        for requested in [1, 4, 7, 10, 30] {
            let session =
                QuizSession::begin(&vocabulary(10), requested, &mut Sampler::seeded(seed))
                    .unwrap();
            assert_eq!(session.question_count(), requested.min(10));

            let prompts: HashSet<_> = session.questions().iter().map(|q| q.prompt()).collect();
            assert_eq!(prompts.len(), session.question_count());
            let ids: HashSet<_> = session.questions().iter().map(|q| q.id().clone()).collect();
            assert_eq!(ids.len(), session.question_count());
        }
    }
}

#[test]
fn option_integrity_and_distinct_distractors() {
    for seed in 0..40 {
        let session = QuizSession::begin(&vocabulary(10), 10, &mut Sampler::seeded(seed)).unwrap();
        for question in session.questions() {
            let options = question.options();
            assert_eq!(options.len(), NUM_OPTIONS);
            assert_eq!(options.iter().collect::<HashSet<_>>().len(), NUM_OPTIONS);
            assert_eq!(
                options
                    .iter()
                    .filter(|o| *o == question.correct_answer())
                    .count(),
                1
            );
            assert_ne!(question.correct_answer(), question.prompt());
        }
    }
}

#[test]
fn kana_only_words_are_never_asked_for_reading() {
    for seed in 0..30 {
        let session = QuizSession::begin(&vocabulary(10), 10, &mut Sampler::seeded(seed)).unwrap();
        for question in session.questions() {
            if question.prompt() == "ここ" || question.prompt() == "テレビ" {
                assert_eq!(question.kind(), QuestionKind::Meaning);
            }
        }
    }
}

#[test]
fn answer_position_varies() {
    let slots: HashSet<_> = (0..30)
        .map(|seed| {
            let session =
                QuizSession::begin(&vocabulary(10), 1, &mut Sampler::seeded(seed)).unwrap();
            session.questions()[0].correct_index()
        })
        .collect();
    assert!(slots.len() > 1);
}

#[test]
fn score_matches_correct_logs() {
    for seed in 0..20 {
        let mut session =
            QuizSession::begin(&vocabulary(10), 8, &mut Sampler::seeded(seed)).unwrap();
        let result = answer_all(&mut session, |i| (i + seed as usize) % 3 != 0);
        let correct_logs = result.history.iter().filter(|log| log.is_correct).count();
        assert_eq!(result.score, correct_logs);
        assert_eq!(result.history.len(), 8);
    }
}

#[test]
fn sequencing_errors_leave_session_untouched() {
    let mut session = QuizSession::begin(&vocabulary(6), 2, &mut Sampler::seeded(8)).unwrap();
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

    let _ = answer_all(&mut session, |_| true);
    assert_eq!(
        session.answer(2, "anything").unwrap_err(),
        InvalidStateError::Finished
    );
    assert_eq!(session.submit_early().unwrap_err(), InvalidStateError::Finished);
}

#[test]
fn same_seed_replays_same_session() {
    let a = QuizSession::begin(&vocabulary(10), 6, &mut Sampler::seeded(77)).unwrap();
    let b = QuizSession::begin(&vocabulary(10), 6, &mut Sampler::seeded(77)).unwrap();
    assert_eq!(a.questions(), b.questions());
}

#[test]
fn bank_mode_keeps_prebuilt_answers() {
    let particles = || ["は", "が", "を", "に"].map(String::from).to_vec();
    let source = QuestionSource::Bank(vec![
        BankQuestion::new("1", "わたし（　）がくせいです。", particles(), "は"),
        BankQuestion::new("2", "パン（　）たべます。", particles(), "を"),
    ]);

    let mut session = QuizSession::begin(&source, 5, &mut Sampler::seeded(1)).unwrap();
    assert_eq!(session.question_count(), 2);
    for question in session.questions() {
        assert_eq!(question.kind(), QuestionKind::Bank);
        assert!(question.options().contains(&question.correct_answer().to_string()));
    }

    let result = answer_all(&mut session, |_| true);
    assert_eq!(result.score, 2);
}

#[test]
fn result_exports_as_json() {
    let mut session = QuizSession::begin(&vocabulary(5), 2, &mut Sampler::seeded(4)).unwrap();
    let result = session.submit_early().unwrap();
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["score"], 0);
    assert_eq!(json["history"][0]["user_answer"], "unanswered");
    assert_eq!(json["history"][1]["is_correct"], false);
}

#[test]
fn bundled_sample_data_is_playable() {
    let dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("data");

    let words = jlpt_quiz::load_vocabulary_from_json(dir.join("n5_vocabulary.json")).unwrap();
    let source = QuestionSource::Vocabulary(VocabularyPool::new(words).unwrap());
    let mut session = QuizSession::begin(&source, 20, &mut Sampler::seeded(5)).unwrap();
    assert_eq!(session.question_count(), source.len());
    assert_eq!(answer_all(&mut session, |_| true).score, source.len());

    let bank = jlpt_quiz::load_bank_from_json(dir.join("particles.json")).unwrap();
    let source = QuestionSource::Bank(bank);
    let session = QuizSession::begin(&source, 10, &mut Sampler::seeded(5)).unwrap();
    assert!(session.questions().iter().all(|q| q.explanation().is_some()));
}

fn answer_one_then_turn_in(
    source: &QuestionSource,
    first: usize,
) -> Result<SessionResult, SessionError> {
    let mut session = QuizSession::begin(source, 3, &mut Sampler::seeded(12))?;
    let answer = session.questions()[0].correct_answer().to_string();
    session.answer(first, &answer)?;
    Ok(session.submit_early()?)
}

#[test]
fn session_errors_propagate_through_one_type() {
    let result = answer_one_then_turn_in(&vocabulary(6), 0).unwrap();
    assert_eq!(result.score, 1);
    assert_eq!(result.total(), 3);

    assert!(matches!(
        answer_one_then_turn_in(&vocabulary(2), 0).unwrap_err(),
        SessionError::Configuration(ConfigurationError::InsufficientPool { .. })
    ));

    let err = answer_one_then_turn_in(&vocabulary(6), 1).unwrap_err();
    assert_eq!(
        err,
        SessionError::InvalidState(InvalidStateError::OutOfSequence {
            expected: 0,
            got: 1
        })
    );
    assert!(err.to_string().contains("out of sequence"));
}
