//! # jlpt-quiz
//!
//! Multiple-choice vocabulary quizzes for JLPT study.
//!
//! The core is [`QuizSession`]: give it a vocabulary pool or a pre-built
//! question bank plus a question count, answer the questions in order, and
//! it hands back a scored [`SessionResult`]. [`Quiz`] wraps a session in a
//! terminal front-end.
//!
//! ## Usage
//!
//! ```rust
//! use jlpt_quiz::{Progress, QuestionSource, QuizSession, Sampler, VocabularyItem, VocabularyPool};
//!
//! let pool = VocabularyPool::new(vec![
//!     VocabularyItem::new("山", "やま", "mountain"),
//!     VocabularyItem::new("川", "かわ", "river"),
//!     VocabularyItem::new("海", "うみ", "sea"),
//!     VocabularyItem::new("空", "そら", "sky"),
//! ])?;
//! let source = QuestionSource::Vocabulary(pool);
//!
//! let mut sampler = Sampler::seeded(7);
//! let mut session = QuizSession::begin(&source, 2, &mut sampler)?;
//!
//! let answer = session.questions()[0].correct_answer().to_string();
//! let outcome = session.answer(0, &answer)?;
//! assert!(outcome.feedback.is_correct);
//! assert_eq!(outcome.progress, Progress::Continue);
//!
//! let result = session.submit_early()?;
//! assert_eq!(result.score, 1);
//! assert_eq!(result.history.len(), 2);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod app;
pub mod config;
mod data;
mod models;
pub mod session;
pub mod terminal;
mod ui;

use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use thiserror::Error;

pub use app::App;
pub use config::QuizConfig;
pub use data::{
    LoadError, load_bank_from_json, load_surface_list_from_json, load_vocabulary_from_json,
};
pub use models::{
    AnswerLog, AppState, BankQuestion, NUM_OPTIONS, QuestionId, QuestionKind, QuestionSource,
    QuizQuestion, SYNTHETIC_ID_OFFSET, SessionResult, UNANSWERED, UserAnswer, VocabularyItem,
    VocabularyPool,
};
pub use session::{
    AnswerOutcome, ConfigurationError, Feedback, InvalidStateError, Progress, QuizSession,
    Sampler, SessionError, SessionState,
};

/// Error type for quiz operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("failed to load quiz data: {0}")]
    Load(#[from] LoadError),
    #[error("invalid quiz source: {0}")]
    Configuration(#[from] ConfigurationError),
    #[error("failed to export result: {0}")]
    Export(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// A quiz that can be run in the terminal.
pub struct Quiz {
    app: App,
}

impl Quiz {
    /// Create a quiz over `source`.
    ///
    /// Without a configured seed one is drawn from entropy and logged so the
    /// run can be replayed with `--seed`.
    pub fn new(source: QuestionSource, config: &QuizConfig) -> Self {
        let sampler = match config.seed {
            Some(seed) => Sampler::seeded(seed),
            None => {
                let (sampler, seed) = Sampler::from_entropy();
                log::info!("sampler seed {}", seed);
                sampler
            }
        };
        let count = config::clamp_count(config.question_count, source.len());

        Self {
            app: App::new(source, sampler, count),
        }
    }

    /// Run the quiz in the terminal.
    ///
    /// Takes over the terminal until the user quits and returns the last
    /// finished session result, if any.
    pub fn run(mut self) -> Result<Option<SessionResult>, QuizError> {
        {
            let mut terminal = terminal::TerminalGuard::enter()?;
            run_event_loop(&mut terminal, &mut self.app)?;
        }
        Ok(self.app.into_result())
    }

    /// Get a reference to the underlying app for custom handling.
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Get a mutable reference to the underlying app for custom handling.
    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}

fn run_event_loop(terminal: &mut terminal::AppTerminal, app: &mut App) -> Result<(), QuizError> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            if handle_input(app, key.code) {
                break;
            }
        }
    }

    Ok(())
}

/// Returns true if the app should exit.
fn handle_input(app: &mut App, key: KeyCode) -> bool {
    match app.state {
        AppState::Welcome => handle_welcome_input(app, key),
        AppState::Quiz => handle_quiz_input(app, key),
        AppState::Result => handle_result_input(app, key),
    }
}

fn handle_welcome_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Enter => {
            app.start_quiz();
            false
        }
        KeyCode::Right | KeyCode::Char('l') => {
            app.increase_count();
            false
        }
        KeyCode::Left | KeyCode::Char('h') => {
            app.decrease_count();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}

fn handle_quiz_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Up | KeyCode::Char('k') => app.select_previous_option(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next_option(),
        KeyCode::Enter | KeyCode::Char(' ') => app.submit_answer(),
        KeyCode::Char('s') | KeyCode::Char('S') => app.submit_early(),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => app.abandon(),
        _ => {}
    }
    false
}

fn handle_result_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Down | KeyCode::Char('j') => {
            app.scroll_results_down();
            false
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.scroll_results_up();
            false
        }
        KeyCode::Char('r') | KeyCode::Char('R') => {
            app.restart();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}
