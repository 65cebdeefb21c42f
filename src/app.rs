use crate::config::count_bounds;
use crate::models::{
    AppState, NUM_OPTIONS, QuestionSource, QuizQuestion, SessionResult, VocabularyItem,
};
use crate::session::{Feedback, Progress, QuizSession, Sampler};

/// Terminal application state. Owns at most one live session.
pub struct App {
    pub state: AppState,
    source: QuestionSource,
    sampler: Sampler,
    question_count: usize,
    session: Option<QuizSession>,
    shown_index: usize,
    selected_option: usize,
    feedback: Option<Feedback>,
    pending_result: Option<SessionResult>,
    result: Option<SessionResult>,
    result_scroll: usize,
    notice: Option<String>,
}

impl App {
    pub fn new(source: QuestionSource, sampler: Sampler, question_count: usize) -> Self {
        Self {
            state: AppState::Welcome,
            source,
            sampler,
            question_count,
            session: None,
            shown_index: 0,
            selected_option: 0,
            feedback: None,
            pending_result: None,
            result: None,
            result_scroll: 0,
            notice: None,
        }
    }

    pub fn source(&self) -> &QuestionSource {
        &self.source
    }

    pub fn question_count(&self) -> usize {
        self.question_count
    }

    /// Blocking message shown on the setup screen, e.g. a rejected pool.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// The question on screen: the open one, or the one just answered while
    /// its feedback is showing.
    pub fn current_question(&self) -> Option<&QuizQuestion> {
        self.session.as_ref()?.questions().get(self.shown_index)
    }

    pub fn current_question_number(&self) -> usize {
        self.shown_index + 1
    }

    pub fn total_questions(&self) -> usize {
        self.session
            .as_ref()
            .map_or(0, QuizSession::question_count)
    }

    pub fn score(&self) -> usize {
        self.session.as_ref().map_or(0, QuizSession::score)
    }

    pub fn selected_option(&self) -> usize {
        self.selected_option
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn result(&self) -> Option<&SessionResult> {
        self.result.as_ref()
    }

    pub fn result_scroll(&self) -> usize {
        self.result_scroll
    }

    /// Vocabulary metadata for a prompt, when the source is a vocabulary pool.
    pub fn lookup(&self, prompt: &str) -> Option<&VocabularyItem> {
        self.source.vocabulary()?.lookup(prompt)
    }

    pub fn increase_count(&mut self) {
        let (_, max) = count_bounds(self.source.len());
        self.question_count = (self.question_count + 1).min(max);
    }

    pub fn decrease_count(&mut self) {
        let (min, _) = count_bounds(self.source.len());
        self.question_count = self.question_count.saturating_sub(1).max(min);
    }

    pub fn select_next_option(&mut self) {
        if self.feedback.is_none() {
            self.selected_option = (self.selected_option + 1) % NUM_OPTIONS;
        }
    }

    pub fn select_previous_option(&mut self) {
        if self.feedback.is_none() {
            self.selected_option = (self.selected_option + NUM_OPTIONS - 1) % NUM_OPTIONS;
        }
    }

    /// Begin a fresh session on the configured source.
    pub fn start_quiz(&mut self) {
        match QuizSession::begin(&self.source, self.question_count, &mut self.sampler) {
            Ok(session) => {
                self.session = Some(session);
                self.shown_index = 0;
                self.selected_option = 0;
                self.feedback = None;
                self.pending_result = None;
                self.notice = None;
                self.state = AppState::Quiz;
            }
            Err(err) => {
                log::warn!("cannot start quiz: {}", err);
                self.notice = Some(err.to_string());
            }
        }
    }

    /// Answer with the selected option, or move on if feedback is showing.
    pub fn submit_answer(&mut self) {
        if self.feedback.is_some() {
            self.advance();
            return;
        }

        let Some(session) = self.session.as_mut() else {
            return;
        };
        let Some(chosen) = session
            .current()
            .map(|question| question.options()[self.selected_option].clone())
        else {
            return;
        };

        match session.answer(session.cursor(), &chosen) {
            Ok(outcome) => {
                if let Progress::Finished(result) = outcome.progress {
                    self.pending_result = Some(result);
                }
                self.feedback = Some(outcome.feedback);
            }
            Err(err) => log::error!("answer rejected: {}", err),
        }
    }

    fn advance(&mut self) {
        self.feedback = None;
        self.selected_option = 0;

        if let Some(result) = self.pending_result.take() {
            self.show_result(result);
        } else if let Some(session) = &self.session {
            self.shown_index = session.cursor();
        }
    }

    /// Turn the session in with the remaining questions unanswered.
    pub fn submit_early(&mut self) {
        if let Some(result) = self.pending_result.take() {
            self.show_result(result);
            return;
        }

        let Some(session) = self.session.as_mut() else {
            return;
        };
        match session.submit_early() {
            Ok(result) => self.show_result(result),
            Err(err) => log::error!("early submit rejected: {}", err),
        }
    }

    /// Drop the live session without recording anything.
    pub fn abandon(&mut self) {
        if let Some(session) = self.session.take() {
            log::info!(
                "session abandoned at question {} of {}",
                session.cursor() + 1,
                session.question_count()
            );
        }
        self.feedback = None;
        self.pending_result = None;
        self.state = AppState::Welcome;
    }

    fn show_result(&mut self, result: SessionResult) {
        self.session = None;
        self.feedback = None;
        self.result = Some(result);
        self.result_scroll = 0;
        self.state = AppState::Result;
    }

    pub fn scroll_results_down(&mut self) {
        let max = self
            .result
            .as_ref()
            .map_or(0, |result| result.total().saturating_sub(1));
        self.result_scroll = (self.result_scroll + 1).min(max);
    }

    pub fn scroll_results_up(&mut self) {
        self.result_scroll = self.result_scroll.saturating_sub(1);
    }

    /// Back to setup; the next start builds a brand-new session.
    pub fn restart(&mut self) {
        self.state = AppState::Welcome;
        self.result_scroll = 0;
    }

    /// Consume the app, keeping the last finished result.
    pub fn into_result(self) -> Option<SessionResult> {
        self.result
    }
}
