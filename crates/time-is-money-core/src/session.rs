//! Per-session state for one player's progression through the quiz.

use crate::types::Timestamp;
use serde::{Deserialize, Serialize};

/// The screen a session is currently on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Page {
    /// Waiting for a player name.
    #[default]
    Login,
    /// Picking a topic category.
    CategorySelect,
    /// A question is on screen with the countdown running.
    QuestionActive,
    /// The last answer's outcome and explanation are shown.
    QuestionResult,
    /// Every question in the category has been answered.
    CategoryComplete,
}

/// Result of scoring one answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOutcome {
    /// Whether the submitted choice matched the correct option.
    pub correct: bool,
    /// Signed currency delta applied to the player.
    pub reward: i64,
}

/// All mutable per-session state, owned by the engine.
///
/// The rendering collaborator holds no authoritative state of its own:
/// everything it shows is derived from this value, and multiple sessions
/// stay isolated because nothing here is process-global.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    /// Current page.
    pub page: Page,
    /// Selected category name, if any.
    pub category: Option<String>,
    /// Index of the active question within the category.
    pub question_index: usize,
    /// Host clock reading taken when the active question first appeared.
    pub question_start: Option<Timestamp>,
    /// Option index currently highlighted by the player; auto-submitted on
    /// timeout.
    pub pending_choice: Option<usize>,
    /// True once the active question has been scored. Guards against
    /// double-scoring.
    pub answered: bool,
    /// Outcome of the most recently scored answer.
    pub last_outcome: Option<AnswerOutcome>,
    /// True once this category pass has been recorded to the leaderboard.
    /// Guards against duplicate rows.
    pub score_saved: bool,
}

impl SessionState {
    /// Fresh session at the login page.
    pub fn new() -> Self {
        Self {
            page: Page::Login,
            category: None,
            question_index: 0,
            question_start: None,
            pending_choice: None,
            answered: false,
            last_outcome: None,
            score_saved: false,
        }
    }

    /// Clear per-question state ahead of showing a new question.
    pub(crate) fn reset_question(&mut self) {
        self.question_start = None;
        self.pending_choice = None;
        self.answered = false;
        self.last_outcome = None;
    }

    /// Restart the current category pass from its first question.
    pub(crate) fn reset_pass(&mut self) {
        self.question_index = 0;
        self.score_saved = false;
        self.reset_question();
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
