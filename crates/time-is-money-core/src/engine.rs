//! The quiz engine.
//!
//! [`QuizEngine`] owns all authoritative state for one player session
//! (settings, validated content, the player, the session value, and the
//! leaderboard store) and drives every page transition from player actions
//! and countdown timeouts. The host renders whatever the engine exposes and
//! re-invokes [`tick`](QuizEngine::tick) at its poll cadence while a
//! question is active; elapsed time is always the wall-clock delta since the
//! question appeared, so poll jitter never affects scoring.

use crate::content::{self, Category, ContentError, Question};
use crate::identity::{self, NameError};
use crate::leaderboard::{LeaderboardEntry, LeaderboardError, LeaderboardStore};
use crate::player::{EconomyError, Player};
use crate::reward;
use crate::session::{AnswerOutcome, Page, SessionState};
use crate::settings::{QuizSettings, SettingsError};
use crate::store::{self, CatalogError, StoreItem, DEFAULT_AVATAR_GLYPH};
use crate::types::Timestamp;
use std::path::PathBuf;

/// What one countdown poll observed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TickResult {
    /// No countdown is running: wrong page, or the question is already
    /// scored.
    Idle,
    /// The countdown is still running; no scoring occurred.
    Running {
        /// Seconds remaining before auto-submit.
        time_left: f64,
        /// What a correct answer submitted right now would earn.
        reward_preview: i64,
    },
    /// The timer expired and the pending selection was scored.
    TimedOut(AnswerOutcome),
}

/// A quiz session engine.
pub struct QuizEngine {
    settings: QuizSettings,
    categories: Vec<Category>,
    catalog: Vec<StoreItem>,
    leaderboard: LeaderboardStore,
    player: Option<Player>,
    session: SessionState,
}

impl QuizEngine {
    /// Create an engine from validated parts. Settings, categories, and the
    /// store catalog are checked once here; content is immutable afterwards.
    pub fn new(
        settings: QuizSettings,
        categories: Vec<Category>,
        catalog: Vec<StoreItem>,
        leaderboard: LeaderboardStore,
    ) -> Result<Self, SetupError> {
        settings.validate()?;
        content::validate_categories(&categories)?;
        store::validate_catalog(&catalog)?;
        Ok(Self {
            settings,
            categories,
            catalog,
            leaderboard,
            player: None,
            session: SessionState::new(),
        })
    }

    /// Engine with the built-in question bank, store catalog, and standard
    /// settings.
    pub fn with_defaults(leaderboard_path: impl Into<PathBuf>) -> Result<Self, SetupError> {
        Self::new(
            QuizSettings::default(),
            content::builtin_categories(),
            store::default_catalog(),
            LeaderboardStore::new(leaderboard_path),
        )
    }

    // ------------------------------------------------------------------
    // State accessors
    // ------------------------------------------------------------------

    /// Engine settings.
    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    /// The current page.
    pub fn page(&self) -> Page {
        self.session.page
    }

    /// The full session value.
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// The logged-in player, if any.
    pub fn player(&self) -> Option<&Player> {
        self.player.as_ref()
    }

    /// The player's current capital, zero before login.
    pub fn capital(&self) -> i64 {
        self.player.as_ref().map_or(0, |p| p.capital)
    }

    /// All playable categories.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// The store catalog.
    pub fn catalog(&self) -> &[StoreItem] {
        &self.catalog
    }

    /// The selected category's content, if one is selected.
    pub fn active_category(&self) -> Option<&Category> {
        let name = self.session.category.as_deref()?;
        self.categories.iter().find(|c| c.name == name)
    }

    /// The question currently shown, on the question and result pages.
    pub fn current_question(&self) -> Option<&Question> {
        match self.session.page {
            Page::QuestionActive | Page::QuestionResult => self
                .active_category()?
                .questions
                .get(self.session.question_index),
            _ => None,
        }
    }

    /// One-based question progress `(current, total)` while playing.
    pub fn progress(&self) -> Option<(usize, usize)> {
        match self.session.page {
            Page::QuestionActive | Page::QuestionResult => {
                let total = self.active_category()?.questions.len();
                Some((self.session.question_index + 1, total))
            }
            _ => None,
        }
    }

    /// Seconds left on the active question's countdown.
    pub fn time_left(&self, now: Timestamp) -> Option<f64> {
        if self.session.page != Page::QuestionActive {
            return None;
        }
        Some(reward::time_left(
            self.settings.max_time_secs(),
            self.elapsed(now),
        ))
    }

    /// What a correct answer submitted right now would earn.
    pub fn reward_preview(&self, now: Timestamp) -> Option<i64> {
        if self.session.page != Page::QuestionActive {
            return None;
        }
        let question = self.current_question()?;
        Some(reward::correct_reward(
            question.value,
            self.settings.max_time_secs(),
            self.elapsed(now),
        ))
    }

    /// What a wrong answer to the active question would cost.
    pub fn penalty_preview(&self) -> Option<i64> {
        if self.session.page != Page::QuestionActive {
            return None;
        }
        let question = self.current_question()?;
        Some(reward::wrong_penalty(
            question.value,
            self.settings.wrong_penalty_factor,
        ))
    }

    /// Glyph for the equipped outfit, or the bare default avatar.
    pub fn avatar_glyph(&self) -> &str {
        let equipped = self.player.as_ref().and_then(|p| p.equipped.as_deref());
        match equipped {
            Some(name) => self
                .catalog
                .iter()
                .find(|i| i.name == name)
                .map(|i| i.glyph.as_str())
                .unwrap_or(DEFAULT_AVATAR_GLYPH),
            None => DEFAULT_AVATAR_GLYPH,
        }
    }

    /// Whether the player owns any premium item.
    pub fn has_premium(&self) -> bool {
        self.player
            .as_ref()
            .map_or(false, |p| p.has_premium(&self.catalog))
    }

    /// Leaderboard entries sorted by capital descending, ties in insertion
    /// order.
    pub fn top_entries(&self) -> Result<Vec<LeaderboardEntry>, LeaderboardError> {
        self.leaderboard.top_entries()
    }

    // ------------------------------------------------------------------
    // Login
    // ------------------------------------------------------------------

    /// Resolve the requested name against the recorded leaderboard names and
    /// create the player. Moves `Login → CategorySelect`.
    ///
    /// A rejected name leaves the session untouched so the host can
    /// re-prompt.
    pub fn login(&mut self, requested: &str) -> Result<&Player, LoginError> {
        if self.session.page != Page::Login {
            return Err(LoginError::AlreadyLoggedIn);
        }
        let existing = self.leaderboard.existing_names()?;
        let name = identity::resolve_name(requested, &existing)?;
        self.session.page = Page::CategorySelect;
        Ok(self.player.insert(Player::new(name)))
    }

    // ------------------------------------------------------------------
    // Play loop
    // ------------------------------------------------------------------

    /// Pick a category and start its first question. Moves
    /// `CategorySelect → QuestionActive`.
    pub fn select_category(&mut self, name: &str) -> Result<(), SessionError> {
        if self.session.page != Page::CategorySelect {
            return Err(SessionError::InvalidPage);
        }
        if !self.categories.iter().any(|c| c.name == name) {
            return Err(SessionError::UnknownCategory(name.to_string()));
        }
        self.session.category = Some(name.to_string());
        self.session.reset_pass();
        self.session.page = Page::QuestionActive;
        Ok(())
    }

    /// Record the option the player currently has highlighted. The timeout
    /// auto-submit scores this selection.
    pub fn select_option(&mut self, choice: Option<usize>) -> Result<(), SessionError> {
        if self.session.page != Page::QuestionActive {
            return Err(SessionError::InvalidPage);
        }
        self.session.pending_choice = choice;
        Ok(())
    }

    /// Observe the countdown. The first poll of a question stamps its start
    /// time; later polls compute elapsed from that stamp, so the result is
    /// independent of poll frequency. Once elapsed reaches the time limit
    /// the pending selection is auto-submitted, scoring exactly once.
    pub fn tick(&mut self, now: Timestamp) -> TickResult {
        if self.session.page != Page::QuestionActive || self.session.answered {
            return TickResult::Idle;
        }
        let start = *self.session.question_start.get_or_insert(now);
        let elapsed = (now - start).max(0.0);
        let max_time = self.settings.max_time_secs();
        if elapsed >= max_time {
            let choice = self.session.pending_choice;
            return TickResult::TimedOut(self.score_answer(choice, now));
        }
        match self.current_question() {
            Some(question) => TickResult::Running {
                time_left: reward::time_left(max_time, elapsed),
                reward_preview: reward::correct_reward(question.value, max_time, elapsed),
            },
            None => TickResult::Idle,
        }
    }

    /// Submit an answer (or `None` for no answer). Moves
    /// `QuestionActive → QuestionResult`, scoring exactly once.
    ///
    /// A choice outside the displayed options counts as incorrect rather
    /// than an error, and a repeat submission for an already-scored question
    /// is absorbed, returning the recorded outcome unchanged.
    pub fn submit_answer(
        &mut self,
        choice: Option<usize>,
        now: Timestamp,
    ) -> Result<AnswerOutcome, SessionError> {
        match self.session.page {
            Page::QuestionActive => Ok(self.score_answer(choice, now)),
            Page::QuestionResult => self.session.last_outcome.ok_or(SessionError::InvalidPage),
            _ => Err(SessionError::InvalidPage),
        }
    }

    /// Advance past the shown result. Moves `QuestionResult →
    /// QuestionActive` while questions remain, or `→ CategoryComplete` when
    /// the category is exhausted. Returns the page landed on.
    pub fn next_question(&mut self) -> Result<Page, SessionError> {
        if self.session.page != Page::QuestionResult {
            return Err(SessionError::InvalidPage);
        }
        let total = self
            .active_category()
            .map(|c| c.questions.len())
            .unwrap_or(0);
        self.session.question_index += 1;
        self.session.reset_question();
        if self.session.question_index >= total {
            self.session.question_index = total;
            self.session.page = Page::CategoryComplete;
        } else {
            self.session.page = Page::QuestionActive;
        }
        Ok(self.session.page)
    }

    /// Record `(name, capital)` for the completed pass. Returns `Ok(true)`
    /// on the append and `Ok(false)` when this pass was already recorded,
    /// so the host may call this on every re-render of the completion page.
    ///
    /// On a storage failure the session stays on `CategoryComplete` with
    /// the saved flag still clear, so the host can retry or report.
    pub fn save_score(&mut self) -> Result<bool, SessionError> {
        if self.session.page != Page::CategoryComplete {
            return Err(SessionError::InvalidPage);
        }
        if self.session.score_saved {
            return Ok(false);
        }
        let player = self.player.as_ref().ok_or(SessionError::NotLoggedIn)?;
        self.leaderboard.record(&player.name, player.capital)?;
        self.session.score_saved = true;
        Ok(true)
    }

    /// Play the same category again from the first question. Capital and
    /// inventory carry over; the new pass records its own leaderboard row.
    pub fn replay_category(&mut self) -> Result<(), SessionError> {
        if self.session.page != Page::CategoryComplete {
            return Err(SessionError::InvalidPage);
        }
        self.session.reset_pass();
        self.session.page = Page::QuestionActive;
        Ok(())
    }

    /// Return to category selection. Moves `CategoryComplete →
    /// CategorySelect`, clearing the selected category.
    pub fn change_category(&mut self) -> Result<(), SessionError> {
        if self.session.page != Page::CategoryComplete {
            return Err(SessionError::InvalidPage);
        }
        self.session.category = None;
        self.session.reset_pass();
        self.session.page = Page::CategorySelect;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Store and avatar
    // ------------------------------------------------------------------

    /// Buy a catalog item for the logged-in player.
    pub fn purchase(&mut self, item_name: &str) -> Result<(), SessionError> {
        let item = self.find_item(item_name)?.clone();
        let player = self.player.as_mut().ok_or(SessionError::NotLoggedIn)?;
        player.purchase(&item)?;
        Ok(())
    }

    /// Equip an owned outfit for the logged-in player.
    pub fn equip(&mut self, item_name: &str) -> Result<(), SessionError> {
        let item = self.find_item(item_name)?.clone();
        let player = self.player.as_mut().ok_or(SessionError::NotLoggedIn)?;
        player.equip(&item)?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    /// Elapsed seconds on the active question. An unstarted timer counts as
    /// fully elapsed so scoring can never pay out more than the countdown
    /// allows.
    fn elapsed(&self, now: Timestamp) -> f64 {
        match self.session.question_start {
            Some(start) => (now - start).max(0.0),
            None => self.settings.max_time_secs(),
        }
    }

    /// Score the active question exactly once and show its result.
    /// Callers guarantee the page is `QuestionActive`.
    fn score_answer(&mut self, choice: Option<usize>, now: Timestamp) -> AnswerOutcome {
        let max_time = self.settings.max_time_secs();
        let elapsed = self.elapsed(now);
        let (value, correct) = match self.current_question() {
            Some(question) => (question.value, choice == Some(question.answer)),
            None => (0, false),
        };
        let delta = reward::score(
            value,
            max_time,
            elapsed,
            correct,
            self.settings.wrong_penalty_factor,
        );
        if let Some(player) = self.player.as_mut() {
            player.apply_delta(delta);
        }
        let outcome = AnswerOutcome {
            correct,
            reward: delta,
        };
        self.session.answered = true;
        self.session.last_outcome = Some(outcome);
        self.session.page = Page::QuestionResult;
        outcome
    }

    fn find_item(&self, name: &str) -> Result<&StoreItem, SessionError> {
        self.catalog
            .iter()
            .find(|i| i.name == name)
            .ok_or_else(|| SessionError::UnknownItem(name.to_string()))
    }
}

/// Errors from engine construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SetupError {
    Settings(SettingsError),
    Content(ContentError),
    Catalog(CatalogError),
}

impl std::fmt::Display for SetupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SetupError::Settings(e) => write!(f, "{}", e),
            SetupError::Content(e) => write!(f, "{}", e),
            SetupError::Catalog(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for SetupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SetupError::Settings(e) => Some(e),
            SetupError::Content(e) => Some(e),
            SetupError::Catalog(e) => Some(e),
        }
    }
}

impl From<SettingsError> for SetupError {
    fn from(err: SettingsError) -> Self {
        SetupError::Settings(err)
    }
}

impl From<ContentError> for SetupError {
    fn from(err: ContentError) -> Self {
        SetupError::Content(err)
    }
}

impl From<CatalogError> for SetupError {
    fn from(err: CatalogError) -> Self {
        SetupError::Catalog(err)
    }
}

/// Errors from login.
#[derive(Debug)]
pub enum LoginError {
    /// The requested name was unusable; re-prompt.
    Name(NameError),
    /// The leaderboard file could not be read for name resolution.
    Storage(LeaderboardError),
    /// A player is already logged in on this session.
    AlreadyLoggedIn,
}

impl std::fmt::Display for LoginError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoginError::Name(e) => write!(f, "{}", e),
            LoginError::Storage(e) => write!(f, "Could not read recorded names: {}", e),
            LoginError::AlreadyLoggedIn => write!(f, "A player is already logged in"),
        }
    }
}

impl std::error::Error for LoginError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoginError::Name(e) => Some(e),
            LoginError::Storage(e) => Some(e),
            LoginError::AlreadyLoggedIn => None,
        }
    }
}

impl From<NameError> for LoginError {
    fn from(err: NameError) -> Self {
        LoginError::Name(err)
    }
}

impl From<LeaderboardError> for LoginError {
    fn from(err: LeaderboardError) -> Self {
        LoginError::Storage(err)
    }
}

/// Errors from mid-session actions.
#[derive(Debug)]
pub enum SessionError {
    /// The action is not available on the current page.
    InvalidPage,
    /// No player is logged in.
    NotLoggedIn,
    /// No category with this name exists.
    UnknownCategory(String),
    /// No catalog item with this name exists.
    UnknownItem(String),
    /// A wallet or inventory operation failed.
    Economy(EconomyError),
    /// The leaderboard file could not be written.
    Storage(LeaderboardError),
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::InvalidPage => write!(f, "Action not available on the current page"),
            SessionError::NotLoggedIn => write!(f, "No player is logged in"),
            SessionError::UnknownCategory(name) => write!(f, "Unknown category '{}'", name),
            SessionError::UnknownItem(name) => write!(f, "Unknown store item '{}'", name),
            SessionError::Economy(e) => write!(f, "{}", e),
            SessionError::Storage(e) => write!(f, "Could not record the score: {}", e),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Economy(e) => Some(e),
            SessionError::Storage(e) => Some(e),
            _ => None,
        }
    }
}

impl From<EconomyError> for SessionError {
    fn from(err: EconomyError) -> Self {
        SessionError::Economy(err)
    }
}

impl From<LeaderboardError> for SessionError {
    fn from(err: LeaderboardError) -> Self {
        SessionError::Storage(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Question;
    use crate::store::default_catalog;
    use tempfile::{tempdir, TempDir};

    fn test_categories() -> Vec<Category> {
        vec![Category::new(
            "Warmup",
            vec![
                Question::new("What is 2 + 2?", &["3", "4", "5"], 1, 500, "Basic arithmetic."),
                Question::new("What is 3 × 3?", &["9", "6", "12"], 0, 600, "Times tables."),
            ],
        )]
    }

    fn test_engine(dir: &TempDir) -> QuizEngine {
        QuizEngine::new(
            QuizSettings::default(),
            test_categories(),
            default_catalog(),
            LeaderboardStore::new(dir.path().join("leaderboard.csv")),
        )
        .unwrap()
    }

    fn playing_engine(dir: &TempDir) -> QuizEngine {
        let mut engine = test_engine(dir);
        engine.login("Alice").unwrap();
        engine.select_category("Warmup").unwrap();
        engine
    }

    #[test]
    fn test_construction_rejects_invalid_settings() {
        let dir = tempdir().unwrap();
        let settings = QuizSettings {
            max_time_per_question: 0,
            ..Default::default()
        };
        let result = QuizEngine::new(
            settings,
            test_categories(),
            default_catalog(),
            LeaderboardStore::new(dir.path().join("leaderboard.csv")),
        );
        assert_eq!(
            result.err(),
            Some(SetupError::Settings(SettingsError::ZeroQuestionTimer))
        );
    }

    #[test]
    fn test_construction_rejects_invalid_content() {
        let dir = tempdir().unwrap();
        let result = QuizEngine::new(
            QuizSettings::default(),
            vec![Category::new("Empty", Vec::new())],
            default_catalog(),
            LeaderboardStore::new(dir.path().join("leaderboard.csv")),
        );
        assert!(matches!(result, Err(SetupError::Content(_))));
    }

    #[test]
    fn test_with_defaults_uses_builtin_content() {
        let dir = tempdir().unwrap();
        let engine = QuizEngine::with_defaults(dir.path().join("leaderboard.csv")).unwrap();
        assert_eq!(engine.categories().len(), 5);
        assert_eq!(engine.catalog().len(), 6);
        assert_eq!(engine.page(), Page::Login);
    }

    #[test]
    fn test_login_moves_to_category_select() {
        let dir = tempdir().unwrap();
        let mut engine = test_engine(&dir);
        let player = engine.login("  Alice  ").unwrap();
        assert_eq!(player.name, "Alice");
        assert_eq!(engine.page(), Page::CategorySelect);
        assert_eq!(engine.capital(), 0);
    }

    #[test]
    fn test_login_rejects_blank_name_without_mutation() {
        let dir = tempdir().unwrap();
        let mut engine = test_engine(&dir);
        assert!(matches!(
            engine.login("   "),
            Err(LoginError::Name(NameError::Empty))
        ));
        assert_eq!(engine.page(), Page::Login);
        assert!(engine.player().is_none());
    }

    #[test]
    fn test_login_twice_rejected() {
        let dir = tempdir().unwrap();
        let mut engine = test_engine(&dir);
        engine.login("Alice").unwrap();
        assert!(matches!(
            engine.login("Bob"),
            Err(LoginError::AlreadyLoggedIn)
        ));
    }

    #[test]
    fn test_login_disambiguates_against_recorded_names() {
        let dir = tempdir().unwrap();
        let store = LeaderboardStore::new(dir.path().join("leaderboard.csv"));
        store.record("Alice", 320).unwrap();

        let mut engine = QuizEngine::new(
            QuizSettings::default(),
            test_categories(),
            default_catalog(),
            store,
        )
        .unwrap();
        let player = engine.login("Alice").unwrap();
        assert_eq!(player.name, "Alice (1)");
    }

    #[test]
    fn test_select_category_starts_first_question() {
        let dir = tempdir().unwrap();
        let mut engine = test_engine(&dir);
        engine.login("Alice").unwrap();
        engine.select_category("Warmup").unwrap();

        assert_eq!(engine.page(), Page::QuestionActive);
        assert_eq!(engine.progress(), Some((1, 2)));
        assert!(engine.session().question_start.is_none());
    }

    #[test]
    fn test_select_unknown_category() {
        let dir = tempdir().unwrap();
        let mut engine = test_engine(&dir);
        engine.login("Alice").unwrap();
        assert!(matches!(
            engine.select_category("Astrology"),
            Err(SessionError::UnknownCategory(_))
        ));
        assert_eq!(engine.page(), Page::CategorySelect);
    }

    #[test]
    fn test_select_category_requires_selection_page() {
        let dir = tempdir().unwrap();
        let mut engine = test_engine(&dir);
        assert!(matches!(
            engine.select_category("Warmup"),
            Err(SessionError::InvalidPage)
        ));
    }

    #[test]
    fn test_tick_stamps_start_and_counts_down() {
        let dir = tempdir().unwrap();
        let mut engine = playing_engine(&dir);

        match engine.tick(100.0) {
            TickResult::Running {
                time_left,
                reward_preview,
            } => {
                assert_eq!(time_left, 20.0);
                assert_eq!(reward_preview, 500);
            }
            other => panic!("expected running countdown, got {:?}", other),
        }

        match engine.tick(105.0) {
            TickResult::Running {
                time_left,
                reward_preview,
            } => {
                assert_eq!(time_left, 15.0);
                assert_eq!(reward_preview, 375);
            }
            other => panic!("expected running countdown, got {:?}", other),
        }
        assert_eq!(engine.time_left(105.0), Some(15.0));
        assert_eq!(engine.reward_preview(105.0), Some(375));
        assert_eq!(engine.penalty_preview(), Some(150));
    }

    #[test]
    fn test_irregular_polling_does_not_change_elapsed() {
        let dir = tempdir().unwrap();
        let mut engine = playing_engine(&dir);
        engine.tick(100.0);
        // many rapid polls followed by a long gap
        for _ in 0..50 {
            engine.tick(101.0);
        }
        match engine.tick(110.0) {
            TickResult::Running { time_left, .. } => assert_eq!(time_left, 10.0),
            other => panic!("expected running countdown, got {:?}", other),
        }
    }

    #[test]
    fn test_correct_answer_at_start_earns_full_value() {
        let dir = tempdir().unwrap();
        let mut engine = playing_engine(&dir);
        engine.tick(100.0);

        let outcome = engine.submit_answer(Some(1), 100.0).unwrap();
        assert!(outcome.correct);
        assert_eq!(outcome.reward, 500);
        assert_eq!(engine.capital(), 500);
        assert_eq!(engine.page(), Page::QuestionResult);
    }

    #[test]
    fn test_wrong_answer_costs_penalty() {
        let dir = tempdir().unwrap();
        let mut engine = playing_engine(&dir);
        engine.tick(100.0);

        let outcome = engine.submit_answer(Some(0), 100.0).unwrap();
        assert!(!outcome.correct);
        assert_eq!(outcome.reward, -150);
        assert_eq!(engine.capital(), -150);
    }

    #[test]
    fn test_no_answer_counts_as_wrong() {
        let dir = tempdir().unwrap();
        let mut engine = playing_engine(&dir);
        engine.tick(100.0);

        let outcome = engine.submit_answer(None, 100.0).unwrap();
        assert!(!outcome.correct);
        assert_eq!(outcome.reward, -150);
    }

    #[test]
    fn test_out_of_range_choice_counts_as_wrong() {
        let dir = tempdir().unwrap();
        let mut engine = playing_engine(&dir);
        engine.tick(100.0);

        let outcome = engine.submit_answer(Some(99), 100.0).unwrap();
        assert!(!outcome.correct);
        assert_eq!(engine.capital(), -150);
    }

    #[test]
    fn test_submit_without_tick_earns_nothing() {
        let dir = tempdir().unwrap();
        let mut engine = playing_engine(&dir);

        let outcome = engine.submit_answer(Some(1), 100.0).unwrap();
        assert!(outcome.correct);
        assert_eq!(outcome.reward, 0);
    }

    #[test]
    fn test_double_submit_is_absorbed() {
        let dir = tempdir().unwrap();
        let mut engine = playing_engine(&dir);
        engine.tick(100.0);

        let first = engine.submit_answer(Some(1), 100.0).unwrap();
        let second = engine.submit_answer(Some(0), 103.0).unwrap();
        assert_eq!(first, second);
        assert_eq!(engine.capital(), 500);
    }

    #[test]
    fn test_timeout_scores_pending_selection() {
        let dir = tempdir().unwrap();
        let mut engine = playing_engine(&dir);
        engine.tick(100.0);
        engine.select_option(Some(1)).unwrap();

        match engine.tick(120.0) {
            TickResult::TimedOut(outcome) => {
                assert!(outcome.correct);
                assert_eq!(outcome.reward, 0);
            }
            other => panic!("expected timeout, got {:?}", other),
        }
        assert_eq!(engine.page(), Page::QuestionResult);
        assert_eq!(engine.tick(121.0), TickResult::Idle);
    }

    #[test]
    fn test_timeout_without_selection_is_wrong() {
        let dir = tempdir().unwrap();
        let mut engine = playing_engine(&dir);
        engine.tick(100.0);

        match engine.tick(125.0) {
            TickResult::TimedOut(outcome) => {
                assert!(!outcome.correct);
                assert_eq!(outcome.reward, -150);
            }
            other => panic!("expected timeout, got {:?}", other),
        }
        assert_eq!(engine.capital(), -150);
    }

    #[test]
    fn test_next_question_advances_and_completes() {
        let dir = tempdir().unwrap();
        let mut engine = playing_engine(&dir);
        engine.tick(100.0);
        engine.submit_answer(Some(1), 100.0).unwrap();

        assert_eq!(engine.next_question().unwrap(), Page::QuestionActive);
        assert_eq!(engine.progress(), Some((2, 2)));
        assert!(engine.session().question_start.is_none());

        engine.tick(200.0);
        engine.submit_answer(Some(0), 200.0).unwrap();
        assert_eq!(engine.next_question().unwrap(), Page::CategoryComplete);
    }

    #[test]
    fn test_save_score_records_once() {
        let dir = tempdir().unwrap();
        let mut engine = playing_engine(&dir);
        engine.tick(100.0);
        engine.submit_answer(Some(1), 100.0).unwrap();
        engine.next_question().unwrap();
        engine.tick(200.0);
        engine.submit_answer(Some(0), 200.0).unwrap();
        engine.next_question().unwrap();

        assert!(engine.save_score().unwrap());
        assert!(!engine.save_score().unwrap());
        assert!(!engine.save_score().unwrap());

        let entries = engine.top_entries().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].username, "Alice");
        assert_eq!(entries[0].capital, 1100);
    }

    #[test]
    fn test_save_score_requires_completion_page() {
        let dir = tempdir().unwrap();
        let mut engine = playing_engine(&dir);
        assert!(matches!(engine.save_score(), Err(SessionError::InvalidPage)));
    }

    #[test]
    fn test_replay_keeps_capital_and_records_again() {
        let dir = tempdir().unwrap();
        let mut engine = playing_engine(&dir);
        for _ in 0..2 {
            engine.tick(100.0);
            engine.submit_answer(Some(99), 100.0).unwrap();
            engine.next_question().unwrap();
        }
        engine.save_score().unwrap();
        let capital_after_first_pass = engine.capital();

        engine.replay_category().unwrap();
        assert_eq!(engine.page(), Page::QuestionActive);
        assert_eq!(engine.progress(), Some((1, 2)));
        assert_eq!(engine.capital(), capital_after_first_pass);

        engine.tick(300.0);
        engine.submit_answer(Some(1), 300.0).unwrap();
        engine.next_question().unwrap();
        engine.tick(400.0);
        engine.submit_answer(Some(0), 400.0).unwrap();
        engine.next_question().unwrap();
        assert!(engine.save_score().unwrap());

        assert_eq!(engine.top_entries().unwrap().len(), 2);
    }

    #[test]
    fn test_change_category_clears_selection() {
        let dir = tempdir().unwrap();
        let mut engine = playing_engine(&dir);
        for _ in 0..2 {
            engine.tick(100.0);
            engine.submit_answer(None, 100.0).unwrap();
            engine.next_question().unwrap();
        }

        engine.change_category().unwrap();
        assert_eq!(engine.page(), Page::CategorySelect);
        assert!(engine.session().category.is_none());
        assert!(engine.current_question().is_none());
    }

    #[test]
    fn test_purchase_and_equip_through_engine() {
        let dir = tempdir().unwrap();
        let mut engine = playing_engine(&dir);
        engine.tick(100.0);
        engine.submit_answer(Some(1), 100.0).unwrap();
        assert_eq!(engine.capital(), 500);
        assert_eq!(engine.avatar_glyph(), DEFAULT_AVATAR_GLYPH);

        engine.purchase("Silicon Valley Hoodie").unwrap();
        engine.equip("Silicon Valley Hoodie").unwrap();
        assert_eq!(engine.capital(), 0);
        assert_eq!(engine.avatar_glyph(), "🧑‍💻");
    }

    #[test]
    fn test_purchase_unknown_item() {
        let dir = tempdir().unwrap();
        let mut engine = playing_engine(&dir);
        assert!(matches!(
            engine.purchase("Crown Jewels"),
            Err(SessionError::UnknownItem(_))
        ));
    }

    #[test]
    fn test_store_requires_login() {
        let dir = tempdir().unwrap();
        let mut engine = test_engine(&dir);
        assert!(matches!(
            engine.purchase("Classic Suit"),
            Err(SessionError::NotLoggedIn)
        ));
    }

    #[test]
    fn test_equip_unpurchased_item_fails() {
        let dir = tempdir().unwrap();
        let mut engine = playing_engine(&dir);
        assert!(matches!(
            engine.equip("Classic Suit"),
            Err(SessionError::Economy(EconomyError::NotOwned(_)))
        ));
        assert_eq!(engine.avatar_glyph(), DEFAULT_AVATAR_GLYPH);
    }

    #[test]
    fn test_has_premium_through_engine() {
        let dir = tempdir().unwrap();
        let mut engine = playing_engine(&dir);
        assert!(!engine.has_premium());

        if let Some(player) = engine.player.as_mut() {
            player.apply_delta(5000);
        }
        engine.purchase("LinkedIn Premium Badge").unwrap();
        assert!(engine.has_premium());
    }
}
