//! Quiz settings and configuration.

use serde::{Deserialize, Serialize};

/// Configuration for a quiz session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuizSettings {
    /// Seconds a player has to answer each question.
    pub max_time_per_question: u32,
    /// Fraction of a question's base value lost on a wrong answer.
    pub wrong_penalty_factor: f64,
    /// Suggested display refresh cadence in milliseconds.
    ///
    /// Advisory only: the host uses it to pace its countdown polling, but
    /// scoring is computed from wall-clock deltas and never depends on how
    /// often or irregularly `tick` is invoked.
    pub poll_interval_ms: u64,
}

impl QuizSettings {
    /// Create the standard settings.
    pub fn new() -> Self {
        Self {
            max_time_per_question: 20,
            wrong_penalty_factor: 0.3,
            poll_interval_ms: 200,
        }
    }

    /// Validate settings and return any errors.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.max_time_per_question == 0 {
            return Err(SettingsError::ZeroQuestionTimer);
        }
        if !(0.0..=1.0).contains(&self.wrong_penalty_factor) {
            return Err(SettingsError::PenaltyFactorOutOfRange);
        }
        if self.poll_interval_ms == 0 {
            return Err(SettingsError::ZeroPollInterval);
        }
        Ok(())
    }

    /// The per-question time limit as fractional seconds.
    pub fn max_time_secs(&self) -> f64 {
        f64::from(self.max_time_per_question)
    }
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors from invalid quiz settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SettingsError {
    ZeroQuestionTimer,
    PenaltyFactorOutOfRange,
    ZeroPollInterval,
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::ZeroQuestionTimer => {
                write!(f, "Question timer must be at least one second")
            }
            SettingsError::PenaltyFactorOutOfRange => {
                write!(f, "Wrong-answer penalty factor must be between 0 and 1")
            }
            SettingsError::ZeroPollInterval => {
                write!(f, "Poll interval must be at least one millisecond")
            }
        }
    }
}

impl std::error::Error for SettingsError {}
