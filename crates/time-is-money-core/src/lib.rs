//! Time is Money Core Library
//!
//! This crate contains the core game logic for Time is Money, a timed trivia
//! quiz where players answer multiple-choice questions under a countdown,
//! earn or lose capital depending on correctness and speed, spend it on
//! avatar items, and have completed runs recorded to a shared leaderboard.
//!
//! # Design Principles
//!
//! - **No UI dependencies**: This crate is purely game logic; the host
//!   renders pages and polls the countdown
//! - **Deterministic**: Time enters only through host-supplied clock readings
//! - **Serializable**: All state can be saved/loaded via serde
//! - **Thoroughly tested**: Comprehensive test coverage

// Core modules
pub mod settings;
pub mod types;

// Content data
pub mod content;
pub mod store;

// Game state modules
pub mod player;
pub mod session;

// Scoring
pub mod reward;

// Login and persistence
pub mod identity;
pub mod leaderboard;

// Orchestration
pub mod engine;

// Re-exports for convenience
pub use content::{builtin_categories, validate_categories, Category, ContentError, Question};
pub use engine::{LoginError, QuizEngine, SessionError, SetupError, TickResult};
pub use identity::{resolve_name, NameError, MAX_NAME_LEN};
pub use leaderboard::{LeaderboardEntry, LeaderboardError, LeaderboardStore};
pub use player::{EconomyError, Player};
pub use reward::{correct_reward, score, time_left, wrong_penalty};
pub use session::{AnswerOutcome, Page, SessionState};
pub use settings::{QuizSettings, SettingsError};
pub use store::{
    default_catalog, validate_catalog, CatalogError, ItemSlot, StoreItem, DEFAULT_AVATAR_GLYPH,
};
pub use types::*;
