//! Append-only leaderboard persistence.
//!
//! One CSV file shared by every session on the host, header row
//! `username,capital`, one row per completed category pass. Append is the
//! only mutating operation; rows are never rewritten or deduplicated, so
//! interleaved appends from concurrent sessions stay independent.

use crate::types::Capital;
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};

/// One recorded category completion.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// Resolved player name, possibly carrying a `(n)` disambiguation suffix.
    pub username: String,
    /// Final capital at the moment the category was completed. May be
    /// negative.
    pub capital: Capital,
}

/// File-backed append-only store of completed runs.
#[derive(Clone, Debug)]
pub struct LeaderboardStore {
    path: PathBuf,
}

impl LeaderboardStore {
    /// Create a store backed by the given file path. The file itself is
    /// created lazily on the first [`record`](Self::record).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read all recorded entries in insertion order. A missing file reads
    /// as an empty list.
    pub fn entries(&self) -> Result<Vec<LeaderboardEntry>, LeaderboardError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let mut reader = csv::Reader::from_path(&self.path)?;
        let mut entries = Vec::new();
        for row in reader.deserialize() {
            entries.push(row?);
        }
        Ok(entries)
    }

    /// All recorded usernames, in insertion order.
    pub fn existing_names(&self) -> Result<Vec<String>, LeaderboardError> {
        Ok(self.entries()?.into_iter().map(|e| e.username).collect())
    }

    /// Append one entry, writing the header row only when creating the file.
    pub fn record(&self, username: &str, capital: Capital) -> Result<(), LeaderboardError> {
        let is_new = !self.path.exists();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(is_new)
            .from_writer(file);
        writer.serialize(LeaderboardEntry {
            username: username.to_string(),
            capital,
        })?;
        writer.flush()?;
        Ok(())
    }

    /// All entries sorted by capital descending. The sort is stable, so
    /// ties keep their insertion order.
    pub fn top_entries(&self) -> Result<Vec<LeaderboardEntry>, LeaderboardError> {
        let mut entries = self.entries()?;
        entries.sort_by(|a, b| b.capital.cmp(&a.capital));
        Ok(entries)
    }
}

/// Errors from leaderboard file operations.
#[derive(Debug)]
pub enum LeaderboardError {
    /// IO error during file operations.
    Io(io::Error),
    /// Malformed or unwritable CSV data.
    Csv(csv::Error),
}

impl std::fmt::Display for LeaderboardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeaderboardError::Io(e) => write!(f, "IO error: {}", e),
            LeaderboardError::Csv(e) => write!(f, "CSV error: {}", e),
        }
    }
}

impl std::error::Error for LeaderboardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LeaderboardError::Io(e) => Some(e),
            LeaderboardError::Csv(e) => Some(e),
        }
    }
}

impl From<io::Error> for LeaderboardError {
    fn from(err: io::Error) -> Self {
        LeaderboardError::Io(err)
    }
}

impl From<csv::Error> for LeaderboardError {
    fn from(err: csv::Error) -> Self {
        LeaderboardError::Csv(err)
    }
}
