//! High score leaderboard
//!
//! Stored as JSON lines, one `{name, score, ts}` object per line, best first.
//! Tracks the top 10 scores; ties keep the earlier entry ahead.

use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub name: String,
    pub score: u32,
    /// Unix timestamp (seconds) when achieved
    #[serde(rename = "ts")]
    pub timestamp: u64,
}

/// High score leaderboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score would stay on the board after being added
    pub fn qualifies(&self, score: u32) -> bool {
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Ties lose to the existing entry
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u32) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Append an entry, re-sort and trim.
    /// Returns the rank achieved (1-indexed) or None if it fell off the board.
    pub fn add_score(&mut self, name: &str, score: u32, timestamp: u64) -> Option<usize> {
        let rank = self.potential_rank(score);
        self.entries.push(HighScoreEntry {
            name: name.to_string(),
            score,
            timestamp,
        });
        // Stable: equal scores keep insertion order
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(MAX_HIGH_SCORES);
        rank
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    /// Read a leaderboard file. Missing file means an empty board; lines that
    /// don't parse are skipped.
    pub fn load_from(path: &Path) -> std::io::Result<Self> {
        let file = match std::fs::File::open(path) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::new()),
            Err(e) => return Err(e),
        };

        let mut scores = Self::new();
        for line in BufReader::new(file).lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<HighScoreEntry>(&line) {
                Ok(entry) => scores.entries.push(entry),
                Err(e) => log::debug!("Skipping leaderboard line: {}", e),
            }
        }
        scores.entries.sort_by(|a, b| b.score.cmp(&a.score));
        scores.entries.truncate(MAX_HIGH_SCORES);
        log::info!("Loaded {} high scores", scores.entries.len());
        Ok(scores)
    }

    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        let mut file = std::fs::File::create(path)?;
        for entry in &self.entries {
            let line = serde_json::to_string(entry).map_err(std::io::Error::other)?;
            writeln!(file, "{}", line)?;
        }
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}
