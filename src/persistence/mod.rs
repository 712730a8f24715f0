//! Run records on disk
//!
//! Layout under the data directory:
//! - `leaderboard.txt`: JSON lines, top 10 (see [`HighScores`])
//! - `stats_<unix-ts>.json`: one snapshot per finished run
//!
//! Writes are best effort from the game's point of view: [`RunRecorder`]
//! implementations log failures instead of returning them.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::highscores::HighScores;

pub const LEADERBOARD_FILE: &str = "leaderboard.txt";

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode run stats: {0}")]
    Encode(#[from] serde_json::Error),
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    LevelComplete,
    GameOver,
}

/// Per-run counters kept by the gameplay scene
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunStats {
    pub bugs_caught: u32,
    pub bugs_repelled: u32,
    pub bugs_reached_plants: u32,
    pub orbs_collected: u32,
    pub questions_correct: u32,
    pub questions_wrong: u32,
    pub plants_lost: u32,
    /// Seconds of simulated play
    pub elapsed: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub player_name: String,
    pub level_id: u32,
    pub score: u32,
    pub outcome: Outcome,
    pub stats: RunStats,
}

/// Sink for finished runs
pub trait RunRecorder {
    fn record_run(&mut self, summary: &RunSummary);
}

/// Keeps summaries in memory (tests, headless demos)
impl RunRecorder for Vec<RunSummary> {
    fn record_run(&mut self, summary: &RunSummary) {
        self.push(summary.clone());
    }
}

/// Drops every summary
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRecorder;

impl RunRecorder for NullRecorder {
    fn record_run(&mut self, _summary: &RunSummary) {}
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// File-backed leaderboard and stats store
#[derive(Debug, Clone)]
pub struct DataStore {
    dir: PathBuf,
}

impl DataStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn leaderboard_path(&self) -> PathBuf {
        self.dir.join(LEADERBOARD_FILE)
    }

    fn ensure_dir(&self) -> Result<(), PersistenceError> {
        std::fs::create_dir_all(&self.dir).map_err(|source| PersistenceError::Io {
            path: self.dir.clone(),
            source,
        })
    }

    pub fn leaderboard(&self) -> Result<HighScores, PersistenceError> {
        let path = self.leaderboard_path();
        HighScores::load_from(&path).map_err(|source| PersistenceError::Io { path, source })
    }

    /// Append a score and rewrite the file with the top entries.
    /// Returns the rank the score reached, if any.
    pub fn append_leaderboard(
        &self,
        name: &str,
        score: u32,
        timestamp: u64,
    ) -> Result<Option<usize>, PersistenceError> {
        self.ensure_dir()?;
        let mut board = self.leaderboard()?;
        let rank = board.add_score(name, score, timestamp);
        let path = self.leaderboard_path();
        board
            .save_to(&path)
            .map_err(|source| PersistenceError::Io { path, source })?;
        Ok(rank)
    }

    /// Write `stats_<timestamp>.json`, returning its path
    pub fn save_stats(
        &self,
        summary: &RunSummary,
        timestamp: u64,
    ) -> Result<PathBuf, PersistenceError> {
        self.ensure_dir()?;
        let path = self.dir.join(format!("stats_{}.json", timestamp));
        let json = serde_json::to_string_pretty(summary)?;
        std::fs::write(&path, json).map_err(|source| PersistenceError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}

impl RunRecorder for DataStore {
    fn record_run(&mut self, summary: &RunSummary) {
        let ts = unix_now();
        match self.append_leaderboard(&summary.player_name, summary.score, ts) {
            Ok(Some(rank)) => log::info!("New leaderboard entry at rank {}", rank),
            Ok(None) => {}
            Err(e) => log::warn!("Leaderboard not updated: {}", e),
        }
        if let Err(e) = self.save_stats(summary, ts) {
            log::warn!("Run stats not saved: {}", e);
        }
    }
}
