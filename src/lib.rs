//! Distraction Garden - a focus-defending garden arcade game
//!
//! Core modules:
//! - `sim`: Entities and their per-tick simulation (player, plants, bugs, orbs, particles)
//! - `scenes`: Scene state machines (home, level select, gameplay, question interrupt)
//! - `director`: Top-level loop that owns the active scene
//! - `renderer`: Draw-call collaborator interface
//! - `platform`: Input events and frame timing
//! - `persistence`: Leaderboard and per-run stats on disk
//! - `tuning`: Data-driven level balance

pub mod audio;
pub mod director;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod questions;
pub mod renderer;
pub mod scenes;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use director::Director;
pub use highscores::HighScores;
pub use settings::{QualityPreset, Settings};

/// Game configuration constants
pub mod consts {
    /// Arena dimensions (pixels)
    pub const ARENA_WIDTH: f32 = 1000.0;
    pub const ARENA_HEIGHT: f32 = 650.0;
    /// Height of the HUD band at the top of the arena (not walkable)
    pub const HUD_HEIGHT: f32 = 64.0;

    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the director will account for
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Focus bounds
    pub const FOCUS_MAX: f32 = 100.0;
}
