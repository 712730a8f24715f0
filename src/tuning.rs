//! Level balance tables
//!
//! Per-level numbers in one place. Level ids are 1-based; anything outside
//! the table falls back to the level-1 or documented default value.

use crate::renderer::{Color, rgb};

/// Number of playable levels
pub const LEVEL_COUNT: u32 = 3;

/// Static description of a level for menus
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelInfo {
    pub id: u32,
    pub name: &'static str,
    pub description: &'static str,
    pub color: Color,
    pub features: [&'static str; 3],
}

pub static LEVELS: [LevelInfo; LEVEL_COUNT as usize] = [
    LevelInfo {
        id: 1,
        name: "Notification Overload",
        description: "Basic distractions",
        color: rgb(100, 200, 255),
        features: ["Basic notifications", "Slow bug spawn", "Easy questions"],
    },
    LevelInfo {
        id: 2,
        name: "Multitasking Trap",
        description: "Multiple distractions",
        color: rgb(255, 200, 100),
        features: ["Multiple distractions", "Faster bugs", "Medium questions"],
    },
    LevelInfo {
        id: 3,
        name: "Burnout Phase",
        description: "Intense pressure",
        color: rgb(255, 100, 100),
        features: ["Intense pressure", "Rapid spawn", "Hard questions"],
    },
];

pub fn level_info(level_id: u32) -> Option<&'static LevelInfo> {
    LEVELS.iter().find(|l| l.id == level_id)
}

/// Score needed to complete a level
pub fn target_score(level_id: u32) -> u32 {
    match level_id {
        2 => 200,
        3 => 300,
        _ => 100,
    }
}

/// Seconds allowed per question
pub fn question_time_limit(level_id: u32) -> f32 {
    match level_id {
        1 => 12.0,
        2 => 10.0,
        3 => 8.0,
        _ => 10.0,
    }
}

/// Base bug fall speed in pixels per 1/60 s
pub fn bug_base_speed(level_id: u32) -> f32 {
    match level_id {
        2 => 1.5,
        3 => 2.0,
        _ => 1.0,
    }
}

/// Seconds between bug spawns
pub fn bug_spawn_interval(level_id: u32) -> f32 {
    (3.0 - 0.3 * level_id as f32).max(1.5)
}

/// Seconds between flow orb spawns
pub const ORB_SPAWN_INTERVAL: f32 = 8.0;

/// Focus lost per second
pub fn focus_decay(level_id: u32) -> f32 {
    2.0 + level_id as f32
}

/// Minimum seconds between two popup questions
pub const QUESTION_COOLDOWN: f32 = 2.0;
/// Focus restored by a correct answer
pub const CORRECT_ANSWER_FOCUS: f32 = 15.0;
/// Focus lost on a wrong or timed-out answer
pub const WRONG_ANSWER_FOCUS: f32 = 12.0;
/// Bug spawn timer after a wrong answer, a short grace period
pub const WRONG_ANSWER_BUG_TIMER: f32 = -1.2;
/// Score for each plant level-up
pub const PLANT_LEVEL_BONUS: u32 = crate::sim::plant::LEVEL_UP_BONUS;
