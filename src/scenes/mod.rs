//! Scene state machine
//!
//! Exactly one scene is active at a time. Scenes never swap themselves; they
//! return a [`Transition`] and the [`Director`](crate::Director) applies it.
//!
//! | Scene          | Leaves to                                        |
//! |----------------|--------------------------------------------------|
//! | `Home`         | Gameplay(1), LevelSelect, quit                   |
//! | `LevelSelect`  | Gameplay(n), Home                                |
//! | `Gameplay`     | Question (interrupt), Gameplay (retry/next), Home|
//! | `Question`     | the suspended Gameplay instance                  |

pub mod gameplay;
pub mod home;
pub mod level_select;
pub mod question;
pub mod widgets;

use std::fmt;

use rand::Rng;
use rand_pcg::Pcg32;

use crate::audio::AudioPort;
use crate::persistence::RunRecorder;
use crate::platform::InputEvent;
use crate::questions::{Question, QuestionBank};
use crate::renderer::Canvas;

pub use gameplay::{GameplayScene, Phase};
pub use home::HomeScene;
pub use level_select::LevelSelectScene;
pub use question::{Continuation, QuestionScene};

/// What the director should do after a scene call
pub enum Transition {
    None,
    /// Replace the active scene
    Switch(Box<dyn Scene>),
    /// Suspend the active scene behind a question
    Interrupt(Question),
    Quit,
}

impl fmt::Debug for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transition::None => write!(f, "None"),
            Transition::Switch(scene) => write!(f, "Switch({})", scene.name()),
            Transition::Interrupt(q) => write!(f, "Interrupt({:?})", q.text),
            Transition::Quit => write!(f, "Quit"),
        }
    }
}

/// Per-run options fixed at startup
#[derive(Debug, Clone, PartialEq)]
pub struct SessionOptions {
    /// Live particle cap, 0 disables particles
    pub max_particles: usize,
    /// Steer the player automatically
    pub autopilot: bool,
    pub player_name: String,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            max_particles: 256,
            autopilot: false,
            player_name: "Gardener".to_string(),
        }
    }
}

/// Collaborators handed to every scene call
pub struct SceneContext<'a> {
    pub audio: &'a mut dyn AudioPort,
    pub questions: &'a QuestionBank,
    pub records: &'a mut dyn RunRecorder,
    pub session: &'a SessionOptions,
    /// Seed source for new gameplay sessions
    pub seeds: &'a mut Pcg32,
}

impl SceneContext<'_> {
    pub fn next_seed(&mut self) -> u64 {
        self.seeds.random()
    }
}

pub trait Scene {
    fn name(&self) -> &'static str;

    fn handle_input(&mut self, event: &InputEvent, ctx: &mut SceneContext<'_>) -> Transition;

    /// Advance by one fixed step
    fn update(&mut self, dt: f32, ctx: &mut SceneContext<'_>) -> Transition;

    fn render(&self, canvas: &mut dyn Canvas);

    /// Hand this scene over to a question that resumes it once answered.
    /// Scenes that never interrupt return themselves unchanged.
    fn suspend(self: Box<Self>, question: Question) -> Box<dyn Scene>;
}
