//! Top-level loop owner
//!
//! Holds the active scene and the collaborators scenes borrow through
//! [`SceneContext`]. Each frame: forward input, run fixed simulation steps,
//! render. Transitions are applied right after the call that returned them.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::audio::AudioPort;
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::persistence::RunRecorder;
use crate::platform::InputEvent;
use crate::questions::QuestionBank;
use crate::renderer::Canvas;
use crate::scenes::{GameplayScene, HomeScene, Scene, SceneContext, SessionOptions, Transition};

/// Everything a scene may borrow, kept apart from the scene slot
struct Ports {
    audio: Box<dyn AudioPort>,
    questions: QuestionBank,
    records: Box<dyn RunRecorder>,
    session: SessionOptions,
    seeds: Pcg32,
}

impl Ports {
    fn ctx(&mut self) -> SceneContext<'_> {
        SceneContext {
            audio: self.audio.as_mut(),
            questions: &self.questions,
            records: self.records.as_mut(),
            session: &self.session,
            seeds: &mut self.seeds,
        }
    }
}

pub struct Director {
    /// `None` only while a transition is being applied
    scene: Option<Box<dyn Scene>>,
    ports: Ports,
    accumulator: f32,
    running: bool,
    frames: u64,
    sim_steps: u64,
}

impl Director {
    /// Start on the title screen
    pub fn new(
        audio: Box<dyn AudioPort>,
        questions: QuestionBank,
        records: Box<dyn RunRecorder>,
        session: SessionOptions,
        seed: u64,
    ) -> Self {
        Self {
            scene: Some(Box::new(HomeScene::new())),
            ports: Ports {
                audio,
                questions,
                records,
                session,
                seeds: Pcg32::seed_from_u64(seed),
            },
            accumulator: 0.0,
            running: true,
            frames: 0,
            sim_steps: 0,
        }
    }

    /// Skip the menus and jump straight into a level
    pub fn start_level(&mut self, level_id: u32) {
        let scene = GameplayScene::new(level_id, &mut self.ports.ctx());
        self.apply(Transition::Switch(Box::new(scene)));
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn scene_name(&self) -> &'static str {
        self.scene.as_ref().map_or("none", |s| s.name())
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn sim_steps(&self) -> u64 {
        self.sim_steps
    }

    pub fn session(&self) -> &SessionOptions {
        &self.ports.session
    }

    /// Run one frame. Returns whether the game is still running.
    pub fn frame(&mut self, events: &[InputEvent], elapsed: f32, canvas: &mut dyn Canvas) -> bool {
        if !self.running {
            return false;
        }
        self.frames += 1;

        for event in events {
            self.dispatch(event);
            if !self.running {
                return false;
            }
        }

        let dt = elapsed.clamp(0.0, MAX_FRAME_DT);
        self.accumulator += dt;
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.step(SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;
            if !self.running {
                return false;
            }
        }

        self.render(canvas);
        true
    }

    /// Forward one input event to the active scene
    pub fn dispatch(&mut self, event: &InputEvent) {
        if *event == InputEvent::Quit {
            log::info!("Quit requested");
            self.running = false;
            return;
        }
        let Some(scene) = self.scene.as_mut() else {
            return;
        };
        let transition = scene.handle_input(event, &mut self.ports.ctx());
        self.apply(transition);
    }

    /// Advance the active scene by one fixed step
    pub fn step(&mut self, dt: f32) {
        let Some(scene) = self.scene.as_mut() else {
            return;
        };
        let transition = scene.update(dt, &mut self.ports.ctx());
        self.sim_steps += 1;
        self.apply(transition);
    }

    pub fn render(&self, canvas: &mut dyn Canvas) {
        if let Some(scene) = &self.scene {
            scene.render(canvas);
        }
    }

    fn apply(&mut self, transition: Transition) {
        match transition {
            Transition::None => {}
            Transition::Switch(next) => {
                log::debug!("Scene {} -> {}", self.scene_name(), next.name());
                self.scene = Some(next);
            }
            Transition::Interrupt(question) => {
                if let Some(current) = self.scene.take() {
                    log::debug!("Scene {} interrupted by question", current.name());
                    self.scene = Some(current.suspend(question));
                }
            }
            Transition::Quit => {
                log::info!("Scene {} quit the game", self.scene_name());
                self.running = false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SilentAudio;
    use crate::persistence::NullRecorder;
    use crate::platform::Key;
    use crate::renderer::DrawList;
    use crate::scenes::testing::QUESTIONS;

    fn director() -> Director {
        Director::new(
            Box::new(SilentAudio),
            QuestionBank::from_json_str(QUESTIONS).unwrap(),
            Box::new(NullRecorder),
            SessionOptions::default(),
            7,
        )
    }

    #[test]
    fn test_starts_home_and_enters_gameplay() {
        let mut d = director();
        let mut canvas = DrawList::new();
        assert_eq!(d.scene_name(), "home");
        assert!(d.frame(&[InputEvent::KeyDown(Key::Confirm)], SIM_DT, &mut canvas));
        assert_eq!(d.scene_name(), "gameplay");
        assert!(!canvas.is_empty());
    }

    #[test]
    fn test_quit_event_stops() {
        let mut d = director();
        let mut canvas = DrawList::new();
        assert!(!d.frame(&[InputEvent::Quit], SIM_DT, &mut canvas));
        assert!(!d.is_running());
        // Further frames are ignored
        assert!(!d.frame(&[], SIM_DT, &mut canvas));
        assert_eq!(d.frames(), 1);
    }

    #[test]
    fn test_exit_from_menu_quits() {
        let mut d = director();
        d.dispatch(&InputEvent::KeyDown(Key::Cancel));
        assert!(!d.is_running());
    }

    #[test]
    fn test_frame_time_is_clamped() {
        let mut d = director();
        let mut canvas = DrawList::new();
        // A huge hitch is clamped to 0.1 s, about 6 steps
        d.frame(&[], 5.0, &mut canvas);
        assert!((5..=6).contains(&d.sim_steps()));

        let mut d = director();
        for _ in 0..10 {
            d.frame(&[], SIM_DT / 2.0, &mut canvas);
        }
        assert_eq!(d.sim_steps(), 5);
    }

    #[test]
    fn test_start_level_skips_menus() {
        let mut d = director();
        d.start_level(3);
        assert_eq!(d.scene_name(), "gameplay");
    }
}
