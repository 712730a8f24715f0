//! Gameplay session for one level
//!
//! Tick order while active:
//! 1. Question cooldown
//! 2. Focus decay
//! 3. Level-complete check, then game-over check (either ends the tick)
//! 4. Bug / orb spawn timers
//! 5. Entity updates (player, plants, bugs, orbs, particles), event drain
//! 6. Player overlap sweep over bugs and orbs

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::question::{Continuation, QuestionScene};
use super::widgets::{Axis, Button, Menu};
use super::{HomeScene, Scene, SceneContext, Transition};
use crate::audio::SoundEffect;
use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH, FOCUS_MAX, HUD_HEIGHT};
use crate::persistence::{Outcome, RunStats, RunSummary};
use crate::platform::{Controls, InputEvent, Key};
use crate::questions::Question;
use crate::renderer::{Canvas, colors, rgb, with_alpha};
use crate::sim::orb::{ORB_FOCUS, ORB_SCORE};
use crate::sim::{
    BugKind, Contact, Entity, GameEvent, Garden, INTERACT_RADIUS, Interaction, Rect, WorldView,
    as_dyn, update_all,
};
use crate::tuning::{self, LEVEL_COUNT};

/// Session phase; the terminal phases are mutually exclusive by construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Active,
    LevelComplete,
    GameOver,
}

impl Phase {
    pub fn is_terminal(self) -> bool {
        self != Phase::Active
    }
}

/// Horizontal dead zone for autopilot steering
const AUTOPILOT_SLACK: f32 = 6.0;

pub struct GameplayScene {
    level_id: u32,
    seed: u64,
    garden: Garden,
    focus: f32,
    target_score: u32,
    phase: Phase,
    bug_timer: f32,
    orb_timer: f32,
    question_cooldown: f32,
    stats: RunStats,
    rng: Pcg32,
    controls: Controls,
    /// Retry|Home or Next|Home, built when the session ends
    overlay: Option<Menu>,
    focus_pulse: f32,
    anim_timer: f32,
    recorded: bool,
}

impl GameplayScene {
    /// Start a session, drawing its seed from the context
    pub fn new(level_id: u32, ctx: &mut SceneContext<'_>) -> Self {
        let scene = Self::with_seed(level_id, ctx.next_seed());
        ctx.audio.play(SoundEffect::LevelStart, 1.0);
        log::info!(
            "Level {} started (target {}, seed {})",
            level_id,
            scene.target_score,
            scene.seed
        );
        scene
    }

    pub fn with_seed(level_id: u32, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let garden = Garden::new(&mut rng);
        Self {
            level_id,
            seed,
            garden,
            focus: FOCUS_MAX,
            target_score: tuning::target_score(level_id),
            phase: Phase::Active,
            bug_timer: 0.0,
            orb_timer: 0.0,
            question_cooldown: 0.0,
            stats: RunStats::default(),
            rng,
            controls: Controls::default(),
            overlay: None,
            focus_pulse: 0.0,
            anim_timer: 0.0,
            recorded: false,
        }
    }

    pub fn level_id(&self) -> u32 {
        self.level_id
    }

    pub fn focus(&self) -> f32 {
        self.focus
    }

    pub fn score(&self) -> u32 {
        self.garden.player.score
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn garden(&self) -> &Garden {
        &self.garden
    }

    /// Direct access for scripted scenarios
    pub fn garden_mut(&mut self) -> &mut Garden {
        &mut self.garden
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    /// Answer callback run by the question scene before control returns here
    pub fn on_question_result(&mut self, correct: bool) {
        // Keys released while the question was up never reached us
        self.controls.release_all();
        if correct {
            self.stats.questions_correct += 1;
            self.focus = (self.focus + tuning::CORRECT_ANSWER_FOCUS).min(FOCUS_MAX);
            self.focus_pulse = 1.5;
        } else {
            self.stats.questions_wrong += 1;
            self.focus -= tuning::WRONG_ANSWER_FOCUS;
            self.bug_timer = tuning::WRONG_ANSWER_BUG_TIMER;
        }
        log::debug!("Question answered (correct: {}), focus {:.1}", correct, self.focus);
    }

    fn field() -> Rect {
        Rect::new(0.0, HUD_HEIGHT, ARENA_WIDTH, ARENA_HEIGHT - HUD_HEIGHT)
    }

    fn arena() -> Rect {
        Rect::new(0.0, 0.0, ARENA_WIDTH, ARENA_HEIGHT)
    }

    fn finish(&mut self, phase: Phase, ctx: &mut SceneContext<'_>) {
        self.phase = phase;
        let (outcome, effect, first) = match phase {
            Phase::LevelComplete => {
                self.focus = FOCUS_MAX;
                let first = if self.level_id < LEVEL_COUNT { "Next Level" } else { "Finish" };
                (Outcome::LevelComplete, SoundEffect::LevelComplete, first)
            }
            Phase::GameOver => {
                self.focus = 0.0;
                (Outcome::GameOver, SoundEffect::GameOver, "Retry")
            }
            Phase::Active => return,
        };
        ctx.audio.play(effect, 1.0);
        log::info!(
            "Level {} ended: {:?} with score {}",
            self.level_id,
            outcome,
            self.score()
        );

        let y = 420.0;
        self.overlay = Some(Menu::new(
            vec![
                Button::new(Rect::new(ARENA_WIDTH / 2.0 - 170.0, y, 150.0, 50.0), first),
                Button::new(Rect::new(ARENA_WIDTH / 2.0 + 20.0, y, 150.0, 50.0), "Home"),
            ],
            Axis::Horizontal,
        ));

        if !self.recorded {
            self.recorded = true;
            ctx.records.record_run(&RunSummary {
                player_name: ctx.session.player_name.clone(),
                level_id: self.level_id,
                score: self.score(),
                outcome,
                stats: self.stats.clone(),
            });
        }
    }

    fn apply_events(&mut self, events: Vec<GameEvent>, max_particles: usize) {
        for event in events {
            match event {
                GameEvent::Burst { at, kind, count } => {
                    self.garden
                        .burst(at, kind, count, max_particles, &mut self.rng);
                }
                GameEvent::PlantGrew { .. } => {
                    self.garden.player.score += tuning::PLANT_LEVEL_BONUS;
                }
                GameEvent::PlantLost { plant_id } => {
                    self.stats.plants_lost += 1;
                    log::info!("Plant {} lost", plant_id);
                }
                GameEvent::BugReachedPlant { .. } => {
                    self.stats.bugs_reached_plants += 1;
                }
            }
        }
    }

    /// Apply one interaction result. A popup may ask for an interrupt.
    fn apply_interaction(
        &mut self,
        result: Interaction,
        ctx: &mut SceneContext<'_>,
    ) -> Option<Question> {
        match result {
            Interaction::BugDestroyed {
                kind,
                value,
                focus_penalty,
            } => {
                let effect = match kind {
                    BugKind::Chat => SoundEffect::ChatBugHit,
                    BugKind::Notif => SoundEffect::NotifBugHit,
                    BugKind::Popup => SoundEffect::PopupBugHit,
                };
                ctx.audio.play(effect, 1.0);
                log::debug!("Swatted {} bug for {} points", kind.as_str(), value);
                self.stats.bugs_caught += 1;
                self.garden.player.score += value;
                self.focus = (self.focus - focus_penalty).max(0.0);
                self.focus_pulse = 1.0;
                None
            }
            Interaction::PopupTriggered => {
                self.stats.bugs_caught += 1;
                if self.question_cooldown > 0.0 {
                    return None;
                }
                self.question_cooldown = tuning::QUESTION_COOLDOWN;
                ctx.audio.play(SoundEffect::PopupBugHit, 1.0);
                Some(ctx.questions.pick(self.level_id, &mut self.rng))
            }
            Interaction::FlowCollected => {
                ctx.audio.play(SoundEffect::FlowOrbCollect, 1.0);
                self.stats.orbs_collected += 1;
                self.focus = (self.focus + ORB_FOCUS).min(FOCUS_MAX);
                self.garden.player.score += ORB_SCORE;
                self.focus_pulse = 1.5;
                None
            }
            Interaction::Repelled { .. } => {
                // Score already credited by the player
                ctx.audio.play(SoundEffect::Hover, 0.8);
                self.stats.bugs_repelled += 1;
                None
            }
        }
    }

    /// Fire the player's interaction pulse
    fn pulse(&mut self, ctx: &mut SceneContext<'_>) {
        let mut events = Vec::new();
        let results = self.garden.player.interact_nearby(
            as_dyn(&mut self.garden.bugs).chain(as_dyn(&mut self.garden.orbs)),
            INTERACT_RADIUS,
            &mut events,
        );
        self.garden.prune();
        for result in results {
            self.apply_interaction(result, ctx);
        }
        self.apply_events(events, ctx.session.max_particles);
    }

    /// Steering toward the lowest bug, or the nearest orb when no bug is
    /// falling. Also reports whether a notification badge is close enough
    /// to push away instead of swatting.
    fn autopilot(&self) -> (Vec2, bool) {
        let me = self.garden.player.rect.center();
        let lowest_bug = self
            .garden
            .bugs
            .iter()
            .filter(|b| b.rect.bottom() > HUD_HEIGHT)
            .max_by(|a, b| a.rect.y.total_cmp(&b.rect.y));

        let target = match lowest_bug {
            Some(bug) => Some(bug.rect.center()),
            None => self
                .garden
                .orbs
                .iter()
                .map(|o| o.rect.center())
                .min_by(|a, b| a.distance_squared(me).total_cmp(&b.distance_squared(me))),
        };

        let steer = match target {
            Some(t) => {
                let axis = |d: f32| {
                    if d.abs() <= AUTOPILOT_SLACK {
                        0.0
                    } else {
                        d.signum()
                    }
                };
                Vec2::new(axis(t.x - me.x), axis(t.y - me.y))
            }
            None => Vec2::ZERO,
        };

        let notif_close = self.garden.bugs.iter().any(|b| {
            b.kind == BugKind::Notif && b.rect.center().distance(me) <= INTERACT_RADIUS
        });
        (steer, notif_close)
    }

    fn update_entities(&mut self, dt: f32, steer: Vec2, events: &mut Vec<GameEvent>) {
        let (arena, field) = (Self::arena(), Self::field());
        let focus = self.focus;
        let garden = &mut self.garden;

        let mut world = WorldView::new(focus, arena, field, events).with_steer(steer);
        garden.player.update(dt, &mut world);

        let mut world = WorldView::new(focus, arena, field, events);
        update_all(&mut garden.plants, dt, &mut world);

        let mut world = WorldView::new(focus, arena, field, events).with_plants(&mut garden.plants);
        update_all(&mut garden.bugs, dt, &mut world);

        let mut world = WorldView::new(focus, arena, field, events);
        update_all(&mut garden.orbs, dt, &mut world);
        update_all(&mut garden.particles, dt, &mut world);

        // Plants destroyed by bugs this tick
        garden.prune();
    }

    /// Overlap sweep between the player and bugs/orbs
    fn sweep(&mut self, events: &mut Vec<GameEvent>) -> Vec<Interaction> {
        let player = self.garden.player.rect;
        let mut results = Vec::new();
        let targets = as_dyn(&mut self.garden.bugs).chain(as_dyn(&mut self.garden.orbs));
        for target in targets {
            if target.is_alive() && target.bounds().intersects(&player) {
                results.extend(target.interact(Contact::Touch, events));
            }
        }
        self.garden.prune();
        results
    }

    fn handle_overlay_choice(&self, index: usize, ctx: &mut SceneContext<'_>) -> Transition {
        match (self.phase, index) {
            (Phase::GameOver, 0) => {
                Transition::Switch(Box::new(GameplayScene::new(self.level_id, ctx)))
            }
            (Phase::LevelComplete, 0) if self.level_id < LEVEL_COUNT => {
                Transition::Switch(Box::new(GameplayScene::new(self.level_id + 1, ctx)))
            }
            _ => Transition::Switch(Box::new(HomeScene::new())),
        }
    }

    fn draw_hud(&self, canvas: &mut dyn Canvas) {
        canvas.rect(Rect::new(0.0, 0.0, ARENA_WIDTH, HUD_HEIGHT), colors::UI_BG);

        let name = tuning::level_info(self.level_id)
            .map(|l| l.name)
            .unwrap_or("Free Play");
        canvas.text(
            Vec2::new(20.0, 10.0),
            &format!("Level {}: {}", self.level_id, name),
            18.0,
            colors::WHITE,
        );
        canvas.text(
            Vec2::new(20.0, 36.0),
            &format!("Score: {}/{}", self.score(), self.target_score),
            16.0,
            colors::PARTICLE_GOLD,
        );

        // Focus bar
        let bar = Rect::new(ARENA_WIDTH / 2.0 - 150.0, 22.0, 300.0, 20.0);
        canvas.rect(bar, with_alpha(colors::BLACK, 0.5));
        let pct = (self.focus / FOCUS_MAX).clamp(0.0, 1.0);
        let fill = if pct > 0.6 {
            colors::FOCUS_GREEN
        } else if pct > 0.3 {
            colors::NOTE_ORANGE
        } else {
            colors::ALERT_RED
        };
        canvas.rect(Rect::new(bar.x, bar.y, bar.w * pct, bar.h), fill);
        if self.focus_pulse > 0.0 {
            canvas.rect(bar, with_alpha(colors::WHITE, 0.2 * self.focus_pulse.min(1.0)));
        }
        canvas.text(
            Vec2::new(bar.x, 4.0),
            &format!("Focus: {:.0}", self.focus.max(0.0)),
            14.0,
            colors::WHITE,
        );

        canvas.text(
            Vec2::new(ARENA_WIDTH - 220.0, 10.0),
            &format!("Caught: {}  Repels: {}", self.stats.bugs_caught, self.garden.player.repels),
            14.0,
            colors::WHITE,
        );
        canvas.text(
            Vec2::new(ARENA_WIDTH - 220.0, 36.0),
            &format!("Plants: {}", self.garden.living_plants()),
            14.0,
            colors::WHITE,
        );
    }

    fn draw_overlay(&self, canvas: &mut dyn Canvas, menu: &Menu) {
        canvas.rect(Self::arena(), with_alpha(colors::BLACK, 0.6));
        let (title, color) = match self.phase {
            Phase::LevelComplete => ("Level Complete!", colors::FOCUS_GREEN),
            _ => ("Game Over", colors::ALERT_RED),
        };
        canvas.text(Vec2::new(ARENA_WIDTH / 2.0 - 130.0, 200.0), title, 42.0, color);
        canvas.text(
            Vec2::new(ARENA_WIDTH / 2.0 - 120.0, 280.0),
            &format!("Final score: {}", self.score()),
            22.0,
            colors::WHITE,
        );
        canvas.text(
            Vec2::new(ARENA_WIDTH / 2.0 - 200.0, 320.0),
            &format!(
                "Bugs caught {}  |  Orbs {}  |  Questions {}/{}",
                self.stats.bugs_caught,
                self.stats.orbs_collected,
                self.stats.questions_correct,
                self.stats.questions_correct + self.stats.questions_wrong
            ),
            16.0,
            colors::SOFT_GREY,
        );
        menu.draw(canvas, color);
    }
}

impl Scene for GameplayScene {
    fn name(&self) -> &'static str {
        "gameplay"
    }

    fn handle_input(&mut self, event: &InputEvent, ctx: &mut SceneContext<'_>) -> Transition {
        self.controls.apply(event);

        if self.phase.is_terminal() {
            if *event == InputEvent::KeyDown(Key::Cancel) {
                ctx.audio.play(SoundEffect::ButtonClick, 1.0);
                return Transition::Switch(Box::new(HomeScene::new()));
            }
            let choice = match self.overlay.as_mut() {
                Some(menu) => menu.handle(event, ctx.audio),
                None => None,
            };
            return match choice {
                Some(index) => self.handle_overlay_choice(index, ctx),
                None => Transition::None,
            };
        }

        match *event {
            InputEvent::KeyDown(Key::Cancel) => {
                ctx.audio.play(SoundEffect::ButtonClick, 1.0);
                log::info!("Level {} abandoned", self.level_id);
                Transition::Switch(Box::new(HomeScene::new()))
            }
            InputEvent::KeyDown(Key::Interact) => {
                self.pulse(ctx);
                Transition::None
            }
            _ => Transition::None,
        }
    }

    fn update(&mut self, dt: f32, ctx: &mut SceneContext<'_>) -> Transition {
        self.anim_timer += dt;
        self.focus_pulse = (self.focus_pulse - dt * 2.0).max(0.0);

        if self.phase.is_terminal() {
            // Only decoration keeps moving
            let mut events = Vec::new();
            let mut world = WorldView::new(self.focus, Self::arena(), Self::field(), &mut events);
            update_all(&mut self.garden.particles, dt, &mut world);
            return Transition::None;
        }
        self.stats.elapsed += dt;

        if self.question_cooldown > 0.0 {
            self.question_cooldown = (self.question_cooldown - dt).max(0.0);
        }

        self.focus -= tuning::focus_decay(self.level_id) * dt;

        if self.score() >= self.target_score {
            self.finish(Phase::LevelComplete, ctx);
            return Transition::None;
        }
        if self.focus <= 0.0 {
            self.finish(Phase::GameOver, ctx);
            return Transition::None;
        }

        self.bug_timer += dt;
        if self.bug_timer >= tuning::bug_spawn_interval(self.level_id) {
            self.garden.spawn_bug(self.level_id, &mut self.rng);
            self.bug_timer = 0.0;
        }
        self.orb_timer += dt;
        if self.orb_timer >= tuning::ORB_SPAWN_INTERVAL {
            self.garden.spawn_orb(&mut self.rng);
            self.orb_timer = 0.0;
        }

        let steer = if ctx.session.autopilot {
            let (steer, notif_close) = self.autopilot();
            if notif_close {
                self.pulse(ctx);
            }
            steer
        } else {
            self.controls.steer()
        };

        let max_particles = ctx.session.max_particles;
        let mut events = Vec::new();
        self.update_entities(dt, steer, &mut events);
        self.apply_events(std::mem::take(&mut events), max_particles);

        let results = self.sweep(&mut events);
        let mut interrupt = None;
        for result in results {
            if let Some(question) = self.apply_interaction(result, ctx) {
                interrupt.get_or_insert(question);
            }
        }
        self.apply_events(events, max_particles);

        match interrupt {
            Some(question) => Transition::Interrupt(question),
            None => Transition::None,
        }
    }

    fn render(&self, canvas: &mut dyn Canvas) {
        let tint = tuning::level_info(self.level_id)
            .map(|l| l.color)
            .unwrap_or(colors::SKY);
        canvas.fill(colors::SKY);
        canvas.rect(Self::arena(), with_alpha(tint, 0.12));

        // Ground stripes
        let ground = ARENA_HEIGHT - 160.0;
        for i in 0..8 {
            let y = ground + i as f32 * 20.0;
            let c = if i % 2 == 0 { colors::GRASS_LIGHT } else { colors::GRASS_DARK };
            canvas.rect(Rect::new(0.0, y, ARENA_WIDTH, 20.0), c);
        }
        // Drifting motes
        for i in 0..6 {
            let phase = self.anim_timer * 0.5 + i as f32;
            let pos = Vec2::new(
                (i as f32 * 173.0 + phase.sin() * 30.0) % ARENA_WIDTH,
                120.0 + (phase * 0.7).cos() * 40.0 + i as f32 * 45.0,
            );
            canvas.circle(pos, 3.0, with_alpha(rgb(255, 255, 255), 0.4));
        }

        self.garden.draw(canvas);
        self.draw_hud(canvas);

        if let Some(menu) = &self.overlay {
            self.draw_overlay(canvas, menu);
        }
    }

    fn suspend(self: Box<Self>, question: Question) -> Box<dyn Scene> {
        let level_id = self.level_id;
        log::debug!("Suspending level {} for a question", level_id);
        Box::new(QuestionScene::new(
            question,
            level_id,
            Continuation {
                scene: self,
                on_answer: GameplayScene::on_question_result,
            },
        ))
    }
}
