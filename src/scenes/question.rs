//! Timed true/false interrupt
//!
//! Owns the suspended scene by value. Whatever happens (answer, cancel,
//! timeout) the continuation's callback runs once and control goes back to
//! that same scene instance.

use glam::Vec2;

use super::{Scene, SceneContext, Transition};
use crate::audio::SoundEffect;
use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH};
use crate::platform::{InputEvent, Key};
use crate::questions::Question;
use crate::renderer::{Canvas, colors, rgb, with_alpha};
use crate::sim::Rect;
use crate::tuning;

/// Seconds left at which the timer turns red
const CRITICAL_TIME: f32 = 5.0;
/// Characters per wrapped line of question text
const WRAP_WIDTH: usize = 48;

/// The suspended scene plus what to do with the result
pub struct Continuation<S> {
    pub scene: Box<S>,
    /// Receives `true` on a correct answer
    pub on_answer: fn(&mut S, bool),
}

/// How the question ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Correct,
    Wrong,
    TimedOut,
}

impl Resolution {
    pub fn is_correct(self) -> bool {
        self == Resolution::Correct
    }
}

pub struct QuestionScene<S> {
    question: Question,
    level_id: u32,
    time_limit: f32,
    time_left: f32,
    continuation: Option<Continuation<S>>,
    true_button: Rect,
    false_button: Rect,
    /// Some(true) over TRUE, Some(false) over FALSE
    hover: Option<bool>,
    anim_timer: f32,
}

impl<S: Scene + 'static> QuestionScene<S> {
    pub fn new(question: Question, level_id: u32, continuation: Continuation<S>) -> Self {
        let time_limit = tuning::question_time_limit(level_id);
        let (w, h, y) = (180.0, 60.0, 420.0);
        Self {
            question,
            level_id,
            time_limit,
            time_left: time_limit,
            continuation: Some(continuation),
            true_button: Rect::new(ARENA_WIDTH / 2.0 - w - 20.0, y, w, h),
            false_button: Rect::new(ARENA_WIDTH / 2.0 + 20.0, y, w, h),
            hover: None,
            anim_timer: 0.0,
        }
    }

    pub fn question(&self) -> &Question {
        &self.question
    }

    pub fn time_left(&self) -> f32 {
        self.time_left
    }

    /// Run the callback and hand back the suspended scene.
    /// `None` once already resolved.
    pub fn resolve(
        &mut self,
        answer: Option<bool>,
        ctx: &mut SceneContext<'_>,
    ) -> Option<(Box<S>, Resolution)> {
        let Continuation { mut scene, on_answer } = self.continuation.take()?;
        let resolution = match answer {
            Some(a) if a == self.question.answer => Resolution::Correct,
            Some(_) => Resolution::Wrong,
            None => Resolution::TimedOut,
        };
        let effect = if resolution.is_correct() {
            SoundEffect::AnswerCorrect
        } else {
            SoundEffect::AnswerWrong
        };
        ctx.audio.play(effect, 1.0);
        log::info!("Level {} question: {:?}", self.level_id, resolution);

        on_answer(&mut scene, resolution.is_correct());
        Some((scene, resolution))
    }

    fn resume(&mut self, answer: Option<bool>, ctx: &mut SceneContext<'_>) -> Transition {
        match self.resolve(answer, ctx) {
            Some((scene, _)) => Transition::Switch(scene),
            None => Transition::None,
        }
    }

    fn button_at(&self, pos: Vec2) -> Option<bool> {
        if self.true_button.contains_point(pos) {
            Some(true)
        } else if self.false_button.contains_point(pos) {
            Some(false)
        } else {
            None
        }
    }

    fn draw_button(&self, canvas: &mut dyn Canvas, rect: Rect, label: &str, value: bool) {
        let base = if value {
            rgb(80, 180, 100)
        } else {
            rgb(210, 80, 80)
        };
        let hovered = self.hover == Some(value);
        if hovered {
            canvas.rect(
                Rect::new(rect.x - 4.0, rect.y - 4.0, rect.w + 8.0, rect.h + 8.0),
                with_alpha(colors::WHITE, 0.4),
            );
        }
        canvas.rect(rect, if hovered { base } else { with_alpha(base, 0.75) });
        canvas.text(
            Vec2::new(rect.x + 40.0, rect.y + 16.0),
            label,
            28.0,
            colors::WHITE,
        );
    }
}

/// Greedy word wrap
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if !line.is_empty() && line.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

impl<S: Scene + 'static> Scene for QuestionScene<S> {
    fn name(&self) -> &'static str {
        "question"
    }

    fn handle_input(&mut self, event: &InputEvent, ctx: &mut SceneContext<'_>) -> Transition {
        match *event {
            InputEvent::KeyDown(Key::True) => {
                ctx.audio.play(SoundEffect::ButtonClick, 1.0);
                self.resume(Some(true), ctx)
            }
            InputEvent::KeyDown(Key::False) => {
                ctx.audio.play(SoundEffect::ButtonClick, 1.0);
                self.resume(Some(false), ctx)
            }
            InputEvent::KeyDown(Key::Cancel) => {
                // Backing out counts as a wrong answer
                ctx.audio.play(SoundEffect::ButtonClick, 1.0);
                self.resume(Some(!self.question.answer), ctx)
            }
            InputEvent::MouseMove(pos) => {
                let hover = self.button_at(pos);
                if hover.is_some() && hover != self.hover {
                    ctx.audio.play(SoundEffect::Hover, 1.0);
                }
                self.hover = hover;
                Transition::None
            }
            InputEvent::MouseDown(pos) => match self.button_at(pos) {
                Some(answer) => {
                    ctx.audio.play(SoundEffect::ButtonClick, 1.0);
                    self.resume(Some(answer), ctx)
                }
                None => Transition::None,
            },
            _ => Transition::None,
        }
    }

    fn update(&mut self, dt: f32, ctx: &mut SceneContext<'_>) -> Transition {
        self.anim_timer += dt;
        self.time_left -= dt;
        if self.time_left <= 0.0 {
            self.time_left = 0.0;
            return self.resume(None, ctx);
        }
        Transition::None
    }

    fn render(&self, canvas: &mut dyn Canvas) {
        // Frozen scene underneath
        if let Some(c) = &self.continuation {
            c.scene.render(canvas);
        }
        canvas.rect(
            Rect::new(0.0, 0.0, ARENA_WIDTH, ARENA_HEIGHT),
            with_alpha(colors::BLACK, 0.55),
        );

        let critical = self.time_left < CRITICAL_TIME;
        canvas.text(
            Vec2::new(ARENA_WIDTH / 2.0 - 130.0, 130.0),
            "Focus Check!",
            36.0,
            colors::WHITE,
        );

        let panel = Rect::new((ARENA_WIDTH - 600.0) / 2.0, 200.0, 600.0, 180.0);
        canvas.rect(panel, rgb(245, 245, 250));
        let border = if critical {
            rgb(255, 100, 100)
        } else {
            rgb(100, 150, 200)
        };
        canvas.rect(Rect::new(panel.x, panel.y, panel.w, 4.0), border);
        for (i, line) in wrap(&self.question.text, WRAP_WIDTH).iter().enumerate() {
            let pos = Vec2::new(panel.x + 30.0, panel.y + 30.0 + i as f32 * 30.0);
            canvas.text(pos, line, 24.0, rgb(40, 40, 40));
        }

        // Countdown in the top-right corner
        let center = Vec2::new(ARENA_WIDTH - 60.0, 60.0);
        let ratio = (self.time_left / self.time_limit).clamp(0.0, 1.0);
        let pulse = if critical {
            (self.anim_timer * 8.0).sin().abs() * 4.0
        } else {
            0.0
        };
        canvas.circle(center, 30.0 + pulse, with_alpha(colors::BLACK, 0.5));
        canvas.circle(
            center,
            26.0 * ratio,
            if critical { colors::ALERT_RED } else { colors::ACCENT },
        );
        canvas.text(
            center - Vec2::new(10.0, 20.0),
            &format!("{}", self.time_left.ceil() as u32),
            32.0,
            colors::WHITE,
        );

        self.draw_button(canvas, self.true_button, "TRUE", true);
        self.draw_button(canvas, self.false_button, "FALSE", false);
        canvas.text(
            Vec2::new(ARENA_WIDTH / 2.0 - 140.0, 500.0),
            "T / 1 = true    F / 2 = false",
            16.0,
            colors::SOFT_GREY,
        );
    }

    fn suspend(self: Box<Self>, _question: Question) -> Box<dyn Scene> {
        // Already interrupting; a nested question is dropped
        self
    }
}
