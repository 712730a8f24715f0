//! Level picker

use glam::Vec2;

use super::widgets::{Axis, Button, Menu};
use super::{GameplayScene, HomeScene, Scene, SceneContext, Transition};
use crate::audio::SoundEffect;
use crate::consts::ARENA_WIDTH;
use crate::platform::{InputEvent, Key};
use crate::questions::Question;
use crate::renderer::{Canvas, colors, rgb, with_alpha};
use crate::sim::Rect;
use crate::tuning::{self, LEVELS};

pub struct LevelSelectScene {
    menu: Menu,
    back: Button,
    anim_timer: f32,
}

impl Default for LevelSelectScene {
    fn default() -> Self {
        Self::new()
    }
}

impl LevelSelectScene {
    pub fn new() -> Self {
        let buttons = LEVELS
            .iter()
            .enumerate()
            .map(|(i, level)| {
                let y = 160.0 + i as f32 * 90.0;
                Button::new(Rect::new(100.0, y - 10.0, 400.0, 65.0), level.name)
            })
            .collect();
        Self {
            menu: Menu::new(buttons, Axis::Vertical),
            back: Button::new(Rect::new(50.0, 500.0, 120.0, 40.0), "Back"),
            anim_timer: 0.0,
        }
    }

    pub fn selected_level(&self) -> u32 {
        LEVELS[self.menu.selected].id
    }

    fn draw_preview(&self, canvas: &mut dyn Canvas) {
        let level = &LEVELS[self.menu.selected];
        let panel = Rect::new(560.0, 150.0, 380.0, 300.0);
        canvas.rect(panel, colors::UI_BG);
        canvas.rect(
            Rect::new(panel.x, panel.y, panel.w, 6.0),
            level.color,
        );

        let x = panel.x + 30.0;
        canvas.text(Vec2::new(x, panel.y + 30.0), level.name, 24.0, level.color);
        canvas.text(Vec2::new(x, panel.y + 70.0), level.description, 18.0, colors::WHITE);
        for (i, feature) in level.features.iter().enumerate() {
            let y = panel.y + 110.0 + i as f32 * 26.0;
            canvas.text(Vec2::new(x, y), feature, 16.0, colors::SOFT_GREY);
        }

        let stats = [
            format!("Target: {} points", tuning::target_score(level.id)),
            format!("Time: {}s per Q", tuning::question_time_limit(level.id)),
            format!("Focus drain: {}/s", tuning::focus_decay(level.id)),
        ];
        for (i, line) in stats.iter().enumerate() {
            let y = panel.y + 200.0 + i as f32 * 24.0;
            canvas.text(Vec2::new(x, y), line, 16.0, rgb(200, 200, 255));
        }
    }
}

impl Scene for LevelSelectScene {
    fn name(&self) -> &'static str {
        "level_select"
    }

    fn handle_input(&mut self, event: &InputEvent, ctx: &mut SceneContext<'_>) -> Transition {
        match *event {
            InputEvent::KeyDown(Key::Cancel) => {
                ctx.audio.play(SoundEffect::ButtonClick, 1.0);
                return Transition::Switch(Box::new(HomeScene::new()));
            }
            InputEvent::MouseDown(pos) if self.back.contains(pos) => {
                ctx.audio.play(SoundEffect::ButtonClick, 1.0);
                return Transition::Switch(Box::new(HomeScene::new()));
            }
            _ => {}
        }

        match self.menu.handle(event, ctx.audio) {
            Some(index) => {
                let level_id = LEVELS[index].id;
                Transition::Switch(Box::new(GameplayScene::new(level_id, ctx)))
            }
            None => Transition::None,
        }
    }

    fn update(&mut self, dt: f32, _ctx: &mut SceneContext<'_>) -> Transition {
        self.anim_timer += dt;
        Transition::None
    }

    fn render(&self, canvas: &mut dyn Canvas) {
        let accent = LEVELS[self.menu.selected].color;
        canvas.fill(rgb(20, 30, 40));
        canvas.text(
            Vec2::new(ARENA_WIDTH / 2.0 - 120.0, 60.0),
            "Select Level",
            36.0,
            rgb(180, 220, 255),
        );

        for (i, button) in self.menu.buttons.iter().enumerate() {
            let level = &LEVELS[i];
            let selected = i == self.menu.selected;
            let pulse = if selected {
                0.15 * (self.anim_timer * 4.0).sin()
            } else {
                0.0
            };
            button.draw(canvas, with_alpha(level.color, 0.85 + pulse), selected);
            canvas.text(
                Vec2::new(button.rect.x + 16.0, button.rect.bottom() - 18.0),
                level.description,
                14.0,
                colors::SOFT_GREY,
            );
        }

        self.back.draw(canvas, with_alpha(accent, 0.5), false);
        self.draw_preview(canvas);
    }

    fn suspend(self: Box<Self>, _question: Question) -> Box<dyn Scene> {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenes::testing::Fixture;

    #[test]
    fn test_keyboard_picks_level() {
        let mut fx = Fixture::new();
        let mut scene = LevelSelectScene::new();
        scene.handle_input(&InputEvent::KeyDown(Key::Down), &mut fx.ctx());
        scene.handle_input(&InputEvent::KeyDown(Key::Down), &mut fx.ctx());
        assert_eq!(scene.selected_level(), 3);
        scene.handle_input(&InputEvent::KeyDown(Key::Down), &mut fx.ctx());
        assert_eq!(scene.selected_level(), 1);
    }

    #[test]
    fn test_click_starts_level() {
        let mut fx = Fixture::new();
        let mut scene = LevelSelectScene::new();
        let second = Vec2::new(300.0, 160.0 + 90.0);
        let t = scene.handle_input(&InputEvent::MouseDown(second), &mut fx.ctx());
        assert!(matches!(t, Transition::Switch(ref s) if s.name() == "gameplay"));
    }

    #[test]
    fn test_back_paths_go_home() {
        let mut fx = Fixture::new();
        let mut scene = LevelSelectScene::new();
        let t = scene.handle_input(&InputEvent::KeyDown(Key::Cancel), &mut fx.ctx());
        assert!(matches!(t, Transition::Switch(ref s) if s.name() == "home"));
        let t = scene.handle_input(&InputEvent::MouseDown(Vec2::new(60.0, 510.0)), &mut fx.ctx());
        assert!(matches!(t, Transition::Switch(ref s) if s.name() == "home"));
    }
}
