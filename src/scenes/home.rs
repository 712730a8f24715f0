//! Title screen

use glam::Vec2;

use super::widgets::{Axis, Button, Menu};
use super::{GameplayScene, LevelSelectScene, Scene, SceneContext, Transition};
use crate::audio::SoundEffect;
use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH};
use crate::platform::{InputEvent, Key};
use crate::questions::Question;
use crate::renderer::{Canvas, colors};
use crate::sim::Rect;

const START: usize = 0;
const SELECT_LEVEL: usize = 1;
const EXIT: usize = 2;

pub struct HomeScene {
    menu: Menu,
    anim_timer: f32,
}

impl Default for HomeScene {
    fn default() -> Self {
        Self::new()
    }
}

impl HomeScene {
    pub fn new() -> Self {
        let labels = ["Start Game", "Select Level", "Exit"];
        let buttons = labels
            .into_iter()
            .enumerate()
            .map(|(i, label)| {
                let y = 240.0 + i as f32 * 50.0;
                Button::new(Rect::new(ARENA_WIDTH / 2.0 - 150.0, y - 8.0, 300.0, 40.0), label)
            })
            .collect();
        Self {
            menu: Menu::new(buttons, Axis::Vertical),
            anim_timer: 0.0,
        }
    }

    fn activate(&self, index: usize, ctx: &mut SceneContext<'_>) -> Transition {
        match index {
            START => Transition::Switch(Box::new(GameplayScene::new(1, ctx))),
            SELECT_LEVEL => Transition::Switch(Box::new(LevelSelectScene::new())),
            EXIT => Transition::Quit,
            _ => Transition::None,
        }
    }
}

impl Scene for HomeScene {
    fn name(&self) -> &'static str {
        "home"
    }

    fn handle_input(&mut self, event: &InputEvent, ctx: &mut SceneContext<'_>) -> Transition {
        if *event == InputEvent::KeyDown(Key::Cancel) {
            ctx.audio.play(SoundEffect::ButtonClick, 1.0);
            return Transition::Quit;
        }
        match self.menu.handle(event, ctx.audio) {
            Some(index) => self.activate(index, ctx),
            None => Transition::None,
        }
    }

    fn update(&mut self, dt: f32, _ctx: &mut SceneContext<'_>) -> Transition {
        self.anim_timer += dt;
        Transition::None
    }

    fn render(&self, canvas: &mut dyn Canvas) {
        canvas.fill(colors::SKY);
        canvas.rect(
            Rect::new(0.0, ARENA_HEIGHT - 120.0, ARENA_WIDTH, 120.0),
            colors::GRASS_LIGHT,
        );

        let glow = (self.anim_timer.sin() + 1.0) / 2.0;
        let title_y = 110.0 + glow * 4.0;
        canvas.text(
            Vec2::new(ARENA_WIDTH / 2.0 - 210.0, title_y),
            "The Distraction Garden",
            44.0,
            colors::FOCUS_GREEN,
        );
        canvas.text(
            Vec2::new(ARENA_WIDTH / 2.0 - 150.0, title_y + 56.0),
            "Keep your focus blooming",
            20.0,
            colors::ACCENT,
        );

        self.menu.draw(canvas, colors::UI_HIGHLIGHT);

        canvas.text(
            Vec2::new(ARENA_WIDTH / 2.0 - 220.0, ARENA_HEIGHT - 40.0),
            "Arrows move  |  Enter selects  |  Esc quits",
            16.0,
            colors::BLACK,
        );
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
    fn test_start_opens_level_one() {
        let mut fx = Fixture::new();
        let mut home = HomeScene::new();
        let t = home.handle_input(&InputEvent::KeyDown(Key::Confirm), &mut fx.ctx());
        match t {
            Transition::Switch(scene) => assert_eq!(scene.name(), "gameplay"),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(fx.audio.count(SoundEffect::ButtonClick), 1);
        assert_eq!(fx.audio.count(SoundEffect::LevelStart), 1);
    }

    #[test]
    fn test_select_level_and_exit() {
        let mut fx = Fixture::new();
        let mut home = HomeScene::new();
        home.handle_input(&InputEvent::KeyDown(Key::Down), &mut fx.ctx());
        let t = home.handle_input(&InputEvent::KeyDown(Key::Confirm), &mut fx.ctx());
        assert!(matches!(t, Transition::Switch(ref s) if s.name() == "level_select"));

        let exit = Vec2::new(ARENA_WIDTH / 2.0, 240.0 + 2.0 * 50.0);
        let t = home.handle_input(&InputEvent::MouseDown(exit), &mut fx.ctx());
        assert!(matches!(t, Transition::Quit));
    }

    #[test]
    fn test_escape_quits() {
        let mut fx = Fixture::new();
        let mut home = HomeScene::new();
        let t = home.handle_input(&InputEvent::KeyDown(Key::Cancel), &mut fx.ctx());
        assert!(matches!(t, Transition::Quit));
    }

    #[test]
    fn test_renders_menu_labels() {
        let mut list = crate::renderer::DrawList::new();
        HomeScene::new().render(&mut list);
        let texts: Vec<&str> = list.texts().collect();
        for label in ["Start Game", "Select Level", "Exit"] {
            assert!(texts.contains(&label));
        }
    }
}
