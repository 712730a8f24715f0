//! End-to-end scene flow through the public API

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use distraction_garden::Director;
use distraction_garden::audio::{AudioLog, SilentAudio, SoundEffect};
use distraction_garden::consts::SIM_DT;
use distraction_garden::persistence::{DataStore, NullRecorder, RunSummary};
use distraction_garden::platform::{InputEvent, Key};
use distraction_garden::questions::QuestionBank;
use distraction_garden::renderer::DrawList;
use distraction_garden::scenes::{GameplayScene, Scene, SceneContext, SessionOptions, Transition};
use distraction_garden::sim::{Bug, BugKind};

const QUESTIONS: &str = r#"{
    "1": [{"text": "Short breaks restore attention.", "answer": true}],
    "2": [{"text": "Multitasking doubles output.", "answer": false}],
    "3": [{"text": "Sleep debt hurts focus.", "answer": true}]
}"#;

fn bank() -> QuestionBank {
    QuestionBank::from_json_str(QUESTIONS).unwrap()
}

fn press(key: Key) -> [InputEvent; 2] {
    [InputEvent::KeyDown(key), InputEvent::KeyUp(key)]
}

fn hud_texts(director: &Director) -> Vec<String> {
    let mut canvas = DrawList::new();
    director.render(&mut canvas);
    canvas.texts().map(str::to_string).collect()
}

#[test]
fn menus_lead_into_the_chosen_level_and_back() {
    let mut director = Director::new(
        Box::new(SilentAudio),
        bank(),
        Box::new(NullRecorder),
        SessionOptions::default(),
        3,
    );
    let mut canvas = DrawList::new();
    assert_eq!(director.scene_name(), "home");

    // Home: Select Level
    director.frame(&press(Key::Down), SIM_DT, &mut canvas);
    director.frame(&press(Key::Confirm), SIM_DT, &mut canvas);
    assert_eq!(director.scene_name(), "level_select");

    // Third level
    director.frame(&press(Key::Down), SIM_DT, &mut canvas);
    director.frame(&press(Key::Down), SIM_DT, &mut canvas);
    director.frame(&press(Key::Confirm), SIM_DT, &mut canvas);
    assert_eq!(director.scene_name(), "gameplay");
    assert!(
        hud_texts(&director)
            .iter()
            .any(|t| t == "Level 3: Burnout Phase")
    );

    director.frame(&press(Key::Cancel), SIM_DT, &mut canvas);
    assert_eq!(director.scene_name(), "home");

    // Escape on the title screen quits
    assert!(!director.frame(&press(Key::Cancel), SIM_DT, &mut canvas));
    assert!(!director.is_running());
}

#[test]
fn question_resumes_the_same_session() {
    let mut audio = AudioLog::default();
    let questions = bank();
    let mut records: Vec<RunSummary> = Vec::new();
    let session = SessionOptions::default();
    let mut seeds = Pcg32::seed_from_u64(9);
    let mut ctx = SceneContext {
        audio: &mut audio,
        questions: &questions,
        records: &mut records,
        session: &session,
        seeds: &mut seeds,
    };

    let mut gameplay = GameplayScene::with_seed(1, 77);
    let garden = gameplay.garden_mut();
    let id = garden.next_entity_id();
    let at = garden.player.rect.center();
    garden.bugs.push(Bug::new(id, BugKind::Popup, at, 0.0));

    let question = match gameplay.update(SIM_DT, &mut ctx) {
        Transition::Interrupt(q) => q,
        other => panic!("expected a question, got {:?}", other),
    };
    assert_eq!(question.text, "Short breaks restore attention.");
    let focus_before = gameplay.focus();

    let mut interrupt = Box::new(gameplay).suspend(question);
    assert_eq!(interrupt.name(), "question");

    // Hovering over nothing does nothing; a wrong answer resumes gameplay
    assert!(matches!(
        interrupt.handle_input(&InputEvent::MouseMove(Vec2::ZERO), &mut ctx),
        Transition::None
    ));
    let resumed = match interrupt.handle_input(&InputEvent::KeyDown(Key::False), &mut ctx) {
        Transition::Switch(scene) => scene,
        other => panic!("expected resume, got {:?}", other),
    };
    assert_eq!(resumed.name(), "gameplay");

    let mut canvas = DrawList::new();
    resumed.render(&mut canvas);
    let expected = format!("Focus: {:.0}", focus_before - 12.0);
    assert!(canvas.texts().any(|t| t == expected));

    drop(ctx);
    assert_eq!(audio.count(SoundEffect::PopupBugHit), 1);
    assert_eq!(audio.count(SoundEffect::AnswerWrong), 1);
    assert!(records.is_empty());
}

#[test]
fn finished_run_lands_on_the_leaderboard() {
    let tmp = tempfile::tempdir().unwrap();
    let store = DataStore::new(tmp.path());
    let mut director = Director::new(
        Box::new(SilentAudio),
        bank(),
        Box::new(store.clone()),
        SessionOptions {
            autopilot: false,
            player_name: "Tester".to_string(),
            ..SessionOptions::default()
        },
        11,
    );
    director.start_level(3);

    // Standing still on level 3 the focus drains out well within this
    let mut canvas = DrawList::new();
    for _ in 0..(240.0 / SIM_DT) as u32 {
        canvas.clear();
        director.frame(&[], SIM_DT, &mut canvas);
    }
    assert_eq!(director.scene_name(), "gameplay");

    let board = store.leaderboard().unwrap();
    assert_eq!(board.entries.len(), 1);
    assert_eq!(board.entries[0].name, "Tester");
}
