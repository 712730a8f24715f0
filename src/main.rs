//! Distraction Garden entry point
//!
//! Runs the game headless: the director is driven with a fixed frame time
//! (or wall-clock time with `--realtime`), draw calls go to a `DrawList`
//! and a scripted player presses through menus and questions.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use thiserror::Error;

use distraction_garden::Director;
use distraction_garden::audio::{AudioManager, AudioPort};
use distraction_garden::consts::SIM_DT;
use distraction_garden::persistence::{DataStore, PersistenceError};
use distraction_garden::platform::{FrameClock, InputEvent, Key};
use distraction_garden::questions::{QuestionBank, QuestionBankError};
use distraction_garden::renderer::DrawList;
use distraction_garden::scenes::SessionOptions;
use distraction_garden::settings::{QualityPreset, Settings};
use distraction_garden::tuning::LEVEL_COUNT;

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Questions(#[from] QuestionBankError),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
    #[error("level {0} does not exist")]
    UnknownLevel(u32),
}

#[derive(Debug, Parser)]
#[command(version, about = "Defend your focus garden from distraction bugs")]
struct Args {
    /// Jump straight into this level instead of the title screen
    #[arg(long)]
    level: Option<u32>,
    /// Simulated seconds to run
    #[arg(long, default_value_t = 60.0)]
    seconds: f32,
    /// Master seed for every gameplay session
    #[arg(long, default_value_t = 42)]
    seed: u64,
    #[arg(long, default_value = "data/questions.json")]
    questions: PathBuf,
    /// Where the leaderboard and run stats are written
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,
    #[arg(long, default_value = "settings.json")]
    settings: PathBuf,
    /// Override the saved quality preset (low, medium, high)
    #[arg(long, value_parser = parse_quality)]
    quality: Option<QualityPreset>,
    /// Pace frames with the wall clock instead of stepping as fast as possible
    #[arg(long)]
    realtime: bool,
    /// Leave the player standing still
    #[arg(long)]
    no_autopilot: bool,
}

fn parse_quality(s: &str) -> Result<QualityPreset, String> {
    QualityPreset::parse(s).ok_or_else(|| format!("unknown quality preset '{}'", s))
}

/// Frames between scripted key presses
const CONFIRM_EVERY: u64 = 60;
const ANSWER_EVERY: u64 = 90;

fn scripted_input(frame: u64) -> Vec<InputEvent> {
    let mut events = Vec::new();
    if frame % CONFIRM_EVERY == 1 {
        events.push(InputEvent::KeyDown(Key::Confirm));
        events.push(InputEvent::KeyUp(Key::Confirm));
    }
    if frame % ANSWER_EVERY == 0 {
        events.push(InputEvent::KeyDown(Key::True));
        events.push(InputEvent::KeyUp(Key::True));
    }
    events
}

fn run(args: Args) -> Result<(), AppError> {
    if let Some(level) = args.level {
        if level == 0 || level > LEVEL_COUNT {
            return Err(AppError::UnknownLevel(level));
        }
    }

    let mut settings = Settings::load(&args.settings);
    if !args.settings.exists() {
        match settings.save(&args.settings) {
            Ok(()) => log::info!("Wrote default settings to {}", args.settings.display()),
            Err(e) => log::warn!("Could not write {}: {}", args.settings.display(), e),
        }
    }
    if let Some(quality) = args.quality {
        settings.quality = quality;
    }
    log::info!(
        "Quality {} ({} particles max)",
        settings.quality.as_str(),
        settings.max_particles()
    );
    let questions = QuestionBank::load(&args.questions)?;

    let mut audio = AudioManager::new(&settings.sounds_dir);
    audio.set_sfx_volume(settings.sfx_volume);
    audio.set_music_volume(settings.music_volume);
    audio.set_muted(settings.muted);
    audio.play_music(&settings.music_track, -1);

    let store = DataStore::new(&args.data_dir);
    let session = SessionOptions {
        max_particles: settings.max_particles(),
        autopilot: !args.no_autopilot,
        player_name: settings.player_name.clone(),
    };

    let mut director = Director::new(
        Box::new(audio),
        questions,
        Box::new(store.clone()),
        session,
        args.seed,
    );
    if let Some(level) = args.level {
        director.start_level(level);
    }

    let frames = (args.seconds / SIM_DT).ceil() as u64;
    let mut clock = FrameClock::new();
    let mut canvas = DrawList::new();
    for frame in 1..=frames {
        let elapsed = if args.realtime {
            std::thread::sleep(Duration::from_secs_f32(SIM_DT));
            clock.tick()
        } else {
            SIM_DT
        };
        canvas.clear();
        if !director.frame(&scripted_input(frame), elapsed, &mut canvas) {
            break;
        }
    }

    log::info!(
        "Stopped in scene {} after {} frames ({} sim steps)",
        director.scene_name(),
        director.frames(),
        director.sim_steps()
    );
    if let Some(top) = store.leaderboard()?.top_score() {
        log::info!("Leaderboard top score: {}", top);
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Distraction Garden starting...");

    if let Err(e) = run(Args::parse()) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["distraction-garden"]);
        assert_eq!(args.seed, 42);
        assert!(args.level.is_none());
        assert!(!args.no_autopilot);
        assert_eq!(args.questions, PathBuf::from("data/questions.json"));
    }

    #[test]
    fn test_args_flags() {
        let args = Args::parse_from([
            "distraction-garden",
            "--level",
            "2",
            "--seconds",
            "5",
            "--no-autopilot",
            "--realtime",
        ]);
        assert_eq!(args.level, Some(2));
        assert_eq!(args.seconds, 5.0);
        assert!(args.no_autopilot && args.realtime);
        assert!(args.quality.is_none());
    }

    #[test]
    fn test_quality_flag() {
        let args = Args::parse_from(["distraction-garden", "--quality", "High"]);
        assert_eq!(args.quality, Some(QualityPreset::High));
        assert!(Args::try_parse_from(["distraction-garden", "--quality", "ultra"]).is_err());
    }

    #[test]
    fn test_scripted_input_presses_and_releases() {
        let first = scripted_input(1);
        assert_eq!(
            first,
            vec![
                InputEvent::KeyDown(Key::Confirm),
                InputEvent::KeyUp(Key::Confirm)
            ]
        );
        assert!(scripted_input(2).is_empty());
        assert!(scripted_input(90).contains(&InputEvent::KeyDown(Key::True)));
    }

    #[test]
    fn test_rejects_unknown_level() {
        let args = Args::parse_from(["distraction-garden", "--level", "9"]);
        assert!(matches!(run(args), Err(AppError::UnknownLevel(9))));
    }
}
