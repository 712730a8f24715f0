//! Audio collaborator
//!
//! Scenes only ever talk to [`AudioPort`]. Decoding and mixing belong to the
//! embedding platform; [`AudioManager`] resolves sound assets on disk and
//! keeps the volume/music state, while [`SilentAudio`] and [`AudioLog`] serve
//! headless runs and tests.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Chat bubble swatted
    ChatBugHit,
    /// Notification badge swatted
    NotifBugHit,
    /// Popup bug swatted (question incoming)
    PopupBugHit,
    /// Flow orb picked up
    FlowOrbCollect,
    LevelComplete,
    LevelStart,
    GameOver,
    AnswerCorrect,
    AnswerWrong,
    /// Menu confirm
    ButtonClick,
    /// Menu cursor moved
    MenuSelect,
    /// Mouse entered a button
    Hover,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 12] = [
        SoundEffect::ChatBugHit,
        SoundEffect::NotifBugHit,
        SoundEffect::PopupBugHit,
        SoundEffect::FlowOrbCollect,
        SoundEffect::LevelComplete,
        SoundEffect::LevelStart,
        SoundEffect::GameOver,
        SoundEffect::AnswerCorrect,
        SoundEffect::AnswerWrong,
        SoundEffect::ButtonClick,
        SoundEffect::MenuSelect,
        SoundEffect::Hover,
    ];

    /// Asset id, also the file stem under the sounds directory
    pub fn as_str(self) -> &'static str {
        match self {
            SoundEffect::ChatBugHit => "chatbug_hit",
            SoundEffect::NotifBugHit => "notifbug_hit",
            SoundEffect::PopupBugHit => "popupbug_hit",
            SoundEffect::FlowOrbCollect => "floworb_collect",
            SoundEffect::LevelComplete => "level_complete",
            SoundEffect::LevelStart => "level_start",
            SoundEffect::GameOver => "game_over",
            SoundEffect::AnswerCorrect => "answer_correct",
            SoundEffect::AnswerWrong => "answer_wrong",
            SoundEffect::ButtonClick => "button_click",
            SoundEffect::MenuSelect => "menu_select",
            SoundEffect::Hover => "hover",
        }
    }
}

/// Fire-and-forget audio sink
pub trait AudioPort {
    /// Play an effect at `sfx_volume * volume_mult` (capped at 1)
    fn play(&mut self, effect: SoundEffect, volume_mult: f32);

    /// Start a music track; `loops` of -1 repeats forever
    fn play_music(&mut self, path: &Path, loops: i32);

    fn stop_music(&mut self);

    fn pause_music(&mut self);

    fn resume_music(&mut self);

    fn set_sfx_volume(&mut self, volume: f32);

    fn set_music_volume(&mut self, volume: f32);
}

/// Where a sound effect comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoundSource {
    File(PathBuf),
    /// No asset on disk; the platform synthesises a stand-in tone
    Placeholder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicState {
    Stopped,
    Playing,
    Paused,
}

/// Audio manager for the game
#[derive(Debug)]
pub struct AudioManager {
    sounds: HashMap<SoundEffect, SoundSource>,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    music: MusicState,
    track: Option<PathBuf>,
}

impl AudioManager {
    pub const DEFAULT_SFX_VOLUME: f32 = 0.7;
    pub const DEFAULT_MUSIC_VOLUME: f32 = 0.3;

    /// Resolve `<dir>/<id>.wav` for every effect
    pub fn new(sounds_dir: &Path) -> Self {
        let mut sounds = HashMap::new();
        for effect in SoundEffect::ALL {
            let path = sounds_dir.join(format!("{}.wav", effect.as_str()));
            let source = if path.is_file() {
                SoundSource::File(path)
            } else {
                log::warn!("Sound {} not found, using placeholder", path.display());
                SoundSource::Placeholder
            };
            sounds.insert(effect, source);
        }
        Self {
            sounds,
            sfx_volume: Self::DEFAULT_SFX_VOLUME,
            music_volume: Self::DEFAULT_MUSIC_VOLUME,
            muted: false,
            music: MusicState::Stopped,
            track: None,
        }
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn source(&self, effect: SoundEffect) -> Option<&SoundSource> {
        self.sounds.get(&effect)
    }

    pub fn placeholder_count(&self) -> usize {
        self.sounds
            .values()
            .filter(|s| **s == SoundSource::Placeholder)
            .count()
    }

    pub fn sfx_volume(&self) -> f32 {
        self.sfx_volume
    }

    pub fn music_volume(&self) -> f32 {
        self.music_volume
    }

    pub fn music_state(&self) -> MusicState {
        self.music
    }

    /// Effective volume for one playback
    fn effective_volume(&self, volume_mult: f32) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.sfx_volume * volume_mult).min(1.0)
        }
    }
}

impl AudioPort for AudioManager {
    fn play(&mut self, effect: SoundEffect, volume_mult: f32) {
        let vol = self.effective_volume(volume_mult);
        if vol <= 0.0 {
            return;
        }
        log::debug!("play {} at {:.2}", effect.as_str(), vol);
    }

    fn play_music(&mut self, path: &Path, loops: i32) {
        if !path.is_file() {
            log::warn!("Music file not found: {}", path.display());
            return;
        }
        log::info!("Playing music {} (loops {})", path.display(), loops);
        self.track = Some(path.to_path_buf());
        self.music = MusicState::Playing;
    }

    fn stop_music(&mut self) {
        self.music = MusicState::Stopped;
        self.track = None;
    }

    fn pause_music(&mut self) {
        if self.music == MusicState::Playing {
            self.music = MusicState::Paused;
        }
    }

    fn resume_music(&mut self) {
        if self.music == MusicState::Paused {
            self.music = MusicState::Playing;
        }
    }

    fn set_sfx_volume(&mut self, volume: f32) {
        self.sfx_volume = volume.clamp(0.0, 1.0);
    }

    fn set_music_volume(&mut self, volume: f32) {
        self.music_volume = volume.clamp(0.0, 1.0);
    }
}

/// Discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentAudio;

impl AudioPort for SilentAudio {
    fn play(&mut self, _effect: SoundEffect, _volume_mult: f32) {}
    fn play_music(&mut self, _path: &Path, _loops: i32) {}
    fn stop_music(&mut self) {}
    fn pause_music(&mut self) {}
    fn resume_music(&mut self) {}
    fn set_sfx_volume(&mut self, _volume: f32) {}
    fn set_music_volume(&mut self, _volume: f32) {}
}

/// Records every effect played, in order
#[derive(Debug, Default, Clone)]
pub struct AudioLog {
    pub played: Vec<SoundEffect>,
    pub music: Vec<PathBuf>,
}

impl AudioLog {
    pub fn count(&self, effect: SoundEffect) -> usize {
        self.played.iter().filter(|e| **e == effect).count()
    }
}

impl AudioPort for AudioLog {
    fn play(&mut self, effect: SoundEffect, _volume_mult: f32) {
        self.played.push(effect);
    }

    fn play_music(&mut self, path: &Path, _loops: i32) {
        self.music.push(path.to_path_buf());
    }

    fn stop_music(&mut self) {}
    fn pause_music(&mut self) {}
    fn resume_music(&mut self) {}
    fn set_sfx_volume(&mut self, _volume: f32) {}
    fn set_music_volume(&mut self, _volume: f32) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_missing_files_become_placeholders() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("hover.wav"), b"RIFF").unwrap();

        let audio = AudioManager::new(dir.path());
        assert_eq!(
            audio.source(SoundEffect::Hover),
            Some(&SoundSource::File(dir.path().join("hover.wav")))
        );
        assert_eq!(audio.source(SoundEffect::GameOver), Some(&SoundSource::Placeholder));
        assert_eq!(audio.placeholder_count(), SoundEffect::ALL.len() - 1);
    }

    #[test]
    fn test_volume_clamped() {
        let dir = tempfile::tempdir().unwrap();
        let mut audio = AudioManager::new(dir.path());
        audio.set_sfx_volume(1.5);
        assert_eq!(audio.sfx_volume(), 1.0);
        audio.set_music_volume(-1.0);
        assert_eq!(audio.music_volume(), 0.0);
        assert_eq!(audio.effective_volume(2.0), 1.0);
    }

    #[test]
    fn test_music_state_machine() {
        let dir = tempfile::tempdir().unwrap();
        let track = dir.path().join("background_music.mp3");
        let mut audio = AudioManager::new(dir.path());

        audio.play_music(&track, -1);
        assert_eq!(audio.music_state(), MusicState::Stopped);

        fs::write(&track, b"ID3").unwrap();
        audio.play_music(&track, -1);
        assert_eq!(audio.music_state(), MusicState::Playing);
        audio.resume_music();
        assert_eq!(audio.music_state(), MusicState::Playing);
        audio.pause_music();
        assert_eq!(audio.music_state(), MusicState::Paused);
        audio.resume_music();
        assert_eq!(audio.music_state(), MusicState::Playing);
        audio.stop_music();
        assert_eq!(audio.music_state(), MusicState::Stopped);
    }

    #[test]
    fn test_ids_unique() {
        let mut ids: Vec<&str> = SoundEffect::ALL.iter().map(|e| e.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), SoundEffect::ALL.len());
    }
}
