//! Audio boundary
//!
//! The simulation never talks to an audio device directly. It asks the
//! [`AudioManager`] for tracks and one-shots; the manager applies volume
//! settings and forwards to whatever [`AudioBackend`] the frontend installed.
//! Every call is best-effort: backend failures are logged and dropped.

use thiserror::Error;

/// One-shot sound effects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Avatar fires
    Shoot,
    /// Player bullet connects with an enemy
    Hit,
    /// Boss enters the arena
    BossRoar,
}

/// Looping music tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Track {
    /// Background music for stage 1, 2 or 3
    Stage(u32),
    Boss,
    GameOver,
    Win,
}

/// Failure reported by an audio backend
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("audio device unavailable")]
    DeviceUnavailable,

    #[error("missing audio clip: {0}")]
    MissingClip(String),

    #[error("playback failed: {0}")]
    Playback(String),
}

/// Device-facing half of the audio system, supplied by the frontend
pub trait AudioBackend {
    fn play_track(&mut self, track: Track, volume: f32) -> Result<(), AudioError>;
    fn stop_all_tracks(&mut self) -> Result<(), AudioError>;
    fn play_one_shot(&mut self, effect: SoundEffect, volume: f32) -> Result<(), AudioError>;
}

/// Backend that only logs what it was asked to play (headless runs)
#[derive(Debug, Default)]
pub struct LogBackend;

impl AudioBackend for LogBackend {
    fn play_track(&mut self, track: Track, volume: f32) -> Result<(), AudioError> {
        log::info!("♪ track {:?} (vol {:.2})", track, volume);
        Ok(())
    }

    fn stop_all_tracks(&mut self) -> Result<(), AudioError> {
        log::debug!("♪ stop all tracks");
        Ok(())
    }

    fn play_one_shot(&mut self, effect: SoundEffect, volume: f32) -> Result<(), AudioError> {
        log::trace!("♪ one-shot {:?} (vol {:.2})", effect, volume);
        Ok(())
    }
}

/// Audio manager for the game
pub struct AudioManager {
    backend: Option<Box<dyn AudioBackend>>,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::silent()
    }
}

impl std::fmt::Debug for AudioManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioManager")
            .field("has_backend", &self.backend.is_some())
            .field("master_volume", &self.master_volume)
            .field("sfx_volume", &self.sfx_volume)
            .field("music_volume", &self.music_volume)
            .field("muted", &self.muted)
            .finish()
    }
}

impl AudioManager {
    pub fn new(backend: Box<dyn AudioBackend>) -> Self {
        Self {
            backend: Some(backend),
            master_volume: 1.0,
            sfx_volume: 1.0,
            music_volume: 1.0,
            muted: false,
        }
    }

    /// No backend at all; every request is a no-op
    pub fn silent() -> Self {
        Self {
            backend: None,
            master_volume: 1.0,
            sfx_volume: 1.0,
            music_volume: 1.0,
            muted: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_sfx_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    fn effective_music_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.music_volume
        }
    }

    /// Run a backend call, logging and discarding any failure
    fn attempt(
        &mut self,
        what: &str,
        call: impl FnOnce(&mut dyn AudioBackend) -> Result<(), AudioError>,
    ) {
        let Some(backend) = self.backend.as_deref_mut() else {
            return;
        };
        if let Err(e) = call(backend) {
            log::warn!("Audio {} failed: {}", what, e);
        }
    }

    pub fn stop_all_tracks(&mut self) {
        self.attempt("stop", |b| b.stop_all_tracks());
    }

    /// Stop whatever is playing and start `track`
    fn switch_track(&mut self, track: Track) {
        self.stop_all_tracks();
        let vol = self.effective_music_volume();
        if vol <= 0.0 {
            return;
        }
        self.attempt("track", |b| b.play_track(track, vol));
    }

    /// Stage music; stages outside 1..=3 get the stage 1 track
    pub fn play_track_for_stage(&mut self, stage: u32) {
        let stage = if (1..=3).contains(&stage) { stage } else { 1 };
        self.switch_track(Track::Stage(stage));
    }

    pub fn play_boss_track(&mut self) {
        self.switch_track(Track::Boss);
    }

    pub fn play_game_over_track(&mut self) {
        self.switch_track(Track::GameOver);
    }

    pub fn play_win_track(&mut self) {
        self.switch_track(Track::Win);
    }

    /// Play a sound effect at `volume` (scaled by master and SFX volume)
    pub fn play_one_shot(&mut self, effect: SoundEffect, volume: f32) {
        let vol = self.effective_sfx_volume() * volume.clamp(0.0, 1.0);
        if vol <= 0.0 {
            return;
        }
        self.attempt("one-shot", |b| b.play_one_shot(effect, vol));
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    /// What a backend was asked to do
    #[derive(Debug, Clone, PartialEq)]
    pub enum AudioCall {
        Track(Track),
        StopAll,
        OneShot(SoundEffect),
    }

    /// Records every call into a shared log
    #[derive(Debug, Default, Clone)]
    pub struct RecordingBackend {
        pub calls: Rc<RefCell<Vec<AudioCall>>>,
    }

    impl RecordingBackend {
        /// Manager wired to a fresh recorder, plus a handle on the call log
        pub fn manager() -> (AudioManager, Rc<RefCell<Vec<AudioCall>>>) {
            let backend = RecordingBackend::default();
            let calls = Rc::clone(&backend.calls);
            (AudioManager::new(Box::new(backend)), calls)
        }
    }

    impl AudioBackend for RecordingBackend {
        fn play_track(&mut self, track: Track, _volume: f32) -> Result<(), AudioError> {
            self.calls.borrow_mut().push(AudioCall::Track(track));
            Ok(())
        }

        fn stop_all_tracks(&mut self) -> Result<(), AudioError> {
            self.calls.borrow_mut().push(AudioCall::StopAll);
            Ok(())
        }

        fn play_one_shot(&mut self, effect: SoundEffect, _volume: f32) -> Result<(), AudioError> {
            self.calls.borrow_mut().push(AudioCall::OneShot(effect));
            Ok(())
        }
    }

    /// Fails every call, like a machine with no audio device
    #[derive(Debug, Default)]
    pub struct FailingBackend;

    impl AudioBackend for FailingBackend {
        fn play_track(&mut self, _track: Track, _volume: f32) -> Result<(), AudioError> {
            Err(AudioError::DeviceUnavailable)
        }

        fn stop_all_tracks(&mut self) -> Result<(), AudioError> {
            Err(AudioError::DeviceUnavailable)
        }

        fn play_one_shot(&mut self, effect: SoundEffect, _volume: f32) -> Result<(), AudioError> {
            Err(AudioError::MissingClip(format!("{effect:?}")))
        }
    }
}
