use std::collections::HashMap;
use std::time::Duration;

use kira::{
    manager::{AudioManager, AudioManagerSettings, backend::DefaultBackend},
    sound::static_sound::{StaticSoundData, StaticSoundHandle, StaticSoundSettings},
    tween::Tween,
    Volume,
};
use tracing::{debug, warn};

/// Named sounds the game core asks for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Cue {
    Click,
    Dance,
    Skill,
    GameOver,
    Warning,
    Turn,
    Bgm,
}

impl Cue {
    pub const ALL: [Cue; 7] = [
        Cue::Click, Cue::Dance, Cue::Skill, Cue::GameOver, Cue::Warning, Cue::Turn, Cue::Bgm,
    ];

    /// File stem of the sound asset.
    pub fn name(self) -> &'static str {
        match self {
            Cue::Click => "click",
            Cue::Dance => "dance",
            Cue::Skill => "skill",
            Cue::GameOver => "game_over",
            Cue::Warning => "warning",
            Cue::Turn => "turn",
            Cue::Bgm => "bgm",
        }
    }

    pub fn from_name(name: &str) -> Option<Cue> {
        Cue::ALL.into_iter().find(|c| c.name() == name)
    }
}

/// Fire-and-forget audio notifications.  The core never queries audio state.
pub trait AudioSink {
    fn play_effect(&mut self, cue: Cue);
    fn stop_effect(&mut self, cue: Cue);
    /// Stop every effect and the music, except the listed cues.
    fn stop_all(&mut self, except: &[Cue]);
    fn play_music(&mut self, _cue: Cue) {}
    fn set_volumes(&mut self, _bgm: f32, _sfx: f32) {}
}

/// Sink that drops every notification.
#[derive(Debug, Default)]
pub struct Silent;

impl AudioSink for Silent {
    fn play_effect(&mut self, _cue: Cue) {}
    fn stop_effect(&mut self, _cue: Cue) {}
    fn stop_all(&mut self, _except: &[Cue]) {}
}

/// One notification received by a [`Recorder`].
#[derive(Clone, Debug, PartialEq)]
pub enum AudioCall {
    Play(Cue),
    Stop(Cue),
    StopAll(Vec<Cue>),
    Music(Cue),
    Volumes(f32, f32),
}

/// Sink that keeps every notification, for tests and replays.
#[derive(Debug, Default)]
pub struct Recorder {
    pub calls: Vec<AudioCall>,
}

impl Recorder {
    pub fn new() -> Self { Self::default() }

    pub fn played(&self, cue: Cue) -> usize {
        self.calls.iter().filter(|c| **c == AudioCall::Play(cue)).count()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl AudioSink for Recorder {
    fn play_effect(&mut self, cue: Cue) { self.calls.push(AudioCall::Play(cue)); }
    fn stop_effect(&mut self, cue: Cue) { self.calls.push(AudioCall::Stop(cue)); }
    fn stop_all(&mut self, except: &[Cue]) { self.calls.push(AudioCall::StopAll(except.to_vec())); }
    fn play_music(&mut self, cue: Cue) { self.calls.push(AudioCall::Music(cue)); }
    fn set_volumes(&mut self, bgm: f32, sfx: f32) { self.calls.push(AudioCall::Volumes(bgm, sfx)); }
}

// ── kira backend ─────────────────────────────────────────────────────────────

const STOP_FADE: Duration = Duration::from_millis(50);

/// Audio output through kira.
pub struct AudioContext {
    /// `None` when audio hardware is unavailable (headless / CI / no audio device).
    manager: Option<AudioManager>,
    sounds: HashMap<Cue, StaticSoundData>,
    playing: HashMap<Cue, Vec<StaticSoundHandle>>,
    music: Option<StaticSoundHandle>,
    bgm_volume: f32,
    sfx_volume: f32,
}

impl AudioContext {
    pub fn new(bgm_volume: f32, sfx_volume: f32) -> Self {
        let manager = match AudioManager::<DefaultBackend>::new(AudioManagerSettings::default()) {
            Ok(m) => Some(m),
            Err(e) => {
                warn!(error = %e, "failed to initialize audio manager, audio disabled");
                None
            }
        };
        Self {
            manager,
            sounds: HashMap::new(),
            playing: HashMap::new(),
            music: None,
            bgm_volume,
            sfx_volume,
        }
    }

    /// Take decoded sounds from the loader; names that are not cues are ignored.
    pub fn install(&mut self, sounds: HashMap<String, StaticSoundData>) {
        for (name, data) in sounds {
            match Cue::from_name(&name) {
                Some(cue) => { self.sounds.insert(cue, data); }
                None => debug!(%name, "ignoring sound with no cue"),
            }
        }
    }

    fn start(&mut self, cue: Cue, volume: f32, looped: bool) -> Option<StaticSoundHandle> {
        let manager = self.manager.as_mut()?;
        let data = self.sounds.get(&cue)?;
        let mut settings = StaticSoundSettings::new();
        if looped {
            settings = settings.loop_region(0.0..);
        }
        settings.volume = Volume::Amplitude(volume.clamp(0.0, 1.0) as f64).into();
        match manager.play(data.clone().with_settings(settings)) {
            Ok(handle) => Some(handle),
            Err(e) => {
                warn!(cue = cue.name(), error = %e, "failed to play sound");
                None
            }
        }
    }

    fn stop_handles(&mut self, cue: Cue) {
        if let Some(handles) = self.playing.remove(&cue) {
            for mut handle in handles {
                let _ = handle.stop(Tween { duration: STOP_FADE, ..Default::default() });
            }
        }
    }
}

impl AudioSink for AudioContext {
    fn play_effect(&mut self, cue: Cue) {
        // The dance loop restarts instead of stacking.
        if cue == Cue::Dance {
            self.stop_handles(cue);
        }
        if let Some(handle) = self.start(cue, self.sfx_volume, false) {
            let handles = self.playing.entry(cue).or_default();
            handles.retain(|h| h.state() != kira::sound::PlaybackState::Stopped);
            handles.push(handle);
        }
    }

    fn stop_effect(&mut self, cue: Cue) {
        self.stop_handles(cue);
    }

    fn stop_all(&mut self, except: &[Cue]) {
        let cues: Vec<Cue> = self.playing.keys().copied().filter(|c| !except.contains(c)).collect();
        for cue in cues {
            self.stop_handles(cue);
        }
        if !except.contains(&Cue::Bgm) {
            if let Some(mut handle) = self.music.take() {
                let _ = handle.stop(Tween { duration: STOP_FADE, ..Default::default() });
            }
        }
    }

    fn play_music(&mut self, cue: Cue) {
        if let Some(mut handle) = self.music.take() {
            let _ = handle.stop(Tween {
                duration: Duration::from_secs_f32(0.5),
                ..Default::default()
            });
        }
        self.music = self.start(cue, self.bgm_volume, true);
    }

    fn set_volumes(&mut self, bgm: f32, sfx: f32) {
        self.bgm_volume = bgm.clamp(0.0, 1.0);
        self.sfx_volume = sfx.clamp(0.0, 1.0);
        if let Some(handle) = self.music.as_mut() {
            let _ = handle.set_volume(Volume::Amplitude(self.bgm_volume as f64), Tween::default());
        }
    }
}

impl Default for AudioContext {
    fn default() -> Self { Self::new(0.7, 0.8) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cue_names_round_trip() {
        for cue in Cue::ALL {
            assert_eq!(Cue::from_name(cue.name()), Some(cue));
        }
        assert_eq!(Cue::from_name("nope"), None);
    }

    #[test]
    fn recorder_counts_plays() {
        let mut r = Recorder::new();
        r.play_effect(Cue::Turn);
        r.play_effect(Cue::Turn);
        r.stop_effect(Cue::Turn);
        assert_eq!(r.played(Cue::Turn), 2);
        assert_eq!(r.calls.last(), Some(&AudioCall::Stop(Cue::Turn)));
    }
}
