//! JSON-backed player settings and screen layout.
//!
//! Both files are optional: a missing or malformed file falls back to the
//! built-in defaults and the problem is logged, never surfaced to gameplay.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::SettingsError;

pub const SETTINGS_FILE: &str = "settings.json";
pub const POSITIONS_FILE: &str = "position.json";

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T, SettingsError> {
    let text = fs::read_to_string(path).map_err(|source| SettingsError::Read { path: path.to_owned(), source })?;
    serde_json::from_str(&text).map_err(|source| SettingsError::Json { path: path.to_owned(), source })
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), SettingsError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|source| SettingsError::Json { path: path.to_owned(), source })?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|source| SettingsError::Write { path: path.to_owned(), source })?;
    }
    fs::write(path, text).map_err(|source| SettingsError::Write { path: path.to_owned(), source })
}

// ── Settings ─────────────────────────────────────────────────────────────────

/// Audio channel adjusted from the settings screen.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Channel {
    Bgm,
    Sfx,
}

impl Channel {
    pub fn other(self) -> Self {
        match self {
            Channel::Bgm => Channel::Sfx,
            Channel::Sfx => Channel::Bgm,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub bgm_volume: f32,
    pub sfx_volume: f32,
    /// Where the settings are saved; `None` keeps them in memory only.
    #[serde(skip)]
    path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self { bgm_volume: 0.7, sfx_volume: 0.8, path: None }
    }
}

impl Settings {
    /// Load from `path`, falling back to defaults on any failure.  Later
    /// saves go back to the same path.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut settings = match read_json::<Settings>(&path) {
            Ok(s) => {
                info!(path = %path.display(), "settings loaded");
                s
            }
            Err(e) => {
                warn!(error = %e, "using default settings");
                Settings::default()
            }
        };
        settings.bgm_volume = settings.bgm_volume.clamp(0.0, 1.0);
        settings.sfx_volume = settings.sfx_volume.clamp(0.0, 1.0);
        settings.path = Some(path);
        settings
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn save(&self) -> Result<(), SettingsError> {
        match &self.path {
            Some(path) => write_json(path, self),
            None => Ok(()),
        }
    }

    pub fn volume(&self, channel: Channel) -> f32 {
        match channel {
            Channel::Bgm => self.bgm_volume,
            Channel::Sfx => self.sfx_volume,
        }
    }

    /// Set a channel's volume (clamped to `[0, 1]`) and save.  A failed save
    /// is logged and the in-memory value kept.
    pub fn set_volume(&mut self, channel: Channel, volume: f32) {
        let volume = volume.clamp(0.0, 1.0);
        match channel {
            Channel::Bgm => self.bgm_volume = volume,
            Channel::Sfx => self.sfx_volume = volume,
        }
        if let Err(e) = self.save() {
            warn!(error = %e, "failed to save settings");
        }
    }

    pub fn nudge_volume(&mut self, channel: Channel, delta: f32) {
        // Snap to tenths so repeated nudges don't drift.
        let target = ((self.volume(channel) + delta) * 10.0).round() / 10.0;
        self.set_volume(channel, target);
    }
}

// ── Positions ────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl From<Position> for Vec2 {
    fn from(p: Position) -> Self {
        Vec2::new(p.x, p.y)
    }
}

/// Screen placement of each character, keyed by entity name.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Positions {
    entries: BTreeMap<String, Position>,
}

impl Default for Positions {
    fn default() -> Self {
        let mut entries = BTreeMap::new();
        entries.insert("erpin".into(), Position { x: 600.0, y: 50.0 });
        entries.insert("sherum".into(), Position { x: 100.0, y: 300.0 });
        entries.insert("joanne".into(), Position { x: 350.0, y: 50.0 });
        Self { entries }
    }
}

impl Positions {
    pub fn load(path: &Path) -> Self {
        match read_json::<Positions>(path) {
            Ok(p) => {
                info!(path = %path.display(), "positions loaded");
                p
            }
            Err(e) => {
                warn!(error = %e, "using default positions");
                Positions::default()
            }
        }
    }

    /// Position of `name`, or the origin (with a warning) when unknown.
    pub fn get(&self, name: &str) -> Vec2 {
        match self.entries.get(name) {
            Some(p) => (*p).into(),
            None => {
                warn!(%name, "no position configured, using origin");
                Vec2::ZERO
            }
        }
    }
}
