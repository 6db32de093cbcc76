//! Background resource loading.
//!
//! Sprites and sounds are decoded on a worker thread.  The main loop polls
//! [`LoadHandle`] each tick and never waits on it: progress is a relaxed
//! percentage, readiness is a release/acquire flag, and the decoded
//! [`AssetBundle`] is handed over exactly once through a channel.  Any asset
//! that fails to load is replaced by a placeholder and listed in
//! [`AssetBundle::missing`].

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use image::codecs::gif::GifDecoder;
use image::{AnimationDecoder, RgbaImage};
use kira::sound::static_sound::StaticSoundData;
use tracing::{debug, info, warn};

use crate::audio::Cue;
use crate::error::AssetError;

const SPRITE_EXTENSIONS: &[&str] = &["gif", "png"];
const SOUND_EXTENSIONS: &[&str] = &["wav", "ogg", "mp3"];

/// Animation clips the game draws.
pub const CLIPS: &[&str] = &[
    "erpin_idle",
    "erpin_dance_1",
    "erpin_skill",
    "sherum_front",
    "sherum_back",
    "joanne_idle_1",
    "joanne_idle_2",
    "joanne_idle_3",
    "joanne_dance_1",
    "joanne_dance_2",
];

// ── Bundle ───────────────────────────────────────────────────────────────────

/// Decoded frames of one animation.
#[derive(Clone, Debug)]
pub struct Clip {
    pub frames: Vec<RgbaImage>,
    pub placeholder: bool,
}

impl Clip {
    /// Single transparent pixel standing in for an asset that failed to load.
    pub fn placeholder() -> Self {
        Self { frames: vec![RgbaImage::new(1, 1)], placeholder: true }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

#[derive(Default)]
pub struct AssetBundle {
    pub clips: HashMap<String, Clip>,
    pub sounds: HashMap<String, StaticSoundData>,
    /// Assets replaced by placeholders (or skipped, for sounds).
    pub missing: Vec<String>,
}

impl AssetBundle {
    /// Frame count of a clip; unknown clips count as a single frame.
    pub fn frame_count(&self, clip: &str) -> usize {
        self.clips.get(clip).map_or(1, |c| c.len().max(1))
    }

    pub fn is_partial(&self) -> bool {
        !self.missing.is_empty()
    }
}

/// What to load.
#[derive(Clone, Debug)]
pub struct Manifest {
    pub clips: Vec<String>,
    pub sounds: Vec<String>,
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            clips: CLIPS.iter().map(|s| s.to_string()).collect(),
            sounds: Cue::ALL.iter().map(|c| c.name().to_string()).collect(),
        }
    }
}

impl Manifest {
    pub fn len(&self) -> usize {
        self.clips.len() + self.sounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ── Discovery and decoding ───────────────────────────────────────────────────

/// Files under `root` with one of `extensions`, keyed by file stem.  The
/// first file found for a stem wins.
pub fn index_files(root: &Path, extensions: &[&str]) -> HashMap<String, PathBuf> {
    let mut found = HashMap::new();
    for entry in walkdir::WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
    {
        let path = entry.path();
        let matches = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| extensions.iter().any(|x| x.eq_ignore_ascii_case(ext)));
        if !matches {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            found.entry(stem.to_string()).or_insert_with(|| path.to_path_buf());
        }
    }
    found
}

/// Decode every frame of a GIF, or the single frame of any other image.
pub fn load_clip(path: &Path) -> Result<Clip, AssetError> {
    let is_gif = path.extension().and_then(|e| e.to_str()).is_some_and(|e| e.eq_ignore_ascii_case("gif"));
    let frames = if is_gif {
        let file = File::open(path).map_err(|source| AssetError::Io { path: path.to_owned(), source })?;
        let decoder = GifDecoder::new(BufReader::new(file))
            .map_err(|source| AssetError::Image { path: path.to_owned(), source })?;
        decoder
            .into_frames()
            .collect_frames()
            .map_err(|source| AssetError::Image { path: path.to_owned(), source })?
            .into_iter()
            .map(|f| f.into_buffer())
            .collect()
    } else {
        let image = image::open(path).map_err(|source| AssetError::Image { path: path.to_owned(), source })?;
        vec![image.to_rgba8()]
    };
    if frames.is_empty() {
        return Err(AssetError::Empty { path: path.to_owned() });
    }
    Ok(Clip { frames, placeholder: false })
}

pub fn load_sound(path: &Path) -> Result<StaticSoundData, AssetError> {
    StaticSoundData::from_file(path).map_err(|e| AssetError::Sound { path: path.to_owned(), message: e.to_string() })
}

// ── Loader ───────────────────────────────────────────────────────────────────

#[derive(Default)]
struct Shared {
    progress: AtomicU8,
    ready: AtomicBool,
    cancel: AtomicBool,
}

/// Load everything in `manifest` from `root`, reporting progress into
/// `shared`.  Stops early (with placeholders) once cancelled.
fn load_all(root: &Path, manifest: &Manifest, shared: &Shared) -> AssetBundle {
    let sprite_files = index_files(root, SPRITE_EXTENSIONS);
    let sound_files = index_files(root, SOUND_EXTENSIONS);
    let total = manifest.len().max(1);
    let mut done = 0usize;
    let mut bundle = AssetBundle::default();

    let step = |done: &mut usize| {
        *done += 1;
        shared.progress.store((*done * 100 / total).min(100) as u8, Ordering::Relaxed);
    };

    for name in &manifest.clips {
        let result = if shared.cancel.load(Ordering::Relaxed) {
            Err(AssetError::Missing { name: name.clone() })
        } else {
            sprite_files
                .get(name)
                .ok_or_else(|| AssetError::Missing { name: name.clone() })
                .and_then(|path| load_clip(path))
        };
        let clip = result.unwrap_or_else(|e| {
            warn!(error = %e, clip = %name, "substituting placeholder");
            bundle.missing.push(name.clone());
            Clip::placeholder()
        });
        bundle.clips.insert(name.clone(), clip);
        step(&mut done);
    }

    for name in &manifest.sounds {
        let result = if shared.cancel.load(Ordering::Relaxed) {
            Err(AssetError::Missing { name: name.clone() })
        } else {
            sound_files
                .get(name)
                .ok_or_else(|| AssetError::Missing { name: name.clone() })
                .and_then(|path| load_sound(path))
        };
        match result {
            Ok(data) => { bundle.sounds.insert(name.clone(), data); }
            Err(e) => {
                warn!(error = %e, sound = %name, "sound will be silent");
                bundle.missing.push(name.clone());
            }
        }
        step(&mut done);
    }

    shared.progress.store(100, Ordering::Relaxed);
    bundle
}

/// Handle to a loader running in the background.
pub struct LoadHandle {
    shared: Arc<Shared>,
    rx: Receiver<AssetBundle>,
    taken: bool,
}

impl LoadHandle {
    /// Start loading `manifest` from `root` on a worker thread.
    pub fn spawn(root: impl Into<PathBuf>, manifest: Manifest) -> Self {
        let root: PathBuf = root.into();
        let shared = Arc::new(Shared::default());
        let (tx, rx) = mpsc::channel();

        let worker_shared = Arc::clone(&shared);
        let spawned = thread::Builder::new().name("asset-loader".into()).spawn(move || {
            debug!(root = %root.display(), "asset loading started");
            let bundle = load_all(&root, &manifest, &worker_shared);
            info!(missing = bundle.missing.len(), "asset loading finished");
            let _ = tx.send(bundle);
            worker_shared.ready.store(true, Ordering::Release);
        });

        // A dropped sender makes `poll` hand back an empty bundle.
        if let Err(e) = spawned {
            warn!(error = %e, "could not start asset loader, continuing without assets");
            shared.progress.store(100, Ordering::Relaxed);
            shared.ready.store(true, Ordering::Release);
        }

        Self { shared, rx, taken: false }
    }

    /// Percentage of the manifest processed so far.
    pub fn progress(&self) -> u8 {
        self.shared.progress.load(Ordering::Relaxed)
    }

    pub fn is_ready(&self) -> bool {
        self.shared.ready.load(Ordering::Acquire)
    }

    /// Ask the worker to stop decoding; remaining assets become placeholders.
    pub fn cancel(&self) {
        self.shared.cancel.store(true, Ordering::Relaxed);
    }

    /// Take the finished bundle.  Returns `Some` exactly once.
    pub fn poll(&mut self) -> Option<AssetBundle> {
        if self.taken || !self.is_ready() {
            return None;
        }
        match self.rx.try_recv() {
            Ok(bundle) => {
                self.taken = true;
                Some(bundle)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.taken = true;
                Some(AssetBundle::default())
            }
        }
    }
}
