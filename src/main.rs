use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::StdRng;
use thiserror::Error;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::error::EventLoopError;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::{Window, WindowId};

use ricktcal::Game;
use ricktcal::assets::{AssetBundle, LoadHandle, Manifest};
use ricktcal::audio::AudioContext;
use ricktcal::clock::{Clock, SystemClock};
use ricktcal::config::{Tuning, WindowConfig};
use ricktcal::input::InputState;
use ricktcal::settings::{POSITIONS_FILE, Positions, SETTINGS_FILE, Settings};
use ricktcal::view::{self, FrameView, Renderer};

const CONFIG_DIR_ENV: &str = "RICKTCAL_CONFIG";
const ASSET_DIR_ENV: &str = "RICKTCAL_ASSETS";

#[derive(Debug, Error)]
enum AppError {
    #[error("failed to create event loop: {0}")]
    CreateEventLoop(#[source] EventLoopError),
    #[error("event loop failed: {0}")]
    EventLoopRun(#[source] EventLoopError),
}

// ── Renderer ────────────────────────────────────────────────────────────────

/// Publishes the HUD through the window title.
struct TitleRenderer {
    window: Arc<Window>,
    base: String,
    last: String,
}

impl Renderer for TitleRenderer {
    fn draw(&mut self, view: &FrameView) {
        let title = format!("{} | {}", self.base, view::status_line(view));
        if title != self.last {
            self.window.set_title(&title);
            self.last = title;
        }
    }
}

// ── App (winit ApplicationHandler) ──────────────────────────────────────────

struct App {
    config: WindowConfig,
    clock: SystemClock,
    game: Game,
    input: InputState,
    audio: AudioContext,
    loader: LoadHandle,
    assets: AssetBundle,
    positions: Positions,
    renderer: Option<TitleRenderer>,
    last_instant: Option<Instant>,
    accumulator: f32,
}

impl App {
    fn poll_loader(&mut self) {
        self.game.set_loading_progress(self.loader.progress());
        let Some(mut bundle) = self.loader.poll() else { return };
        if bundle.is_partial() {
            warn!(missing = ?bundle.missing, "some assets are placeholders");
        }
        self.audio.install(std::mem::take(&mut bundle.sounds));
        self.assets = bundle;
        self.game.resources_loaded(self.clock.now(), &mut self.audio);
    }

    fn frame(&mut self) {
        let fixed_dt = self.config.fixed_dt();
        let now = Instant::now();
        let elapsed = match self.last_instant {
            Some(prev) => now.duration_since(prev).as_secs_f32().min(0.25),
            None => fixed_dt,
        };
        self.last_instant = Some(now);
        self.accumulator += elapsed;

        self.poll_loader();

        while self.accumulator >= fixed_dt {
            self.game.update(self.clock.now(), &self.input, &mut self.audio);
            // Edges are consumed by the first tick that sees them.
            self.input.clear_frame_state();
            self.accumulator -= fixed_dt;
        }

        self.game.animate(self.clock.now(), |clip| self.assets.frame_count(clip));

        if let Some(renderer) = self.renderer.as_mut() {
            renderer.draw(&view::snapshot(&self.game, &self.positions));
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.renderer.is_some() {
            return;
        }
        let attributes = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(PhysicalSize::new(self.config.width, self.config.height))
            .with_resizable(false);
        match event_loop.create_window(attributes) {
            Ok(window) => {
                self.renderer = Some(TitleRenderer {
                    window: Arc::new(window),
                    base: self.config.title.clone(),
                    last: String::new(),
                });
            }
            Err(e) => {
                error!(error = %e, "failed to create window");
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(renderer) = self.renderer.as_ref() {
            renderer.window.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                self.loader.cancel();
                if let Err(e) = self.game.settings().save() {
                    warn!(error = %e, "failed to save settings on exit");
                }
                info!("window closed");
                event_loop.exit();
            }

            WindowEvent::MouseInput { button, state, .. } => match state {
                ElementState::Pressed => self.input.press_mouse(button),
                ElementState::Released => self.input.release_mouse(button),
            },

            WindowEvent::KeyboardInput {
                event: KeyEvent { physical_key: PhysicalKey::Code(code), state, .. },
                ..
            } => match state {
                ElementState::Pressed => self.input.press_key(code),
                ElementState::Released => self.input.release_key(code),
            },

            WindowEvent::RedrawRequested => self.frame(),

            _ => {}
        }
    }
}

// ── Startup ─────────────────────────────────────────────────────────────────

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}

fn env_dir(var: &str, fallback: &str) -> PathBuf {
    std::env::var_os(var).map(PathBuf::from).unwrap_or_else(|| PathBuf::from(fallback))
}

fn run() -> Result<(), AppError> {
    let config_dir = env_dir(CONFIG_DIR_ENV, "config");
    let asset_dir = env_dir(ASSET_DIR_ENV, "assets");

    let settings = Settings::load(config_dir.join(SETTINGS_FILE));
    let positions = Positions::load(&config_dir.join(POSITIONS_FILE));
    let audio = AudioContext::new(settings.bgm_volume, settings.sfx_volume);
    let loader = LoadHandle::spawn(asset_dir, Manifest::default());
    let game = Game::new(Tuning::default(), settings, StdRng::from_entropy());

    let event_loop = EventLoop::new().map_err(AppError::CreateEventLoop)?;
    let mut app = App {
        config: WindowConfig::default(),
        clock: SystemClock::new(),
        game,
        input: InputState::new(),
        audio,
        loader,
        assets: AssetBundle::default(),
        positions,
        renderer: None,
        last_instant: None,
        accumulator: 0.0,
    };
    event_loop.run_app(&mut app).map_err(AppError::EventLoopRun)
}

fn main() {
    init_tracing();
    if let Err(err) = run() {
        error!(error = %err, "startup failed");
        std::process::exit(1);
    }
}
