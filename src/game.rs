use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::audio::{AudioSink, Cue};
use crate::clock::Millis;
use crate::config::Tuning;
use crate::entity::Cast;
use crate::input::{ActionMap, GameAction, InputState};
use crate::rules;
use crate::scene::{Entry, Scene, SceneEvent, SceneStack, Transition};
use crate::session::{GameOverReason, SessionState};
use crate::settings::{Channel, Settings};

/// Volume step of one Left/Right press on the settings screen.
const VOLUME_STEP: f32 = 0.1;

/// The whole game state, passed explicitly to everything that reads or
/// changes it.
///
/// Each tick the window layer hands in the current time, the input frame and
/// an audio sink; the game routes input for the active screen, runs the
/// gameplay step while playing, and emits audio cues.  Nothing here blocks.
pub struct Game {
    tuning: Tuning,
    scenes: SceneStack,
    session: SessionState,
    cast: Cast,
    rng: StdRng,
    actions: ActionMap<GameAction>,
    settings: Settings,
    settings_cursor: Channel,
    /// Credits panel shown over the settings screen.
    show_credits: bool,
    resources_ready: bool,
    loading_progress: u8,
    /// When the settings screen covered a running game.
    paused_at: Option<Millis>,
    low_gauge_warned: bool,
}

impl Game {
    pub fn new(tuning: Tuning, settings: Settings, mut rng: StdRng) -> Self {
        let cast = Cast::new(0, &tuning, &mut rng);
        Self {
            session: SessionState::new(&tuning),
            cast,
            tuning,
            scenes: SceneStack::new(Scene::Title),
            rng,
            actions: ActionMap::game_defaults(),
            settings,
            settings_cursor: Channel::Bgm,
            show_credits: false,
            resources_ready: false,
            loading_progress: 0,
            paused_at: None,
            low_gauge_warned: false,
        }
    }

    /// Default tuning, in-memory settings and a seeded rng.
    pub fn with_seed(seed: u64) -> Self {
        Self::new(Tuning::default(), Settings::default(), StdRng::seed_from_u64(seed))
    }

    // ── Accessors ──────────────────────────────────────────────────────────

    pub fn scene(&self) -> Scene { self.scenes.current() }
    pub fn scenes(&self) -> &SceneStack { &self.scenes }
    pub fn session(&self) -> &SessionState { &self.session }
    pub fn session_mut(&mut self) -> &mut SessionState { &mut self.session }
    pub fn cast(&self) -> &Cast { &self.cast }
    pub fn cast_mut(&mut self) -> &mut Cast { &mut self.cast }
    pub fn tuning(&self) -> &Tuning { &self.tuning }
    pub fn settings(&self) -> &Settings { &self.settings }
    pub fn settings_cursor(&self) -> Channel { self.settings_cursor }
    pub fn show_credits(&self) -> bool { self.show_credits }
    pub fn resources_ready(&self) -> bool { self.resources_ready }
    pub fn loading_progress(&self) -> u8 { self.loading_progress }

    pub fn set_loading_progress(&mut self, percent: u8) {
        self.loading_progress = percent.min(100);
    }

    /// Record that background loading finished.  Starts the music and, if the
    /// player is waiting on the loading screen, moves on to the game.
    pub fn resources_loaded(&mut self, now: Millis, audio: &mut dyn AudioSink) {
        if self.resources_ready {
            return;
        }
        self.resources_ready = true;
        self.loading_progress = 100;
        audio.set_volumes(self.settings.bgm_volume, self.settings.sfx_volume);
        audio.play_music(Cue::Bgm);
        self.handle_event(SceneEvent::ResourcesReady, now, audio);
    }

    // ── Scene transitions ──────────────────────────────────────────────────

    /// Route `event` through the transition table and apply the entry
    /// effects of the resulting screen.  Illegal events are ignored.
    pub fn handle_event(&mut self, event: SceneEvent, now: Millis, audio: &mut dyn AudioSink) -> Option<Transition> {
        let transition = self.scenes.handle(event, self.resources_ready)?;
        if matches!(event, SceneEvent::StartClicked | SceneEvent::RestartClicked | SceneEvent::MenuClicked | SceneEvent::Back) {
            audio.play_effect(Cue::Click);
        }

        match (transition.to, transition.entry) {
            (Scene::Playing, Entry::Fresh) => {
                self.start_run(now);
                if transition.from == Scene::GameOver {
                    audio.play_music(Cue::Bgm);
                }
            }
            (Scene::Playing, Entry::Resumed) => self.resume(now),
            (Scene::Settings, _) => {
                self.show_credits = false;
                if transition.from == Scene::Playing {
                    self.paused_at = Some(now);
                    self.set_dancing(false, audio);
                }
            }
            (Scene::Title, Entry::Fresh) => {
                self.session.reset(&self.tuning);
                audio.play_music(Cue::Bgm);
            }
            _ => {}
        }
        Some(transition)
    }

    fn start_run(&mut self, now: Millis) {
        self.session.start(now, &self.tuning);
        self.cast = Cast::new(now, &self.tuning, &mut self.rng);
        self.paused_at = None;
        self.low_gauge_warned = false;
        info!("run started");
    }

    /// Shift every gameplay deadline by the time spent on the settings screen.
    fn resume(&mut self, now: Millis) {
        if let Some(paused_at) = self.paused_at.take() {
            let by = now.saturating_sub(paused_at);
            self.session.shift(by);
            self.cast.shift(by);
            debug!(paused_ms = by, "resumed");
        }
    }

    // ── Per-tick entry point ───────────────────────────────────────────────

    /// Consume one input frame and advance the active screen.
    pub fn update(&mut self, now: Millis, input: &InputState, audio: &mut dyn AudioSink) {
        match self.scene() {
            Scene::Title => {
                if self.actions.is_pressed(GameAction::Settings, input) {
                    self.handle_event(SceneEvent::SettingsKey, now, audio);
                } else if self.actions.is_pressed(GameAction::Start, input) {
                    self.handle_event(SceneEvent::StartClicked, now, audio);
                }
            }
            Scene::Loading => {
                if self.resources_ready {
                    self.handle_event(SceneEvent::ResourcesReady, now, audio);
                }
            }
            Scene::Playing => {
                if !self.session.is_frozen() {
                    if self.actions.is_pressed(GameAction::Settings, input) {
                        self.handle_event(SceneEvent::SettingsKey, now, audio);
                        return;
                    }
                    let held = self.actions.is_held(GameAction::Dance, input);
                    self.set_dancing(held, audio);
                    if self.actions.is_pressed(GameAction::Skill, input) {
                        self.use_skill(now, audio);
                    }
                }
                self.tick(now, audio);
            }
            Scene::GameOver => {
                if self.actions.is_pressed(GameAction::Restart, input) {
                    self.handle_event(SceneEvent::RestartClicked, now, audio);
                } else if self.actions.is_pressed(GameAction::Menu, input) {
                    self.handle_event(SceneEvent::MenuClicked, now, audio);
                }
            }
            Scene::Settings => {
                // Any press dismisses the credits panel and nothing else.
                if self.show_credits {
                    if input.any_pressed() {
                        self.show_credits = false;
                        audio.play_effect(Cue::Click);
                    }
                } else if self.actions.is_pressed(GameAction::Credits, input) {
                    self.show_credits = true;
                    audio.play_effect(Cue::Click);
                } else if self.actions.is_pressed(GameAction::Settings, input) {
                    self.handle_event(SceneEvent::Back, now, audio);
                } else if self.actions.is_pressed(GameAction::SelectUp, input) || self.actions.is_pressed(GameAction::SelectDown, input) {
                    self.settings_cursor = self.settings_cursor.other();
                } else if self.actions.is_pressed(GameAction::VolumeUp, input) {
                    self.nudge_volume(VOLUME_STEP, audio);
                } else if self.actions.is_pressed(GameAction::VolumeDown, input) {
                    self.nudge_volume(-VOLUME_STEP, audio);
                }
            }
        }
    }

    fn nudge_volume(&mut self, delta: f32, audio: &mut dyn AudioSink) {
        self.settings.nudge_volume(self.settings_cursor, delta);
        audio.set_volumes(self.settings.bgm_volume, self.settings.sfx_volume);
        audio.play_effect(Cue::Click);
    }

    // ── Gameplay ───────────────────────────────────────────────────────────

    /// Start or stop the student's dance.  Cues only fire on a change.
    pub fn set_dancing(&mut self, dancing: bool, audio: &mut dyn AudioSink) {
        let Some(student) = self.cast.primary_mut() else { return };
        if !student.set_dancing(dancing) {
            return;
        }
        if dancing {
            audio.play_effect(Cue::Dance);
        } else {
            audio.stop_effect(Cue::Dance);
        }
    }

    /// Spend a skill charge.  Returns `false` when none are left or the
    /// game is not running.
    pub fn use_skill(&mut self, now: Millis, audio: &mut dyn AudioSink) -> bool {
        if self.scene() != Scene::Playing || self.session.is_frozen() {
            return false;
        }
        if !self.session.use_skill(&self.tuning) {
            return false;
        }
        if let Some(student) = self.cast.primary_mut() {
            student.begin_skill(now, self.tuning.skill_effect);
        }
        audio.play_effect(Cue::Skill);
        true
    }

    /// One gameplay step.  Only runs while playing; once a game over has
    /// been triggered only the commit delay is checked.
    pub fn tick(&mut self, now: Millis, audio: &mut dyn AudioSink) {
        if self.scene() != Scene::Playing {
            return;
        }
        if self.session.is_frozen() {
            if self.session.check_game_over_delay(now, &self.tuning) {
                info!(reason = ?self.session.game_over_reason, score = self.session.score, "game over");
                self.handle_event(SceneEvent::GameOverCommitted, now, audio);
            }
            return;
        }

        let elapsed = self.session.elapsed_secs(now);
        if self.cast.update(now, elapsed, &self.tuning, &mut self.rng) {
            self.session.last_teacher_turn = now;
            audio.play_effect(Cue::Turn);
            debug!(facing_away = self.cast.teacher_facing_away(), "teacher turned");
        }

        if let Some(reason) = rules::check_caught(&mut self.session, &self.cast, now, &self.tuning) {
            self.on_game_over(reason, audio);
            return;
        }

        let exhausted = self.session.update_gauge(self.cast.primary_dancing(), &self.tuning);
        self.warn_low_gauge(audio);
        if let Some(reason) = rules::check_exhausted(&mut self.session, exhausted, now) {
            self.on_game_over(reason, audio);
            return;
        }

        self.session.update_score(&self.tuning);
    }

    fn on_game_over(&mut self, reason: GameOverReason, audio: &mut dyn AudioSink) {
        info!(?reason, "game over triggered");
        audio.stop_all(&[Cue::GameOver]);
        audio.play_effect(Cue::GameOver);
    }

    fn warn_low_gauge(&mut self, audio: &mut dyn AudioSink) {
        if self.session.gauge < self.tuning.low_gauge_warning {
            if !self.low_gauge_warned {
                self.low_gauge_warned = true;
                audio.play_effect(Cue::Warning);
            }
        } else {
            self.low_gauge_warned = false;
        }
    }

    /// Advance every entity's animation frame.  `frame_count` gives the
    /// number of frames in a clip.
    pub fn animate(&mut self, now: Millis, frame_count: impl Fn(&str) -> usize) {
        if self.scene() != Scene::Playing {
            return;
        }
        let period = self.tuning.frame_period;
        for entity in self.cast.iter_mut() {
            let frames = frame_count(&entity.clip());
            entity.advance_frame(now, period, frames);
        }
    }
}
