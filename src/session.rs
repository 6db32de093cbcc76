use serde::{Deserialize, Serialize};

use crate::clock::{Millis, secs};
use crate::config::Tuning;

/// Why a session ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOverReason {
    /// The teacher saw the student dancing.
    Caught,
    /// The gauge ran dry.
    NoEnergy,
}

/// Score, gauge, skill charges and the game-over latch of one run.
///
/// Game over happens in two phases: [`trigger_game_over`](Self::trigger_game_over)
/// latches the reason and time (first writer wins), then
/// [`check_game_over_delay`](Self::check_game_over_delay) commits once the
/// configured delay has passed.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionState {
    pub score: f64,
    pub gauge: f32,
    pub skill_charges: u32,
    pub last_teacher_turn: Millis,
    pub game_over_triggered: bool,
    pub game_over_committed: bool,
    pub game_over_time: Option<Millis>,
    pub game_over_reason: Option<GameOverReason>,
    pub show_exclamation: bool,
    pub session_start: Option<Millis>,
}

impl SessionState {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            score: 0.0,
            gauge: tuning.initial_gauge,
            skill_charges: tuning.initial_skill_charges,
            last_teacher_turn: 0,
            game_over_triggered: false,
            game_over_committed: false,
            game_over_time: None,
            game_over_reason: None,
            show_exclamation: false,
            session_start: None,
        }
    }

    /// Restore every field to its initial value.
    pub fn reset(&mut self, tuning: &Tuning) {
        *self = Self::new(tuning);
    }

    /// Reset and stamp the start of a new run at `now`.
    pub fn start(&mut self, now: Millis, tuning: &Tuning) {
        self.reset(tuning);
        self.session_start = Some(now);
        self.last_teacher_turn = now;
    }

    /// Seconds since the run started (zero before the first start).
    pub fn elapsed_secs(&self, now: Millis) -> f64 {
        self.session_start.map_or(0.0, |start| secs(now.saturating_sub(start)))
    }

    /// Gameplay is frozen between trigger and commit.
    pub fn is_frozen(&self) -> bool {
        self.game_over_triggered
    }

    /// Move the gauge one tick.  Returns `true` when it is exhausted.
    pub fn update_gauge(&mut self, dancing: bool, tuning: &Tuning) -> bool {
        self.gauge = if dancing {
            (self.gauge + tuning.gauge_increase).min(tuning.gauge_max)
        } else {
            (self.gauge - tuning.gauge_decrease).max(0.0)
        };
        self.gauge <= 0.0
    }

    /// Spend one skill charge for a gauge boost.  No-op without charges.
    pub fn use_skill(&mut self, tuning: &Tuning) -> bool {
        if self.skill_charges == 0 {
            return false;
        }
        self.gauge = (self.gauge + tuning.skill_charge).min(tuning.gauge_max);
        self.skill_charges -= 1;
        true
    }

    pub fn update_score(&mut self, tuning: &Tuning) {
        self.score += tuning.score_per_tick;
    }

    /// Latch a game over.  Returns `true` only for the call that set the latch.
    pub fn trigger_game_over(&mut self, now: Millis, reason: GameOverReason) -> bool {
        if self.game_over_triggered {
            return false;
        }
        self.game_over_triggered = true;
        self.game_over_time = Some(now);
        self.game_over_reason = Some(reason);
        self.show_exclamation = reason == GameOverReason::Caught;
        true
    }

    /// Commit a triggered game over once the delay has elapsed.  Returns
    /// `true` on the committing tick.
    pub fn check_game_over_delay(&mut self, now: Millis, tuning: &Tuning) -> bool {
        if !self.game_over_triggered || self.game_over_committed {
            return false;
        }
        let Some(at) = self.game_over_time else { return false };
        if now.saturating_sub(at) >= tuning.game_over_delay {
            self.game_over_committed = true;
            return true;
        }
        false
    }

    pub fn shift(&mut self, by: Millis) {
        self.last_teacher_turn += by;
        if let Some(t) = &mut self.game_over_time {
            *t += by;
        }
        if let Some(t) = &mut self.session_start {
            *t += by;
        }
    }
}
