use rand::Rng;

use crate::clock::Millis;
use crate::config::Tuning;

/// Cosmetic hop played whenever the teacher changes direction.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Bounce {
    Idle,
    Active { start: Millis },
}

/// Facing state and turn timer of the teacher.
///
/// The teacher alternates between facing away from the class and facing the
/// viewer.  Each facing lasts for a delay sampled uniformly from
/// `[turn_min_delay, turn_max_delay]`; the sample is redrawn immediately after
/// every flip.
#[derive(Clone, Debug)]
pub struct TeacherState {
    pub facing_away: bool,
    /// Timestamp of the most recent flip (or of creation).
    pub last_turn: Millis,
    /// Length of the current facing.
    pub turn_delay: Millis,
    pub bounce: Bounce,
    /// Vertical render offset in pixels; negative is up.  Never used by detection.
    pub bounce_offset: i32,
}

impl TeacherState {
    pub fn new<R: Rng + ?Sized>(now: Millis, tuning: &Tuning, rng: &mut R) -> Self {
        Self {
            facing_away: true,
            last_turn: now,
            turn_delay: sample_turn_delay(tuning, rng),
            bounce: Bounce::Idle,
            bounce_offset: 0,
        }
    }

    /// Timestamp after which the next flip happens.
    pub fn turn_deadline(&self) -> Millis {
        self.last_turn + self.turn_delay
    }

    /// Advance the turn timer and bounce.  Returns `true` on the tick the
    /// teacher flips.
    pub fn update<R: Rng + ?Sized>(&mut self, now: Millis, tuning: &Tuning, rng: &mut R) -> bool {
        let flipped = now.saturating_sub(self.last_turn) > self.turn_delay;
        if flipped {
            self.facing_away = !self.facing_away;
            self.last_turn = now;
            self.turn_delay = sample_turn_delay(tuning, rng);
            self.bounce = Bounce::Active { start: now };
            self.bounce_offset = 0;
        }
        self.update_bounce(now, tuning);
        flipped
    }

    fn update_bounce(&mut self, now: Millis, tuning: &Tuning) {
        let Bounce::Active { start } = self.bounce else { return };
        let elapsed = now.saturating_sub(start);
        if elapsed >= tuning.bounce_duration {
            self.bounce = Bounce::Idle;
            self.bounce_offset = 0;
            return;
        }
        self.bounce_offset = bounce_offset(elapsed, tuning.bounce_duration, tuning.bounce_height);
    }

    /// Push every stored timestamp forward by `by` (used after a pause).
    pub fn shift(&mut self, by: Millis) {
        self.last_turn += by;
        if let Bounce::Active { start } = &mut self.bounce {
            *start += by;
        }
    }
}

/// Draw a facing duration uniformly from the configured turn window.
pub fn sample_turn_delay<R: Rng + ?Sized>(tuning: &Tuning, rng: &mut R) -> Millis {
    rng.gen_range(tuning.turn_min_delay..=tuning.turn_max_delay)
}

/// Vertical offset of the bounce `elapsed` ms into an animation of
/// `duration` ms peaking at `height` px.
///
/// Follows `-round(height * sin(π · p))` with `p` clamped to `[0, 1]`, so it
/// starts and ends at zero and peaks halfway through.
pub fn bounce_offset(elapsed: Millis, duration: Millis, height: f32) -> i32 {
    if duration == 0 {
        return 0;
    }
    let progress = (elapsed as f32 / duration as f32).clamp(0.0, 1.0);
    if progress >= 1.0 {
        return 0;
    }
    -(height * (std::f32::consts::PI * progress).sin()).round() as i32
}
