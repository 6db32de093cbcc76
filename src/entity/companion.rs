use rand::Rng;

use crate::config::Tuning;

/// Animation variant shown for the companion.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Variant {
    Idle1,
    Idle2,
    Idle3,
    Dance1,
    Dance2,
}

impl Variant {
    pub fn suffix(self) -> &'static str {
        match self {
            Variant::Idle1 => "idle_1",
            Variant::Idle2 => "idle_2",
            Variant::Idle3 => "idle_3",
            Variant::Dance1 => "dance_1",
            Variant::Dance2 => "dance_2",
        }
    }

    pub fn is_dance(self) -> bool {
        matches!(self, Variant::Dance1 | Variant::Dance2)
    }
}

/// Joanne, the companion.  Her look is recomputed every tick from the
/// session age and whether the primary student is dancing.
///
/// Before the unlock time she watches the student: `Idle2` while the student
/// dances, `Idle3` for a short cover window after the student stops, then
/// `Idle1`.  After the unlock she dances along, holding one randomly chosen
/// dance for the whole of each of the student's dance periods.
#[derive(Clone, Debug)]
pub struct CompanionState {
    pub variant: Variant,
    pub dancing: bool,
    /// Session age (seconds) at which the student last stopped dancing.
    pub dance_stopped_at: Option<f64>,
    pub last_primary_dancing: bool,
    pub chosen_dance: Option<Variant>,
}

impl Default for CompanionState {
    fn default() -> Self {
        Self {
            variant: Variant::Idle1,
            dancing: false,
            dance_stopped_at: None,
            last_primary_dancing: false,
            chosen_dance: None,
        }
    }
}

impl CompanionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update<R: Rng + ?Sized>(&mut self, elapsed: f64, primary_dancing: bool, tuning: &Tuning, rng: &mut R) {
        if elapsed >= tuning.companion_unlock_secs {
            self.dance_along(primary_dancing, rng);
        } else {
            self.watch(elapsed, primary_dancing, tuning);
        }
    }

    fn dance_along<R: Rng + ?Sized>(&mut self, primary_dancing: bool, rng: &mut R) {
        if primary_dancing {
            let dance = match self.chosen_dance {
                Some(dance) if self.last_primary_dancing => dance,
                _ => if rng.gen_bool(0.5) { Variant::Dance1 } else { Variant::Dance2 },
            };
            self.chosen_dance = Some(dance);
            self.variant = dance;
            self.dancing = true;
        } else {
            self.chosen_dance = None;
            self.variant = Variant::Idle1;
            self.dancing = false;
        }
        self.last_primary_dancing = primary_dancing;
    }

    fn watch(&mut self, elapsed: f64, primary_dancing: bool, tuning: &Tuning) {
        self.dancing = false;
        if primary_dancing {
            self.variant = Variant::Idle2;
            self.dance_stopped_at = None;
            self.last_primary_dancing = true;
            return;
        }

        if self.last_primary_dancing {
            self.dance_stopped_at = Some(elapsed);
            self.last_primary_dancing = false;
        }

        self.variant = match self.dance_stopped_at {
            Some(t0) if elapsed - t0 < tuning.companion_cover_secs => Variant::Idle3,
            Some(_) => {
                self.dance_stopped_at = None;
                Variant::Idle1
            }
            None => Variant::Idle1,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn starts_idle() {
        let c = CompanionState::new();
        assert_eq!(c.variant, Variant::Idle1);
        assert!(!c.dancing);
    }

    #[test]
    fn crossing_unlock_mid_dance_picks_a_dance() {
        let tuning = Tuning::default();
        let mut rng = StdRng::seed_from_u64(3);
        let mut c = CompanionState::new();
        c.update(59.9, true, &tuning, &mut rng);
        assert_eq!(c.variant, Variant::Idle2);
        c.update(60.0, true, &tuning, &mut rng);
        assert!(c.variant.is_dance());
        assert!(c.dancing);
    }
}
