//! Detection rules that end a run.

use crate::clock::Millis;
use crate::config::Tuning;
use crate::entity::Cast;
use crate::session::{GameOverReason, SessionState};

/// Caught dancing: the student dances while the teacher faces the viewer and
/// the grace window since the last flip has run out.
pub fn caught_dancing(dancing: bool, facing_away: bool, now: Millis, last_turn: Millis, tuning: &Tuning) -> bool {
    dancing && !facing_away && now.saturating_sub(last_turn) > tuning.grace_period
}

/// Evaluate the caught rule against the current cast and latch a game over
/// if it fires.  Returns the reason when this call set the latch.
pub fn check_caught(session: &mut SessionState, cast: &Cast, now: Millis, tuning: &Tuning) -> Option<GameOverReason> {
    let caught = caught_dancing(
        cast.primary_dancing(),
        cast.teacher_facing_away(),
        now,
        session.last_teacher_turn,
        tuning,
    );
    if caught && session.trigger_game_over(now, GameOverReason::Caught) {
        Some(GameOverReason::Caught)
    } else {
        None
    }
}

/// Latch a game over when the gauge has run dry.
pub fn check_exhausted(session: &mut SessionState, exhausted: bool, now: Millis) -> Option<GameOverReason> {
    if exhausted && session.trigger_game_over(now, GameOverReason::NoEnergy) {
        Some(GameOverReason::NoEnergy)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grace_is_exclusive() {
        let t = Tuning::default();
        assert!(!caught_dancing(true, false, 1300, 1000, &t));
        assert!(caught_dancing(true, false, 1301, 1000, &t));
    }

    #[test]
    fn never_caught_when_facing_away_or_still() {
        let t = Tuning::default();
        assert!(!caught_dancing(true, true, 10_000, 0, &t));
        assert!(!caught_dancing(false, false, 10_000, 0, &t));
    }

    #[test]
    fn exhaustion_latches_once() {
        let t = Tuning::default();
        let mut s = SessionState::new(&t);
        assert_eq!(check_exhausted(&mut s, true, 5), Some(GameOverReason::NoEnergy));
        assert_eq!(check_exhausted(&mut s, true, 6), None);
        assert_eq!(s.game_over_time, Some(5));
        assert!(!s.show_exclamation);
    }

    #[test]
    fn caught_after_exhaustion_keeps_first_reason() {
        let t = Tuning::default();
        let mut rng: rand::rngs::StdRng = rand::SeedableRng::seed_from_u64(4);
        let mut cast = Cast::new(0, &t, &mut rng);
        if let Some(teacher) = cast.teacher_mut() {
            teacher.facing_away = false;
        }
        if let Some(student) = cast.primary_mut() {
            student.set_dancing(true);
        }
        let mut s = SessionState::new(&t);
        assert_eq!(check_exhausted(&mut s, true, 900), Some(GameOverReason::NoEnergy));
        assert_eq!(check_caught(&mut s, &cast, 1_000, &t), None);
        assert_eq!(s.game_over_reason, Some(GameOverReason::NoEnergy));
        assert_eq!(s.game_over_time, Some(900));
    }
}
