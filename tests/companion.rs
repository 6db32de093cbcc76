use rand::SeedableRng;
use rand::rngs::StdRng;
use ricktcal::config::Tuning;
use ricktcal::entity::{CompanionState, Variant};

/// Feed `update` at 60 Hz from `from` up to (not including) `to`.
fn run(c: &mut CompanionState, from: f64, to: f64, dancing: bool, rng: &mut StdRng) -> Vec<Variant> {
    let tuning = Tuning::default();
    let mut seen = Vec::new();
    let mut t = from;
    while t < to {
        c.update(t, dancing, &tuning, rng);
        seen.push(c.variant);
        t += 1.0 / 60.0;
    }
    seen
}

// ── before unlock ────────────────────────────────────────────────────────────

#[test]
fn watches_while_the_student_dances() {
    let mut rng = StdRng::seed_from_u64(0);
    let mut c = CompanionState::new();
    let seen = run(&mut c, 0.0, 10.0, true, &mut rng);
    assert!(seen.iter().all(|v| *v == Variant::Idle2));
    assert!(!c.dancing);
}

#[test]
fn covers_for_five_seconds_after_the_student_stops() {
    let tuning = Tuning::default();
    let mut rng = StdRng::seed_from_u64(0);
    let mut c = CompanionState::new();
    run(&mut c, 0.0, 10.0, true, &mut rng);

    c.update(10.0, false, &tuning, &mut rng);
    assert_eq!(c.dance_stopped_at, Some(10.0));
    assert_eq!(c.variant, Variant::Idle3);

    c.update(14.99, false, &tuning, &mut rng);
    assert_eq!(c.variant, Variant::Idle3);

    c.update(15.0, false, &tuning, &mut rng);
    assert_eq!(c.variant, Variant::Idle1);

    c.update(20.0, false, &tuning, &mut rng);
    assert_eq!(c.variant, Variant::Idle1);
}

#[test]
fn dancing_again_cancels_the_cover() {
    let tuning = Tuning::default();
    let mut rng = StdRng::seed_from_u64(0);
    let mut c = CompanionState::new();
    c.update(1.0, true, &tuning, &mut rng);
    c.update(2.0, false, &tuning, &mut rng);
    assert_eq!(c.variant, Variant::Idle3);
    c.update(3.0, true, &tuning, &mut rng);
    assert_eq!(c.variant, Variant::Idle2);
    assert_eq!(c.dance_stopped_at, None);
}

#[test]
fn idle_student_keeps_companion_idle() {
    let mut rng = StdRng::seed_from_u64(0);
    let mut c = CompanionState::new();
    let seen = run(&mut c, 0.0, 30.0, false, &mut rng);
    assert!(seen.iter().all(|v| *v == Variant::Idle1));
}

// ── after unlock ─────────────────────────────────────────────────────────────

#[test]
fn dance_choice_varies_across_runs_and_holds_within_one() {
    let tuning = Tuning::default();
    let mut dance1 = 0;
    let mut dance2 = 0;
    for seed in 0..200 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut c = CompanionState::new();
        c.update(64.0, false, &tuning, &mut rng);

        let seen = run(&mut c, 65.0, 70.0, true, &mut rng);
        let first = seen[0];
        assert!(first.is_dance());
        assert!(seen.iter().all(|v| *v == first), "dance changed mid-period (seed {seed})");
        match first {
            Variant::Dance1 => dance1 += 1,
            Variant::Dance2 => dance2 += 1,
            _ => unreachable!(),
        }
    }
    assert!(dance1 > 40 && dance2 > 40, "dance1={dance1} dance2={dance2}");
}

#[test]
fn stopping_after_unlock_goes_straight_to_idle() {
    let tuning = Tuning::default();
    let mut rng = StdRng::seed_from_u64(8);
    let mut c = CompanionState::new();
    c.update(61.0, true, &tuning, &mut rng);
    assert!(c.dancing);
    c.update(62.0, false, &tuning, &mut rng);
    assert_eq!(c.variant, Variant::Idle1);
    assert!(!c.dancing);
    assert_eq!(c.chosen_dance, None);
}
