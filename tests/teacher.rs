use rand::SeedableRng;
use rand::rngs::StdRng;
use ricktcal::config::Tuning;
use ricktcal::entity::teacher::{Bounce, TeacherState, bounce_offset, sample_turn_delay};

// ── bounce_offset ────────────────────────────────────────────────────────────

#[test]
fn bounce_starts_and_ends_at_rest() {
    assert_eq!(bounce_offset(0, 300, 15.0), 0);
    assert_eq!(bounce_offset(300, 300, 15.0), 0);
    assert_eq!(bounce_offset(1_000, 300, 15.0), 0);
}

#[test]
fn bounce_peaks_halfway_upwards() {
    assert_eq!(bounce_offset(150, 300, 15.0), -15);
}

#[test]
fn bounce_quarter_way_rounds() {
    // 15 * sin(π/4) ≈ 10.61
    assert_eq!(bounce_offset(75, 300, 15.0), -11);
}

#[test]
fn bounce_with_zero_duration_is_flat() {
    assert_eq!(bounce_offset(0, 0, 15.0), 0);
    assert_eq!(bounce_offset(10, 0, 15.0), 0);
}

// ── turn timer ───────────────────────────────────────────────────────────────

#[test]
fn teacher_starts_facing_away_with_a_sampled_delay() {
    let tuning = Tuning::default();
    let mut rng = StdRng::seed_from_u64(7);
    let t = TeacherState::new(1_000, &tuning, &mut rng);
    assert!(t.facing_away);
    assert_eq!(t.last_turn, 1_000);
    assert!((tuning.turn_min_delay..=tuning.turn_max_delay).contains(&t.turn_delay));
    assert_eq!(t.bounce, Bounce::Idle);
}

#[test]
fn flip_happens_strictly_after_the_delay() {
    let tuning = Tuning::default();
    let mut rng = StdRng::seed_from_u64(11);
    let mut t = TeacherState::new(0, &tuning, &mut rng);
    let deadline = t.turn_deadline();

    assert!(!t.update(deadline, &tuning, &mut rng));
    assert!(t.facing_away);

    assert!(t.update(deadline + 1, &tuning, &mut rng));
    assert!(!t.facing_away);
    assert_eq!(t.last_turn, deadline + 1);
    assert_eq!(t.bounce, Bounce::Active { start: deadline + 1 });
}

#[test]
fn bounce_runs_for_its_duration_after_a_flip() {
    let tuning = Tuning::default();
    let mut rng = StdRng::seed_from_u64(5);
    let mut t = TeacherState::new(0, &tuning, &mut rng);
    let flip_at = t.turn_deadline() + 1;
    t.update(flip_at, &tuning, &mut rng);

    t.update(flip_at + 150, &tuning, &mut rng);
    assert_eq!(t.bounce_offset, -15);

    t.update(flip_at + tuning.bounce_duration, &tuning, &mut rng);
    assert_eq!(t.bounce, Bounce::Idle);
    assert_eq!(t.bounce_offset, 0);
}

#[test]
fn teacher_keeps_alternating() {
    let tuning = Tuning::default();
    let mut rng = StdRng::seed_from_u64(99);
    let mut t = TeacherState::new(0, &tuning, &mut rng);
    let mut facings = Vec::new();
    for _ in 0..6 {
        let at = t.turn_deadline() + 1;
        assert!(t.update(at, &tuning, &mut rng));
        facings.push(t.facing_away);
    }
    assert_eq!(facings, [false, true, false, true, false, true]);
}

#[test]
fn shift_moves_the_deadline() {
    let tuning = Tuning::default();
    let mut rng = StdRng::seed_from_u64(1);
    let mut t = TeacherState::new(0, &tuning, &mut rng);
    let before = t.turn_deadline();
    t.shift(5_000);
    assert_eq!(t.turn_deadline(), before + 5_000);
}

// ── delay distribution ───────────────────────────────────────────────────────

#[test]
fn turn_delays_stay_in_window_and_average_mid_range() {
    let tuning = Tuning::default();
    let mut rng = StdRng::seed_from_u64(2024);
    let n = 10_000;
    let mut sum = 0u64;
    for _ in 0..n {
        let d = sample_turn_delay(&tuning, &mut rng);
        assert!((2_000..=5_000).contains(&d), "delay out of range: {d}");
        sum += d;
    }
    let mean = sum as f64 / n as f64;
    assert!((3_400.0..3_600.0).contains(&mean), "mean was {mean}");
}
