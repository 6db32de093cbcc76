use crate::clock::Millis;

// ── WindowConfig ──────────────────────────────────────────────────────────────

/// Window and loop configuration for the binary.
///
/// The game is laid out for a fixed 800 × 600 logical screen; the window is
/// not resizable.
#[derive(Clone, Debug, PartialEq)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Fixed simulation steps per second.
    pub target_ups: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Ricktcal: Dance Time".into(),
            width: 800,
            height: 600,
            target_ups: 60,
        }
    }
}

impl WindowConfig {
    /// Length of one fixed step in seconds.
    pub fn fixed_dt(&self) -> f32 {
        1.0 / self.target_ups.max(1) as f32
    }
}

// ── Tuning ────────────────────────────────────────────────────────────────────

/// Every gameplay constant in one place.
#[derive(Clone, Debug, PartialEq)]
pub struct Tuning {
    /// Gauge gained per tick while the student dances.
    pub gauge_increase: f32,
    /// Gauge lost per tick while the student stands still.
    pub gauge_decrease: f32,
    pub gauge_max: f32,
    pub initial_gauge: f32,
    /// Gauge restored by one skill charge.
    pub skill_charge: f32,
    pub initial_skill_charges: u32,
    /// How long the student shows the skill animation after a skill use.
    pub skill_effect: Millis,
    pub score_per_tick: f64,

    /// Reaction window after a teacher flip during which dancing is forgiven.
    pub grace_period: Millis,
    /// Time between the game-over trigger and the switch to the game-over screen.
    pub game_over_delay: Millis,

    pub turn_min_delay: Millis,
    pub turn_max_delay: Millis,
    pub bounce_duration: Millis,
    pub bounce_height: f32,

    /// Period between animation frame advances.
    pub frame_period: Millis,

    /// Session age (seconds) after which the companion dances along.
    pub companion_unlock_secs: f64,
    /// How long (seconds) the companion keeps covering after the student stops.
    pub companion_cover_secs: f64,

    /// Gauge level under which the warning cue plays once.
    pub low_gauge_warning: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gauge_increase: 0.5,
            gauge_decrease: 0.25,
            gauge_max: 100.0,
            initial_gauge: 100.0,
            skill_charge: 30.0,
            initial_skill_charges: 2,
            skill_effect: 500,
            score_per_tick: 0.1,
            grace_period: 300,
            game_over_delay: 200,
            turn_min_delay: 2000,
            turn_max_delay: 5000,
            bounce_duration: 300,
            bounce_height: 15.0,
            frame_period: 50,
            companion_unlock_secs: 60.0,
            companion_cover_secs: 5.0,
            low_gauge_warning: 20.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_window_is_800x600_at_60() {
        let cfg = WindowConfig::default();
        assert_eq!((cfg.width, cfg.height, cfg.target_ups), (800, 600, 60));
        assert!((cfg.fixed_dt() - 1.0 / 60.0).abs() < 1e-6);
    }

    #[test]
    fn zero_rate_still_steps() {
        let cfg = WindowConfig { target_ups: 0, ..WindowConfig::default() };
        assert_eq!(cfg.fixed_dt(), 1.0);
    }

    #[test]
    fn turn_window_is_ordered() {
        let t = Tuning::default();
        assert!(t.turn_min_delay < t.turn_max_delay);
        assert!(t.initial_gauge <= t.gauge_max);
    }
}
