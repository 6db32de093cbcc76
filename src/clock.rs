use std::time::Instant;

/// Milliseconds since an arbitrary, monotonic origin.
///
/// Every gameplay deadline (teacher turn, grace window, game-over delay,
/// skill effect) is expressed in this unit and compared against the tick
/// timestamp, never scheduled as a callback.
pub type Millis = u64;

/// Source of tick timestamps.
pub trait Clock {
    fn now(&self) -> Millis;
}

/// Wall clock anchored at construction time.
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self { Self::new() }
}

impl Clock for SystemClock {
    fn now(&self) -> Millis {
        Millis::try_from(self.origin.elapsed().as_millis()).unwrap_or(Millis::MAX)
    }
}

/// Hand-driven clock for tests and replays.
#[derive(Debug, Default, Clone, Copy)]
pub struct ManualClock {
    now: Millis,
}

impl ManualClock {
    pub fn new(start: Millis) -> Self {
        Self { now: start }
    }

    pub fn set(&mut self, now: Millis) {
        self.now = now;
    }

    pub fn advance(&mut self, by: Millis) -> Millis {
        self.now += by;
        self.now
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Millis { self.now }
}

/// Convert a millisecond span to fractional seconds.
pub fn secs(span: Millis) -> f64 {
    span as f64 / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_clock_starts_near_zero_and_never_goes_back() {
        let clock = SystemClock::new();
        let first = clock.now();
        assert!(first < 1_000);
        assert!(clock.now() >= first);
    }
}
