use std::time::{Duration, Instant};

use crate::sim::Ticker;

/// Paces the game loop at a fixed number of ticks per second.
///
/// Each `wait` sleeps for whatever is left of the period since the previous
/// tick, so slow frames do not make the next one slower too.
pub struct FixedRateTicker {
    period: Duration,
    last_tick: Option<Instant>,
}

impl FixedRateTicker {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            last_tick: None,
        }
    }

    pub fn per_second(ticks: u32) -> Self {
        Self::new(Duration::from_secs(1) / ticks.max(1))
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Time still to wait before the next tick is due.
    fn remaining(&self, now: Instant) -> Duration {
        match self.last_tick {
            Some(last) => self.period.saturating_sub(now.duration_since(last)),
            None => Duration::ZERO,
        }
    }
}

impl Ticker for FixedRateTicker {
    fn wait(&mut self) {
        let remaining = self.remaining(Instant::now());
        if !remaining.is_zero() {
            std::thread::sleep(remaining);
        }
        self.last_tick = Some(Instant::now());
    }
}
