use std::time::{Duration, Instant};

use rand::Rng;
use tracing::debug;

use crate::engine::{SimulationEngine, StepOutcome};

/// Fixed-period tick source driven by the host loop's clock.
///
/// Once cancelled it never reports another tick until restarted.
#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    last_tick: Instant,
    cancelled: bool,
}

impl Ticker {
    #[must_use]
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            last_tick: now,
            cancelled: false,
        }
    }

    /// Returns true and re-arms when a full interval has elapsed since the last tick.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.cancelled || now.saturating_duration_since(self.last_tick) < self.interval {
            return false;
        }

        self.last_tick = now;
        true
    }

    /// Time left until the next tick is due, `None` once cancelled.
    #[must_use]
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        if self.cancelled {
            return None;
        }
        Some(
            self.interval
                .saturating_sub(now.saturating_duration_since(self.last_tick)),
        )
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Re-arms a cancelled ticker, counting the next interval from `now`.
    pub fn restart(&mut self, now: Instant) {
        self.cancelled = false;
        self.last_tick = now;
    }
}

/// Steps `engine` when `ticker` is due, cancelling the ticker once the engine ends.
pub fn drive<R: Rng>(
    ticker: &mut Ticker,
    engine: &mut SimulationEngine<R>,
    now: Instant,
) -> Option<StepOutcome> {
    if engine.is_terminal() {
        ticker.cancel();
        return None;
    }
    if !ticker.poll(now) {
        return None;
    }

    let outcome = engine.step();
    if engine.is_terminal() {
        debug!(?outcome, "ticker cancelled");
        ticker.cancel();
    }
    Some(outcome)
}
