//! Frame-driven timers. Time only moves when the owner feeds elapsed
//! durations in, so the lifecycle stays deterministic under test.

use std::time::Duration;

use tracing::debug;

/// One-shot timer
#[derive(Clone, Debug)]
pub struct Delay {
    remaining: Duration,
    overshoot: Duration,
    fired: bool,
}

impl Delay {
    pub fn new(delay: Duration) -> Self {
        Self {
            remaining: delay,
            overshoot: Duration::ZERO,
            fired: false,
        }
    }

    /// Advance the timer. Returns `true` exactly once, on the call that
    /// exhausts the delay.
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        if self.fired {
            return false;
        }
        self.overshoot = elapsed.saturating_sub(self.remaining);
        self.remaining = self.remaining.saturating_sub(elapsed);
        self.fired = self.remaining.is_zero();
        self.fired
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }

    /// Time elapsed past the delay on the call that fired it
    pub fn overshoot(&self) -> Duration {
        if self.fired { self.overshoot } else { Duration::ZERO }
    }
}

/// Periodic timer. Fires at most once per `poll` and carries the time left
/// over, so the average rate stays at one fire per period. The carried
/// backlog is capped at one period. A cancelled ticker never fires again.
#[derive(Debug)]
pub struct Ticker {
    period: Duration,
    accumulated: Duration,
    active: bool,
}

impl Ticker {
    pub fn start(period: Duration) -> Self {
        Self::start_with(period, Duration::ZERO)
    }

    /// Start with `carried` time already on the clock
    pub fn start_with(period: Duration, carried: Duration) -> Self {
        debug!(
            period_ms = period.as_millis() as u64,
            carried_ms = carried.as_millis() as u64,
            "Ticker started"
        );
        Self {
            period,
            accumulated: carried.min(period),
            active: true,
        }
    }

    pub fn poll(&mut self, elapsed: Duration) -> bool {
        if !self.active {
            return false;
        }
        self.accumulated += elapsed;
        if self.accumulated >= self.period {
            self.accumulated = (self.accumulated - self.period).min(self.period);
            return true;
        }
        false
    }

    pub fn cancel(&mut self) {
        if self.active {
            self.active = false;
            debug!("Ticker cancelled");
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.cancel();
    }
}
