use std::time::Duration;

use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

/// A periodic timer that can be re-armed with a new period
///
/// Re-arming drops the old `Interval` and schedules the next tick one full
/// period from now, so a speed change never fires at the stale rate.
pub struct Clock {
    interval: Interval,
    period: Duration,
}

impl Clock {
    pub fn new(period: Duration) -> Self {
        Self {
            interval: Self::arm(period),
            period,
        }
    }

    fn arm(period: Duration) -> Interval {
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        interval
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Switch to `period`; does nothing if it is already the current one
    pub fn rearm(&mut self, period: Duration) -> bool {
        if period == self.period {
            return false;
        }
        tracing::debug!(?period, "clock re-armed");
        self.interval = Self::arm(period);
        self.period = period;
        true
    }

    /// Start the current period over, discarding any pending tick
    pub fn restart(&mut self) {
        self.interval = Self::arm(self.period);
    }

    pub async fn tick(&mut self) {
        self.interval.tick().await;
    }
}
