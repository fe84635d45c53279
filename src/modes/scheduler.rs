//! The single periodic timer that drives `GameEngine::step`.

use std::time::Duration;

use tokio::time::{interval_at, sleep_until, Instant, Interval, MissedTickBehavior};

/// Wraps at most one tokio [`Interval`].
///
/// Arming always drops the previous interval first, and the first tick of a
/// freshly armed timer lands one full period later, so changing the period
/// resets the phase.
#[derive(Debug, Default)]
pub struct TickScheduler {
    timer: Option<Interval>,
}

impl TickScheduler {
    pub fn new() -> Self {
        Self { timer: None }
    }

    pub fn arm(&mut self, period: Duration) {
        self.cancel();
        let mut timer = interval_at(Instant::now() + period, period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.timer = Some(timer);
    }

    pub fn cancel(&mut self) {
        self.timer = None;
    }

    pub fn is_armed(&self) -> bool {
        self.timer.is_some()
    }

    pub fn period(&self) -> Option<Duration> {
        self.timer.as_ref().map(Interval::period)
    }

    /// Resolves on the next tick; never resolves while disarmed
    pub async fn tick(&mut self) {
        match self.timer.as_mut() {
            Some(timer) => {
                timer.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}

/// Sleep until `deadline`, or forever when there is none
pub async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending::<()>().await,
    }
}
