/// Idle-time scheduling for background status work

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::Instant;

/// Longest idle period a host hands out in one callback
pub const IDLE_PERIOD: Duration = Duration::from_millis(50);

/// Which event source delivers idle ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IdleSource {
    /// First tick as soon as the loop is idle, each tick carries a deadline
    #[default]
    IdleCallback,
    /// Plain timer: every tick, including the first, waits one interval
    Timer,
}

impl IdleSource {
    /// Delay before the first tick for a given repeat interval
    pub fn first_delay(&self, interval: Duration) -> Duration {
        match self {
            IdleSource::IdleCallback => Duration::ZERO,
            IdleSource::Timer => interval,
        }
    }

    /// Deadline handed to a tick fired now, if this source provides one
    pub fn deadline(&self) -> Option<IdleDeadline> {
        match self {
            IdleSource::IdleCallback => Some(IdleDeadline::new(IDLE_PERIOD)),
            IdleSource::Timer => None,
        }
    }
}

/// Time budget of one idle callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdleDeadline {
    expires_at: Instant,
}

impl IdleDeadline {
    pub fn new(budget: Duration) -> Self {
        Self {
            expires_at: Instant::now() + budget,
        }
    }

    pub fn time_remaining(&self) -> Duration {
        self.expires_at.saturating_duration_since(Instant::now())
    }

    pub fn did_timeout(&self) -> bool {
        self.time_remaining().is_zero()
    }
}
