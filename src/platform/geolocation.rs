/// One-shot geolocation requests

use std::sync::Mutex;
use std::time::Duration;

use futures::future::{BoxFuture, FutureExt};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub lat: f64,
    pub lng: f64,
    pub accuracy_meters: f64,
}

/// Why a location request produced no position
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocationError {
    #[error("Geolocation is not supported")]
    Unsupported,

    #[error("User denied Geolocation")]
    PermissionDenied,

    #[error("Position unavailable")]
    PositionUnavailable,

    #[error("Timeout expired")]
    Timeout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionOptions {
    pub enable_high_accuracy: bool,
    pub timeout: Duration,
    /// Accept a cached position up to this old
    pub maximum_age: Duration,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            enable_high_accuracy: true,
            timeout: Duration::from_millis(10_000),
            maximum_age: Duration::from_millis(300_000),
        }
    }
}

pub trait GeolocationProvider: Send + Sync {
    /// Resolve the current position once. Callers enforce `options.timeout`.
    fn current_position(&self, options: PositionOptions) -> BoxFuture<'static, Result<Position, LocationError>>;
}

/// Provider that answers every request with a preset outcome after `delay`
pub struct EmulatedGeolocation {
    outcome: Mutex<Result<Position, LocationError>>,
    delay: Duration,
}

impl EmulatedGeolocation {
    pub fn new(outcome: Result<Position, LocationError>) -> Self {
        Self {
            outcome: Mutex::new(outcome),
            delay: Duration::ZERO,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Change what later requests resolve to
    pub fn set_outcome(&self, outcome: Result<Position, LocationError>) {
        let mut g = self.outcome.lock().unwrap_or_else(|e| e.into_inner());
        *g = outcome;
    }
}

impl GeolocationProvider for EmulatedGeolocation {
    fn current_position(&self, _options: PositionOptions) -> BoxFuture<'static, Result<Position, LocationError>> {
        let outcome = self.outcome.lock().unwrap_or_else(|e| e.into_inner()).clone();
        let delay = self.delay;
        async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            outcome
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_match_browser_request() {
        let o = PositionOptions::default();
        assert!(o.enable_high_accuracy);
        assert_eq!(o.timeout, Duration::from_secs(10));
        assert_eq!(o.maximum_age, Duration::from_secs(300));
    }

    #[tokio::test]
    async fn emulated_provider_returns_current_outcome() {
        let pos = Position { lat: 28.4744, lng: 77.504, accuracy_meters: 12.0 };
        let g = EmulatedGeolocation::new(Ok(pos));
        assert_eq!(g.current_position(PositionOptions::default()).await, Ok(pos));

        g.set_outcome(Err(LocationError::PermissionDenied));
        assert_eq!(
            g.current_position(PositionOptions::default()).await,
            Err(LocationError::PermissionDenied)
        );
    }
}
