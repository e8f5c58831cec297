// tests/support/mocks/time.rs
use chrono::{DateTime, Duration, Utc};
use folio_core::application::ports::time::Clock;
use once_cell::sync::Lazy;
use std::sync::Mutex;

static FIXED_NOW: Lazy<DateTime<Utc>> = Lazy::new(|| {
    DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z")
        .expect("invalid RFC3339 in tests/support/mocks/time.rs")
        .with_timezone(&Utc)
});

/// Deterministic timestamp shared by the test doubles.
pub fn fixed_now() -> DateTime<Utc> {
    *FIXED_NOW
}

/// Always returns the same instant.
#[derive(Clone, Debug, Default)]
pub struct FixedClock;

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        fixed_now()
    }
}

/// Moves forward by `step` on every reading.
#[derive(Debug)]
pub struct SteppingClock {
    current: Mutex<DateTime<Utc>>,
    step: Duration,
}

impl SteppingClock {
    pub fn new(step: Duration) -> Self {
        Self {
            current: Mutex::new(fixed_now()),
            step,
        }
    }
}

impl Default for SteppingClock {
    fn default() -> Self {
        Self::new(Duration::seconds(1))
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> DateTime<Utc> {
        let mut current = self.current.lock().unwrap();
        *current += self.step;
        *current
    }
}
