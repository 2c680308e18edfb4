//! Controllable clock for expiry tests
//!
//! ```
//! # #[cfg(feature = "test-utils")]
//! # {
//! use std::time::Duration;
//!
//! use apigee_common::testing::MockClock;
//! use apigee_common::Clock;
//!
//! let clock = MockClock::at(1_700_000_000);
//! clock.advance(Duration::from_secs(90));
//! assert_eq!(clock.unix_timestamp(), 1_700_000_090);
//! # }
//! ```

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use parking_lot::Mutex;

use crate::time::Clock;

/// Clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone)]
pub struct MockClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl Default for MockClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MockClock {
    /// Frozen at the current wall time.
    #[must_use]
    pub fn new() -> Self {
        Self { now: Arc::new(Mutex::new(Utc::now())) }
    }

    /// Frozen at `unix_secs`.
    #[must_use]
    pub fn at(unix_secs: i64) -> Self {
        let start = DateTime::from_timestamp(unix_secs, 0).unwrap_or_default();
        Self { now: Arc::new(Mutex::new(start)) }
    }

    pub fn advance(&self, by: Duration) {
        let delta = TimeDelta::from_std(by).unwrap_or(TimeDelta::MAX);
        let mut now = self.now.lock();
        *now = now.checked_add_signed(delta).unwrap_or(DateTime::<Utc>::MAX_UTC);
    }
}

impl Clock for MockClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock()
    }
}
