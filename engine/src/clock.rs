use std::time::Duration;

use chrono::Utc;

/// Wall-clock source. Swapped out in tests.
pub trait Clock: Send + Sync {
    fn now_ms(&self) -> i64;

    fn now_unix(&self) -> i64 {
        self.now_ms().div_euclid(1000)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Time left until the next wall-clock multiple of `interval`.
///
/// Sleeping for this instead of a flat `interval` keeps wake-ups on the
/// boundary however long the cycle took. Exactly on a boundary, a full
/// interval is returned.
pub fn until_next_tick(now_ms: i64, interval: Duration) -> Duration {
    let interval_ms = interval.as_millis() as i64;
    if interval_ms <= 0 {
        return Duration::ZERO;
    }
    let rem = now_ms.rem_euclid(interval_ms);
    Duration::from_millis((interval_ms - rem) as u64)
}
