//! Time source for record timestamps.

use chrono::Utc;

/// Supplies the current time as Unix epoch milliseconds.
pub trait Clock {
    fn now_ms(&self) -> i64;
}

/// Wall clock in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> i64 {
        (**self).now_ms()
    }
}
