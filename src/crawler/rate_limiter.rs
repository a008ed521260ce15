//! Per-host request throttling
//!
//! Backed by a keyed GCRA limiter with a burst of one: each host key gets
//! its first request immediately and every later one a full interval after
//! the previous grant. Keys are independent, so a slow host never delays
//! another.

use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};
use std::num::NonZeroU32;
use std::time::Duration;

/// Lowest accepted rate (requests per second)
const MIN_RATE: f64 = 0.001;

/// Minimum-interval throttle keyed by host
pub struct HostRateLimiter {
    interval: Duration,
    limiter: DefaultKeyedRateLimiter<String>,
}

impl HostRateLimiter {
    /// Creates a limiter allowing `rate` requests per second to each host
    ///
    /// Rates at or below zero are clamped to 0.001 req/s.
    pub fn new(rate: f64) -> Self {
        let rate = if rate.is_finite() && rate > MIN_RATE {
            rate
        } else {
            MIN_RATE
        };
        let interval = Duration::from_secs_f64(1.0 / rate);

        // governor rejects a zero period
        let quota = Quota::with_period(interval.max(Duration::from_nanos(1)))
            .unwrap_or_else(|| Quota::per_second(NonZeroU32::MIN))
            .allow_burst(NonZeroU32::MIN);

        Self {
            interval,
            limiter: RateLimiter::keyed(quota),
        }
    }

    /// Minimum spacing between grants for one host
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Waits until a request to `key` is allowed and consumes the grant
    pub async fn acquire(&self, key: &str) {
        let key = key.to_string();
        if self.limiter.check_key(&key).is_err() {
            tracing::trace!("Throttling {}", key);
            self.limiter.until_key_ready(&key).await;
        }
    }

    /// Number of hosts seen so far
    pub fn host_count(&self) -> usize {
        self.limiter.len()
    }
}
