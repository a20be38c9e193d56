//! Token-bucket admission control for provider calls.
//!
//! Every gateway call takes one token before it is sent. The bucket starts
//! full, refills continuously, and never lends tokens it does not have, so a
//! burst of `capacity` calls goes out immediately and the rest are spaced at
//! the refill rate.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::{Instant, sleep};
use tracing::trace;

/// Default bucket capacity.
pub const DEFAULT_CAPACITY: u32 = 5;

/// Default refill rate in tokens per second.
pub const DEFAULT_REFILL_PER_SECOND: f64 = 5.0;

// ============================================================================
// Rate Limit Config
// ============================================================================

/// Token bucket parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Maximum tokens held (burst size).
    pub capacity: u32,
    /// Tokens added per second.
    pub refill_per_second: f64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            refill_per_second: DEFAULT_REFILL_PER_SECOND,
        }
    }
}

// ============================================================================
// Token Bucket
// ============================================================================

#[derive(Debug)]
struct BucketState {
    tokens: f64,
    last_refill: Instant,
}

/// A continuously refilling token bucket.
#[derive(Debug)]
pub struct TokenBucket {
    capacity: f64,
    refill_per_ms: f64,
    state: Mutex<BucketState>,
}

impl TokenBucket {
    /// Creates a full bucket.
    ///
    /// Capacity is clamped to at least one token and the refill rate to a
    /// small positive value so `acquire` always terminates.
    pub fn new(config: RateLimitConfig) -> Self {
        let capacity = f64::from(config.capacity.max(1));
        let refill_per_second = if config.refill_per_second.is_finite() {
            config.refill_per_second.max(0.001)
        } else {
            DEFAULT_REFILL_PER_SECOND
        };

        Self {
            capacity,
            refill_per_ms: refill_per_second / 1000.0,
            state: Mutex::new(BucketState {
                tokens: capacity,
                last_refill: Instant::now(),
            }),
        }
    }

    /// Takes one token, waiting until one is available.
    pub async fn acquire(&self) {
        loop {
            match self.try_acquire() {
                Ok(()) => return,
                Err(wait) => {
                    trace!(wait_ms = wait.as_millis(), "Waiting for rate limit token");
                    sleep(wait).await;
                }
            }
        }
    }

    /// Takes one token if available, otherwise returns how long until one is.
    pub fn try_acquire(&self) -> Result<(), Duration> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        self.refill(&mut state, Instant::now());

        if state.tokens >= 1.0 {
            state.tokens -= 1.0;
            Ok(())
        } else {
            let missing_ms = (1.0 - state.tokens) / self.refill_per_ms;
            Err(Duration::from_secs_f64(missing_ms / 1000.0))
        }
    }

    /// Tokens currently available (after refilling).
    pub fn available(&self) -> f64 {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        self.refill(&mut state, Instant::now());
        state.tokens
    }

    /// Bucket capacity.
    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    fn refill(&self, state: &mut BucketState, now: Instant) {
        let elapsed_ms = now.saturating_duration_since(state.last_refill).as_secs_f64() * 1000.0;
        state.tokens = (state.tokens + elapsed_ms * self.refill_per_ms).min(self.capacity);
        state.last_refill = now;
    }
}

impl Default for TokenBucket {
    fn default() -> Self {
        Self::new(RateLimitConfig::default())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use futures::future::join_all;

    #[tokio::test(start_paused = true)]
    async fn test_burst_then_spaced() {
        let start = Instant::now();
        let bucket = TokenBucket::new(RateLimitConfig {
            capacity: 5,
            refill_per_second: 5.0,
        });

        let waits = (0..8).map(|_| async {
            bucket.acquire().await;
            assert!(bucket.available() >= 0.0);
            start.elapsed()
        });
        let mut finished = join_all(waits).await;
        finished.sort();

        for elapsed in &finished[..5] {
            assert_eq!(*elapsed, Duration::ZERO, "burst took {elapsed:?}");
        }
        // One token per 200ms after the burst, give or take timer rounding.
        for (n, elapsed) in (1..=3u64).zip(&finished[5..]) {
            let due = Duration::from_millis(200 * n);
            assert!(*elapsed >= due - Duration::from_millis(1), "late call {n} at {elapsed:?}");
            assert!(*elapsed < due + Duration::from_millis(10), "late call {n} at {elapsed:?}");
        }
    }

    #[test]
    fn test_try_acquire_reports_wait() {
        let bucket = TokenBucket::new(RateLimitConfig {
            capacity: 1,
            refill_per_second: 2.0,
        });
        assert!(bucket.try_acquire().is_ok());
        let wait = bucket.try_acquire().expect_err("bucket is empty");
        assert!(wait <= Duration::from_millis(500));
        assert!(wait > Duration::from_millis(400));
    }

    #[tokio::test(start_paused = true)]
    async fn test_never_exceeds_capacity() {
        let bucket = TokenBucket::new(RateLimitConfig {
            capacity: 3,
            refill_per_second: 1000.0,
        });
        tokio::time::advance(Duration::from_secs(5)).await;
        assert!((bucket.available() - 3.0).abs() < f64::EPSILON);

        for _ in 0..3 {
            assert!(bucket.try_acquire().is_ok());
        }
        assert!(bucket.try_acquire().is_err());

        tokio::time::advance(Duration::from_secs(1)).await;
        assert!((bucket.available() - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_degenerate_config_is_clamped() {
        let bucket = TokenBucket::new(RateLimitConfig {
            capacity: 0,
            refill_per_second: 0.0,
        });
        assert!((bucket.capacity() - 1.0).abs() < f64::EPSILON);
        assert!(bucket.try_acquire().is_ok());
        assert!(bucket.try_acquire().is_err());
    }
}
