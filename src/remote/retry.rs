//! Retry with exponential backoff, and request throttling.
use std::thread;
use std::time::{Duration, Instant};

use log::warn;

use crate::error::Error;

/// Result of a single attempt.
pub enum Attempt<T> {
    Done(T),
    /// Transient failure, worth another try.
    Retry(Error),
    /// Permanent failure, stop there.
    Fail(Error),
}

/// Upper bound of a single retry delay.
pub const MAX_RETRY_DELAY: Duration = Duration::from_secs(300);

/// Bounded retry loop. The delay before retry `n` (0-based) is `initial_delay * multiplier^n`,
/// capped at [MAX_RETRY_DELAY].
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub multiplier: f64,
}

impl Default for RetryPolicy {
    /// A single attempt.
    fn default() -> Self {
        Self {
            max_attempts: 1,
            initial_delay: Duration::from_secs(1),
            multiplier: 2.0,
        }
    }
}

impl RetryPolicy {
    /// Delay to wait after the failed attempt number `attempt` (0-based).
    pub fn delay(&self, attempt: u32) -> Duration {
        if self.initial_delay.is_zero() {
            return Duration::ZERO;
        }
        let factor = self.multiplier.max(1.0).powf(f64::from(attempt));
        if self.initial_delay.as_secs_f64() * factor < MAX_RETRY_DELAY.as_secs_f64() {
            self.initial_delay.mul_f64(factor)
        } else {
            MAX_RETRY_DELAY
        }
    }

    /// Run `op` until it succeeds, fails permanently or attempts are exhausted.
    ///
    /// At least one attempt is always made.
    pub fn run<T, F>(&self, mut op: F) -> Result<T, Error>
    where
        F: FnMut() -> Attempt<T>,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 0;
        loop {
            match op() {
                Attempt::Done(value) => return Ok(value),
                Attempt::Fail(e) => return Err(e),
                Attempt::Retry(e) => {
                    if attempt + 1 >= max_attempts {
                        return Err(e);
                    }
                    let delay = self.delay(attempt);
                    warn!(
                        "attempt {}/{} failed ({}), retrying in {:?}",
                        attempt + 1,
                        max_attempts,
                        e,
                        delay
                    );
                    thread::sleep(delay);
                    attempt += 1;
                }
            }
        }
    }
}

/// Enforces a minimum delay between two consecutive calls to [Throttle::wait].
///
/// The first call never waits.
#[derive(Debug)]
pub struct Throttle {
    interval: Duration,
    last: Option<Instant>,
}

impl Throttle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// Sleep for what remains of the interval since the previous call.
    pub fn wait(&mut self) {
        if let Some(last) = self.last {
            let elapsed = last.elapsed();
            if elapsed < self.interval {
                thread::sleep(self.interval - elapsed);
            }
        }
        self.last = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            initial_delay: Duration::from_millis(1),
            multiplier: 2.0,
        }
    }

    #[test]
    fn delays_grow() {
        let p = RetryPolicy {
            max_attempts: 4,
            initial_delay: Duration::from_millis(100),
            multiplier: 3.0,
        };
        assert_eq!(p.delay(0), Duration::from_millis(100));
        assert_eq!(p.delay(1), Duration::from_millis(300));
        assert_eq!(p.delay(2), Duration::from_millis(900));
    }

    #[test]
    fn delays_are_capped() {
        let p = RetryPolicy {
            max_attempts: u32::MAX,
            ..Default::default()
        };
        assert_eq!(p.delay(8), Duration::from_secs(256));
        assert_eq!(p.delay(9), MAX_RETRY_DELAY);
        assert_eq!(p.delay(u32::MAX), MAX_RETRY_DELAY);

        let huge = RetryPolicy {
            initial_delay: Duration::from_secs(u64::MAX),
            ..Default::default()
        };
        assert_eq!(huge.delay(0), MAX_RETRY_DELAY);

        let immediate = RetryPolicy {
            initial_delay: Duration::ZERO,
            ..Default::default()
        };
        assert_eq!(immediate.delay(1000), Duration::ZERO);
    }

    #[test]
    fn succeeds_after_transient_failures() {
        let mut calls = 0;
        let result = policy(3).run(|| {
            calls += 1;
            if calls < 3 {
                Attempt::Retry(Error::Custom("flaky".to_string()))
            } else {
                Attempt::Done(calls)
            }
        });
        assert_eq!(result.unwrap(), 3);
    }

    #[test]
    fn gives_up() {
        let mut calls = 0;
        let result: Result<(), Error> = policy(2).run(|| {
            calls += 1;
            Attempt::Retry(Error::Custom("down".to_string()))
        });
        assert!(result.is_err());
        assert_eq!(calls, 2);
    }

    #[test]
    fn permanent_failure_stops() {
        let mut calls = 0;
        let result: Result<(), Error> = policy(5).run(|| {
            calls += 1;
            Attempt::Fail(Error::Custom("bad request".to_string()))
        });
        assert!(result.is_err());
        assert_eq!(calls, 1);
    }

    #[test]
    fn single_attempt_by_default() {
        let mut calls = 0;
        let result: Result<(), Error> = RetryPolicy::default().run(|| {
            calls += 1;
            Attempt::Retry(Error::Custom("down".to_string()))
        });
        assert!(result.is_err());
        assert_eq!(calls, 1);
    }

    #[test]
    fn throttle_spacing() {
        let mut throttle = Throttle::new(Duration::from_millis(30));
        let start = Instant::now();
        throttle.wait();
        assert!(start.elapsed() < Duration::from_millis(30));
        throttle.wait();
        assert!(start.elapsed() >= Duration::from_millis(30));
    }
}
