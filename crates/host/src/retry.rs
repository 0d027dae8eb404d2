use std::{fmt::Display, future::Future, time::Duration};

/// The delay curve between two attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backoff {
    /// Waits `step`, then `2 * step`, `3 * step`...
    Linear { step: Duration },
    /// Waits `base`, then doubles the delay up to `max`.
    Exponential { base: Duration, max: Duration },
}

impl Backoff {
    /// The delay following the `attempt`-th failure, starting at 1.
    pub fn delay(&self, attempt: u32) -> Duration {
        let attempt = attempt.max(1);
        match *self {
            Self::Linear { step } => step.saturating_mul(attempt),
            Self::Exponential { base, max } => {
                base.saturating_mul(1 << (attempt - 1).min(16)).min(max.max(base))
            }
        }
    }
}

/// How many times a call is attempted, and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of attempts. The call is always attempted at least once.
    pub max_attempts: u32,
    pub backoff: Backoff,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, backoff: Backoff) -> Self {
        Self { max_attempts, backoff }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_attempts: 3, backoff: Backoff::Linear { step: Duration::from_secs(1) } }
    }
}

/// Runs `op` until it succeeds or `policy.max_attempts` attempts have failed, sleeping
/// according to `policy.backoff` in between.
///
/// Returns the error of the last attempt, leaving the fallback to the caller.
pub async fn retry<T, E, F, Fut>(policy: &RetryPolicy, mut op: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let mut attempt = 0;

    loop {
        attempt += 1;

        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if attempt >= policy.max_attempts => return Err(err),
            Err(err) => {
                let delay = policy.backoff.delay(attempt);
                tracing::warn!(
                    attempt,
                    max_attempts = policy.max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "Attempt failed, retrying"
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicU32, Ordering},
        Mutex,
    };

    use tokio::time::Instant;

    use super::*;

    fn immediate(max_attempts: u32) -> RetryPolicy {
        RetryPolicy::new(max_attempts, Backoff::Linear { step: Duration::ZERO })
    }

    #[test]
    fn linear_backoff_grows_by_step() {
        let backoff = Backoff::Linear { step: Duration::from_secs(1) };

        let delays = (1..=3).map(|a| backoff.delay(a).as_secs()).collect::<Vec<_>>();

        assert_eq!(delays, [1, 2, 3]);
    }

    #[test]
    fn exponential_backoff_is_capped() {
        let backoff =
            Backoff::Exponential { base: Duration::from_millis(100), max: Duration::from_secs(1) };

        let delays = (1..=6).map(|a| backoff.delay(a).as_millis()).collect::<Vec<_>>();

        assert_eq!(delays, [100, 200, 400, 800, 1000, 1000]);
        assert_eq!(backoff.delay(u32::MAX), Duration::from_secs(1));
    }

    #[tokio::test]
    async fn returns_first_success() {
        let calls = AtomicU32::new(0);

        let result = retry(&immediate(3), || async {
            match calls.fetch_add(1, Ordering::SeqCst) {
                0 | 1 => Err("flaky"),
                n => Ok(n),
            }
        })
        .await;

        assert_eq!(result, Ok(2));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn gives_up_after_max_attempts() {
        let calls = AtomicU32::new(0);

        let result: Result<(), String> = retry(&immediate(3), || async {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            Err(format!("failure {n}"))
        })
        .await;

        assert_eq!(result, Err("failure 2".to_string()));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn waits_between_attempts_only() {
        let start = Instant::now();
        let attempts = Mutex::new(Vec::new());

        let result: Result<(), &str> = retry(&RetryPolicy::default(), || async {
            attempts.lock().unwrap().push(start.elapsed());
            Err("down")
        })
        .await;

        assert!(result.is_err());
        assert_eq!(
            attempts.into_inner().unwrap(),
            [Duration::ZERO, Duration::from_secs(1), Duration::from_secs(3)]
        );
        assert_eq!(start.elapsed(), Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn exponential_delays_are_waited() {
        let policy = RetryPolicy::new(
            4,
            Backoff::Exponential { base: Duration::from_millis(100), max: Duration::from_secs(1) },
        );
        let start = Instant::now();

        let result: Result<(), &str> = retry(&policy, || async { Err("down") }).await;

        assert!(result.is_err());
        assert_eq!(start.elapsed(), Duration::from_millis(700));
    }

    #[tokio::test]
    async fn attempts_at_least_once() {
        let calls = AtomicU32::new(0);

        let result: Result<(), &str> = retry(&immediate(0), || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err("down")
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
