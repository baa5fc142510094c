//! Retry with backoff for readiness checks against external dependencies.
//!
//! ```rust,ignore
//! use raffle_api::shared::retry::{retry_with_backoff, RetryPolicy};
//! use std::time::Duration;
//!
//! let policy = RetryPolicy::linear(5, Duration::from_secs(2));
//! retry_with_backoff(&policy, "database", || probe.ping()).await?;
//! ```

use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;

/// How the delay grows between attempts.
#[derive(Debug, Clone, PartialEq)]
pub enum Backoff {
    /// `base * attempt`: 2s, 4s, 6s, ...
    Linear { base: Duration },
    /// `initial * multiplier^(attempt - 1)`, capped at `max_delay`.
    Exponential {
        initial: Duration,
        multiplier: f64,
        max_delay: Duration,
    },
}

/// Bounded retry configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first one
    pub max_attempts: u32,
    pub backoff: Backoff,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::linear(5, Duration::from_secs(2))
    }
}

impl RetryPolicy {
    pub fn linear(max_attempts: u32, base: Duration) -> Self {
        Self {
            max_attempts,
            backoff: Backoff::Linear { base },
        }
    }

    pub fn exponential(max_attempts: u32, initial: Duration, multiplier: f64, max_delay: Duration) -> Self {
        Self {
            max_attempts,
            backoff: Backoff::Exponential {
                initial,
                multiplier,
                max_delay,
            },
        }
    }

    /// Delay to wait after the given failed attempt (1-based).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let attempt = attempt.max(1);
        match &self.backoff {
            Backoff::Linear { base } => base.saturating_mul(attempt),
            Backoff::Exponential {
                initial,
                multiplier,
                max_delay,
            } => {
                let millis = initial.as_millis() as f64 * multiplier.powi(attempt as i32 - 1);
                if !millis.is_finite() || millis >= max_delay.as_millis() as f64 {
                    *max_delay
                } else {
                    Duration::from_millis(millis as u64)
                }
            }
        }
    }
}

/// Run `operation` until it succeeds or the policy's attempts are spent.
///
/// Sleeps between attempts, never after the last one. Returns the last error
/// when every attempt failed. A policy with zero attempts still runs once.
pub async fn retry_with_backoff<F, Fut, T, E>(
    policy: &RetryPolicy,
    label: &str,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        match operation().await {
            Ok(value) => {
                if attempt > 1 {
                    tracing::info!(target_name = label, attempt, "Succeeded after retry");
                }
                return Ok(value);
            }
            Err(err) if attempt >= max_attempts => {
                tracing::error!(
                    target_name = label,
                    attempt,
                    error = %err,
                    "All attempts failed"
                );
                return Err(err);
            }
            Err(err) => {
                let delay = policy.delay_for_attempt(attempt);
                tracing::warn!(
                    target_name = label,
                    attempt,
                    max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "Attempt failed, retrying"
                );
                sleep(delay).await;
                attempt += 1;
            }
        }
    }
}
