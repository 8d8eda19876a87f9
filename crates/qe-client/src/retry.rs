//! Retry policy with exponential backoff and jitter.

use rand::Rng;
use std::time::Duration;

/// Configuration for retry behavior.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts.
    pub max_attempts: u32,
    /// Initial delay before first retry.
    pub initial_delay: Duration,
    /// Maximum delay between retries.
    pub max_delay: Duration,
    /// Backoff strategy to use.
    pub backoff: BackoffStrategy,
    /// Maximum time to wait from a Retry-After header.
    pub max_retry_after: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(30),
            backoff: BackoffStrategy::ExponentialWithJitter { factor: 2.0 },
            max_retry_after: Duration::from_secs(60),
        }
    }
}

impl RetryConfig {
    /// Set the maximum number of retry attempts.
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// Set the delay before the first retry.
    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Set the backoff strategy.
    pub fn with_backoff(mut self, backoff: BackoffStrategy) -> Self {
        self.backoff = backoff;
        self
    }

    /// Disable retries.
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 0,
            ..Default::default()
        }
    }
}

/// Backoff strategy for determining retry delays.
#[derive(Debug, Clone, Copy)]
pub enum BackoffStrategy {
    /// Constant delay between retries.
    Constant,
    /// Exponential increase in delay (delay * factor^attempt).
    Exponential { factor: f64 },
    /// Exponential with random jitter.
    ExponentialWithJitter { factor: f64 },
}

impl BackoffStrategy {
    /// Calculate the delay for a given attempt number (0-indexed).
    pub fn delay(&self, attempt: u32, initial_delay: Duration, max_delay: Duration) -> Duration {
        let delay = match self {
            BackoffStrategy::Constant => initial_delay,
            BackoffStrategy::Exponential { factor } => {
                Duration::from_secs_f64(initial_delay.as_secs_f64() * factor.powi(attempt as i32))
            }
            BackoffStrategy::ExponentialWithJitter { factor } => {
                let base = initial_delay.as_secs_f64() * factor.powi(attempt as i32);
                let jitter = rand::rng().random::<f64>() * base;
                Duration::from_secs_f64(base + jitter)
            }
        };

        std::cmp::min(delay, max_delay)
    }
}

/// Tracks attempts of a single request and hands out retry delays.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    config: RetryConfig,
    attempt: u32,
}

impl RetryPolicy {
    /// Create a new retry policy from config.
    pub fn new(config: RetryConfig) -> Self {
        Self { config, attempt: 0 }
    }

    /// Returns the number of retries handed out so far.
    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    /// Returns true if another retry is allowed.
    pub fn should_retry(&self) -> bool {
        self.attempt < self.config.max_attempts
    }

    /// Record an attempt and return the delay before the next retry.
    /// Returns None once retries are exhausted.
    pub fn next_delay(&mut self, retry_after: Option<Duration>) -> Option<Duration> {
        if !self.should_retry() {
            return None;
        }

        let delay = match retry_after {
            Some(retry_after) => std::cmp::min(retry_after, self.config.max_retry_after),
            None => self.config.backoff.delay(
                self.attempt,
                self.config.initial_delay,
                self.config.max_delay,
            ),
        };

        self.attempt += 1;
        Some(delay)
    }
}
