//! Client-side request throttling for the GitHub API.
//!
//! GitHub tolerates no more than 30 requests within a rolling window of
//! roughly 35 seconds. [`RequestThrottle`] keeps the timestamps of recent
//! requests and pauses the caller for a fixed cooldown once the window fills.
//!
//! The check is deliberately approximate: only the oldest of `threshold`
//! entries is evaluated and nothing is re-checked after sleeping, so a burst
//! of between `threshold + 1` and `2 * threshold` requests can still exceed
//! the nominal rate inside one window.

use crate::config::ThrottleConfig;
use crate::errors::GitHubResult;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::{sleep, Instant};

/// Sliding-window limiter shared by every dispatcher that should share a limit.
#[derive(Debug)]
pub struct RequestThrottle {
    config: ThrottleConfig,
    /// Request timestamps in arrival order.
    history: Mutex<VecDeque<Instant>>,
    /// Number of admissions that had to cool down.
    cooldowns: AtomicU64,
}

impl Default for RequestThrottle {
    fn default() -> Self {
        Self::with_config(ThrottleConfig::default())
    }
}

impl RequestThrottle {
    /// Creates a throttle with validated configuration.
    pub fn new(config: ThrottleConfig) -> GitHubResult<Self> {
        config.validate()?;
        Ok(Self::with_config(config))
    }

    fn with_config(config: ThrottleConfig) -> Self {
        Self {
            history: Mutex::new(VecDeque::with_capacity(config.threshold)),
            config,
            cooldowns: AtomicU64::new(0),
        }
    }

    /// Gets the configuration.
    pub fn config(&self) -> &ThrottleConfig {
        &self.config
    }

    /// Records a request and pauses the caller if the window is full.
    ///
    /// The record lock is released before sleeping, so only the calling
    /// task is delayed.
    pub async fn admit(&self) {
        if let Some(delay) = self.record() {
            self.cooldowns.fetch_add(1, Ordering::Relaxed);
            tracing::warn!(
                threshold = self.config.threshold,
                window_secs = self.config.window.as_secs(),
                delay_ms = delay.as_millis() as u64,
                "Request burst threshold reached, cooling down"
            );
            sleep(delay).await;
        }
    }

    /// Appends now to the record; returns the cooldown to apply, if any.
    fn record(&self) -> Option<Duration> {
        let mut history = self.history();
        let now = Instant::now();
        history.push_back(now);

        if history.len() < self.config.threshold {
            return None;
        }

        let oldest = history.pop_front()?;
        if now.duration_since(oldest) <= self.config.window {
            Some(self.config.cooldown)
        } else {
            None
        }
    }

    /// Number of timestamps currently recorded.
    pub fn len(&self) -> usize {
        self.history().len()
    }

    /// Returns true if no request has been recorded.
    pub fn is_empty(&self) -> bool {
        self.history().is_empty()
    }

    /// Number of admissions that were delayed.
    pub fn cooldowns(&self) -> u64 {
        self.cooldowns.load(Ordering::Relaxed)
    }

    /// Forgets every recorded request.
    pub fn reset(&self) {
        self.history().clear();
        self.cooldowns.store(0, Ordering::Relaxed);
    }

    fn history(&self) -> MutexGuard<'_, VecDeque<Instant>> {
        self.history.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
