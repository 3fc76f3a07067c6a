//! Sliding-window admission control.

use parking_lot::Mutex;
use std::collections::VecDeque;
use std::time::Duration;
use tokio::time::{sleep, timeout, Instant};
use tracing::{debug, trace};

use crate::error::{DocgateError, Result};

/// Admission control over a rolling time window.
///
/// At most `limit` admissions are granted within any trailing interval of
/// `window`. Callers that would exceed the cap suspend in [`acquire`] until
/// the oldest admission leaves the window, then re-compete for the slot.
///
/// The limiter is thread-safe and can be shared across tasks behind an `Arc`.
///
/// [`acquire`]: SlidingWindowLimiter::acquire
pub struct SlidingWindowLimiter {
    /// Length of the trailing window
    window: Duration,
    /// Maximum admissions within the window
    limit: usize,
    /// Timestamps of admissions still inside the window, oldest first.
    /// The lock is held only for the prune/check/append step, never
    /// across a sleep.
    admissions: Mutex<VecDeque<Instant>>,
}

impl SlidingWindowLimiter {
    /// Create a new limiter allowing `limit` admissions per `window`.
    ///
    /// Returns a configuration error if the window or the limit is zero.
    pub fn new(window: Duration, limit: usize) -> Result<Self> {
        if window.is_zero() {
            return Err(DocgateError::Config(
                "window duration must be positive".to_string(),
            ));
        }
        if limit == 0 {
            return Err(DocgateError::Config(
                "request limit must be greater than 0".to_string(),
            ));
        }

        debug!(window_ms = window.as_millis() as u64, limit, "Creating sliding window limiter");

        Ok(Self {
            window,
            limit,
            admissions: Mutex::new(VecDeque::with_capacity(limit)),
        })
    }

    /// Get the window duration.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Get the admission limit per window.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Wait until an admission slot is available, then claim it.
    ///
    /// Returns immediately when fewer than `limit` admissions fall inside the
    /// trailing window. Otherwise the caller sleeps until the oldest admission
    /// is due to expire and then re-checks from scratch: a woken caller never
    /// assumes it owns a slot, since others may have been admitted in the
    /// meantime.
    ///
    /// Cancel-safe: dropping the returned future before completion leaves the
    /// admission log untouched. The log is only mutated synchronously under
    /// the lock, never across an await point.
    pub async fn acquire(&self) {
        loop {
            match self.try_admit() {
                Ok(()) => return,
                // Head already stale, re-check without sleeping
                Err(wait_for) if wait_for.is_zero() => continue,
                Err(wait_for) => {
                    trace!(
                        wait_ms = wait_for.as_millis() as u64,
                        "Window saturated, waiting for a slot"
                    );
                    sleep(wait_for).await;
                }
            }
        }
    }

    /// Like [`acquire`], but give up after `deadline`.
    ///
    /// Returns [`DocgateError::Cancelled`] if no slot became available in
    /// time. A cancelled wait consumes no slot.
    ///
    /// [`acquire`]: SlidingWindowLimiter::acquire
    pub async fn acquire_timeout(&self, deadline: Duration) -> Result<()> {
        timeout(deadline, self.acquire())
            .await
            .map_err(|_| DocgateError::Cancelled)
    }

    /// Number of admissions currently inside the trailing window.
    pub fn admitted_in_window(&self) -> usize {
        let mut admissions = self.admissions.lock();
        Self::prune(&mut admissions, Instant::now(), self.window);
        admissions.len()
    }

    /// Single atomic prune/check/append step.
    ///
    /// On success the admission is recorded. On failure returns how long the
    /// caller should wait before the oldest admission leaves the window.
    fn try_admit(&self) -> std::result::Result<(), Duration> {
        let mut admissions = self.admissions.lock();
        let now = Instant::now();

        Self::prune(&mut admissions, now, self.window);

        if admissions.len() < self.limit {
            admissions.push_back(now);
            trace!(in_window = admissions.len(), "Admission granted");
            return Ok(());
        }

        let oldest = match admissions.front() {
            Some(&t) => t,
            // Unreachable: len >= limit >= 1 at this point
            None => return Err(Duration::ZERO),
        };

        Err(self.window.saturating_sub(now.duration_since(oldest)))
    }

    /// Drop admissions that have left the trailing window.
    ///
    /// Entries are chronological, so pruning only ever removes from the front.
    fn prune(admissions: &mut VecDeque<Instant>, now: Instant, window: Duration) {
        while let Some(&oldest) = admissions.front() {
            if now.duration_since(oldest) >= window {
                admissions.pop_front();
            } else {
                break;
            }
        }
    }
}
