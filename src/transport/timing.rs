//! Keepalive scheduling and round-trip latency statistics.
//!
//! [`PingTracker`] is pure bookkeeping: it never touches a socket. Every
//! operation has a `*_at(now)` form taking an explicit monotonic millisecond
//! timestamp, plus a convenience wrapper reading the tracker's own clock.

use std::time::{Duration, Instant};

use crate::core::constants::{DEFAULT_PING_AVERAGE_MS, PING_INTERVAL, PING_TIMEOUT};

/// Keepalive schedule and running mean/variance of ping round trips.
///
/// Timestamps are milliseconds on a monotonic clock that starts at 1, so a
/// stored `0` always means "never happened".
#[derive(Debug, Clone)]
pub struct PingTracker {
    /// Clock origin for the wrapper methods.
    origin: Instant,
    /// When the last ping was sent (0 = never).
    time_sent: u64,
    /// When the last ping reply arrived (0 = never).
    time_received: u64,
    /// Number of round-trip samples.
    sample_count: u32,
    /// Running mean round trip, in milliseconds.
    average: f64,
    /// Variance accumulator.
    variance: f64,
    /// Interval between pings, in milliseconds.
    send_interval_ms: u64,
    /// Silence tolerated before the link is declared dead, in milliseconds.
    timeout_ms: u64,
}

impl Default for PingTracker {
    fn default() -> Self {
        Self::new(PING_INTERVAL, PING_TIMEOUT)
    }
}

impl PingTracker {
    /// Create a tracker with the given send interval and timeout.
    pub fn new(send_interval: Duration, timeout: Duration) -> Self {
        Self {
            origin: Instant::now(),
            time_sent: 0,
            time_received: 0,
            sample_count: 0,
            average: DEFAULT_PING_AVERAGE_MS,
            variance: 0.0,
            send_interval_ms: send_interval.as_millis() as u64,
            timeout_ms: timeout.as_millis() as u64,
        }
    }

    /// Current time on the tracker's clock (milliseconds, never 0).
    pub fn now(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64 + 1
    }

    /// Record that a ping was sent at `now`.
    pub fn mark_sent_at(&mut self, now: u64) {
        self.time_sent = now;
    }

    /// Record that a ping was sent now.
    pub fn mark_sent(&mut self) {
        self.mark_sent_at(self.now());
    }

    /// Check whether the next ping is due at `now`.
    pub fn is_due_at(&self, now: u64) -> bool {
        now >= self.time_sent.saturating_add(self.send_interval_ms)
    }

    /// Check whether the next ping is due now.
    pub fn is_due(&self) -> bool {
        self.is_due_at(self.now())
    }

    /// Check whether the link should be considered dead.
    ///
    /// Only true once a reply has been seen and the last send is more than
    /// the timeout past it.
    pub fn has_timed_out(&self) -> bool {
        self.time_received != 0 && self.time_sent > self.time_received + self.timeout_ms
    }

    /// Record a ping reply arriving at `now` and fold its round trip into
    /// the running statistics.
    pub fn record_sample_at(&mut self, now: u64) {
        self.time_received = now;
        let travel = now.saturating_sub(self.time_sent) as f64;

        let n = f64::from(self.sample_count);
        let old = self.average;
        let new = (old * n + travel) / (n + 1.0);

        self.variance += (old - new).powi(2);
        if self.sample_count > 0 {
            self.variance += (travel - new).powi(2) / n;
        }

        self.average = new;
        self.sample_count += 1;
    }

    /// Record a ping reply arriving now.
    pub fn record_sample(&mut self) {
        self.record_sample_at(self.now());
    }

    /// Monotonic time of the last send (0 = never).
    pub fn time_sent(&self) -> u64 {
        self.time_sent
    }

    /// Monotonic time of the last reply (0 = never).
    pub fn time_received(&self) -> u64 {
        self.time_received
    }

    /// Number of round-trip samples recorded.
    pub fn sample_count(&self) -> u32 {
        self.sample_count
    }

    /// Running mean round trip, in milliseconds.
    pub fn average(&self) -> f64 {
        self.average
    }

    /// Variance accumulator.
    pub fn variance(&self) -> f64 {
        self.variance
    }

    /// Interval between pings, in milliseconds.
    pub fn send_interval_ms(&self) -> u64 {
        self.send_interval_ms
    }

    /// Timeout, in milliseconds.
    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    /// Forget all samples and timestamps (keeps interval and timeout).
    pub fn reset(&mut self) {
        *self = Self::new(
            Duration::from_millis(self.send_interval_ms),
            Duration::from_millis(self.timeout_ms),
        );
    }
}
