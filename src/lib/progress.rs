//! Progress tracking for long record streams.
//!
//! A [`ProgressTracker`] counts records and logs a line each time the count
//! crosses an interval boundary, with a running rate so stalls are visible
//! in the log. The counter is atomic, so a tracker can be shared if callers
//! ever need to.

use crate::logging::{format_count, format_duration, format_rate};
use log::info;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Default interval between progress logs, sized for FASTQ record counts.
const DEFAULT_INTERVAL: u64 = 1_000_000;

/// Counts records and logs progress at interval boundaries.
///
/// # Example
/// ```
/// use fqsort_lib::progress::ProgressTracker;
///
/// let tracker = ProgressTracker::new("records read").with_interval(100);
///
/// for _ in 0..250 {
///     tracker.log_if_needed(1); // logs at 100 and 200
/// }
/// tracker.log_final(); // logs the final 250
/// ```
pub struct ProgressTracker {
    /// Progress is logged when the count crosses multiples of this.
    interval: u64,
    /// Message suffix for log output, e.g. "records read".
    message: String,
    /// Records counted so far.
    count: AtomicU64,
    /// When counting started, for rate reporting.
    start_time: Instant,
}

impl ProgressTracker {
    /// Create a tracker with the default interval of 1,000,000.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            message: message.into(),
            count: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    /// Set the logging interval.
    #[must_use]
    pub fn with_interval(mut self, interval: u64) -> Self {
        self.interval = interval.max(1);
        self
    }

    /// Add to the count and log once per interval boundary crossed.
    ///
    /// Returns `true` if the new count landed exactly on a boundary, which
    /// tells [`log_final`](Self::log_final) the milestone was already
    /// logged.
    pub fn log_if_needed(&self, additional: u64) -> bool {
        if additional == 0 {
            let count = self.count.load(Ordering::Relaxed);
            return count > 0 && count % self.interval == 0;
        }

        let prev = self.count.fetch_add(additional, Ordering::Relaxed);
        let new_count = prev + additional;

        let prev_intervals = prev / self.interval;
        let new_intervals = new_count / self.interval;
        for i in (prev_intervals + 1)..=new_intervals {
            let milestone = i * self.interval;
            info!(
                "{} {} ({})",
                format_count(milestone),
                self.message,
                format_rate(milestone, self.start_time.elapsed())
            );
        }

        new_count % self.interval == 0
    }

    /// Log the final count with the total elapsed time, unless the last
    /// increment already logged it.
    pub fn log_final(&self) {
        if !self.log_if_needed(0) {
            let count = self.count.load(Ordering::Relaxed);
            if count > 0 {
                info!(
                    "{} {} in {}",
                    format_count(count),
                    self.message,
                    format_duration(self.start_time.elapsed())
                );
            }
        }
    }

    /// The current count.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }
}
