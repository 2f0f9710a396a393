//! Cancellation and progress reporting for a filter run
//!
//! A [`RunControl`] is handed down through every pass. Passes poll
//! [`RunControl::check`] between rows and bail out with [`Cancelled`],
//! which the driver turns into [`crate::FilterOutcome::Cancelled`].
//!
//! Progress is reported in percent. Values are rounded down to a
//! multiple of 5, never decrease, and never exceed 100; a value equal to
//! the last one reported is not forwarded again.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

/// Marker returned by a pass that observed the cancellation flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cancelled;

impl fmt::Display for Cancelled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("filter run cancelled")
    }
}

impl std::error::Error for Cancelled {}

/// Result of a pass that can be interrupted
pub type RunResult<T> = Result<T, Cancelled>;

/// Cancellation flag and progress sink for one filter run
#[derive(Default)]
pub struct RunControl<'a> {
    cancel: Option<&'a AtomicBool>,
    progress: Option<&'a mut dyn FnMut(u32)>,
    last_reported: Option<u32>,
}

impl<'a> RunControl<'a> {
    /// A control that never cancels and drops progress reports.
    pub fn new() -> Self {
        Self::default()
    }

    /// Poll `flag` for cancellation.
    pub fn with_cancel_flag(mut self, flag: &'a AtomicBool) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Forward progress percentages to `callback`.
    pub fn with_progress(mut self, callback: &'a mut dyn FnMut(u32)) -> Self {
        self.progress = Some(callback);
        self
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    /// Return `Err(Cancelled)` once cancellation has been requested.
    #[inline]
    pub fn check(&self) -> RunResult<()> {
        if self.is_cancelled() {
            Err(Cancelled)
        } else {
            Ok(())
        }
    }

    /// Report progress in percent.
    pub fn report(&mut self, percent: u32) {
        let percent = percent.min(100) / 5 * 5;
        if self.last_reported.is_some_and(|last| percent <= last) {
            return;
        }
        self.last_reported = Some(percent);
        if let Some(callback) = self.progress.as_deref_mut() {
            callback(percent);
        }
    }

    /// Last value forwarded by [`report`](Self::report).
    pub fn last_reported(&self) -> Option<u32> {
        self.last_reported
    }
}

impl fmt::Debug for RunControl<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunControl")
            .field("cancelled", &self.is_cancelled())
            .field("has_progress", &self.progress.is_some())
            .field("last_reported", &self.last_reported)
            .finish()
    }
}
