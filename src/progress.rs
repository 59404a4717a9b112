//! Progress reporting for index builds
//!
//! The index builder reports progress through an injected sink so it stays
//! free of terminal state. Reporter calls are infallible; a missing or
//! broken terminal can never affect a build's outcome.

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;

/// Side-effect sink for build progress.
pub trait ProgressReporter: Send + Sync {
    /// A build phase with `total` steps is starting.
    fn begin(&self, label: &str, total: u64);

    /// `completed` steps of the current phase are done.
    fn advance(&self, completed: u64);

    /// The current phase is finished.
    fn finish(&self);
}

/// Reporter that discards all progress. The default for embedded use.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn begin(&self, _label: &str, _total: u64) {}
    fn advance(&self, _completed: u64) {}
    fn finish(&self) {}
}

/// Terminal progress bar backed by `indicatif`.
#[derive(Debug, Default)]
pub struct TerminalProgress {
    bar: Mutex<Option<ProgressBar>>,
}

impl TerminalProgress {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressReporter for TerminalProgress {
    fn begin(&self, label: &str, total: u64) {
        let bar = ProgressBar::new(total);
        let style = ProgressStyle::with_template("{msg}: [{bar:40}] {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("= ");
        bar.set_style(style);
        bar.set_message(label.to_string());

        if let Ok(mut guard) = self.bar.lock() {
            *guard = Some(bar);
        }
    }

    fn advance(&self, completed: u64) {
        if let Ok(guard) = self.bar.lock() {
            if let Some(bar) = guard.as_ref() {
                bar.set_position(completed);
            }
        }
    }

    fn finish(&self) {
        if let Ok(mut guard) = self.bar.lock() {
            if let Some(bar) = guard.take() {
                bar.finish_and_clear();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_reporter_is_silent() {
        let reporter = NoProgress;
        reporter.begin("Indexing", 3);
        reporter.advance(2);
        reporter.finish();
    }

    #[test]
    fn test_terminal_reporter_without_tty() {
        // indicatif falls back to a hidden draw target when there is no
        // terminal; every call must still be safe
        let reporter = TerminalProgress::new();
        reporter.begin("Indexing", 2);
        reporter.advance(1);
        reporter.advance(2);
        reporter.finish();
    }
}
