//! Trailing-window coalescing of delete events.
//!
//! Bulk deletions (removing a directory) arrive as a burst of individual
//! events. Recording each event restarts the window; the batch is released
//! only once the window has been quiet, so one burst yields one prompt.

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Coalesces events into a single batch per quiet window.
#[derive(Debug)]
pub struct BatchDebouncer {
    /// Pending deleted paths, deduplicated and ordered.
    pending: BTreeSet<PathBuf>,
    /// Timestamp of the most recent event; a new event resets the window.
    last_event: Option<Instant>,
    /// How long the window must stay quiet before the batch is released.
    window: Duration,
}

impl BatchDebouncer {
    /// Create a new debouncer with the given window in milliseconds.
    pub fn new(window_ms: u64) -> Self {
        Self {
            pending: BTreeSet::new(),
            last_event: None,
            window: Duration::from_millis(window_ms),
        }
    }

    /// Record a delete event. Restarts the quiet window.
    pub fn record(&mut self, path: PathBuf) {
        self.pending.insert(path);
        self.last_event = Some(Instant::now());
    }

    /// Release the whole batch once the window has been quiet, else `None`.
    pub fn take_ready(&mut self) -> Option<Vec<PathBuf>> {
        let last = self.last_event?;
        if last.elapsed() < self.window {
            return None;
        }
        self.last_event = None;
        Some(std::mem::take(&mut self.pending).into_iter().collect())
    }

    /// Drop any pending batch without releasing it.
    pub fn clear(&mut self) {
        self.pending.clear();
        self.last_event = None;
    }

    /// Check if there are any pending events.
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn test_batch_released_after_quiet_window() {
        let mut debouncer = BatchDebouncer::new(10);
        debouncer.record(PathBuf::from("a.cpp"));
        debouncer.record(PathBuf::from("b.cpp"));

        assert!(debouncer.take_ready().is_none());
        sleep(Duration::from_millis(20));

        let batch = debouncer.take_ready().unwrap();
        assert_eq!(batch, vec![PathBuf::from("a.cpp"), PathBuf::from("b.cpp")]);
        assert!(!debouncer.has_pending());
    }

    #[test]
    fn test_new_event_restarts_window() {
        let mut debouncer = BatchDebouncer::new(30);
        debouncer.record(PathBuf::from("a.cpp"));
        sleep(Duration::from_millis(20));
        debouncer.record(PathBuf::from("b.cpp"));

        // First event is 20ms old but the window restarted 0ms ago.
        assert!(debouncer.take_ready().is_none());

        sleep(Duration::from_millis(40));
        assert_eq!(debouncer.take_ready().unwrap().len(), 2);
    }

    #[test]
    fn test_duplicate_events_collapse() {
        let mut debouncer = BatchDebouncer::new(5);
        debouncer.record(PathBuf::from("a.cpp"));
        debouncer.record(PathBuf::from("a.cpp"));
        sleep(Duration::from_millis(10));
        assert_eq!(debouncer.take_ready().unwrap().len(), 1);
    }

    #[test]
    fn test_clear_drops_pending() {
        let mut debouncer = BatchDebouncer::new(5);
        debouncer.record(PathBuf::from("a.cpp"));
        debouncer.clear();
        sleep(Duration::from_millis(10));
        assert!(debouncer.take_ready().is_none());
    }

    #[test]
    fn test_empty_debouncer_is_never_ready() {
        let mut debouncer = BatchDebouncer::new(0);
        assert!(debouncer.take_ready().is_none());
    }
}
