use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Row progress and cooperative abort flag shared between the workers of
/// one conversion and whoever supervises it.
///
/// All methods take `&self`; the monitor can be polled while workers run.
#[derive(Debug)]
pub struct ProgressMonitor {
    total: AtomicUsize,
    completed: AtomicUsize,
    abort: AtomicBool,
}

impl Default for ProgressMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressMonitor {
    pub const fn new() -> Self {
        Self {
            total: AtomicUsize::new(0),
            completed: AtomicUsize::new(0),
            abort: AtomicBool::new(false),
        }
    }

    /// Resets the counter for a run of `total` rows. A pending abort
    /// request is kept.
    pub(crate) fn initialize(&self, total: usize) {
        self.completed.store(0, Ordering::Relaxed);
        self.total.store(total, Ordering::Relaxed);
    }

    pub(crate) fn advance(&self, rows: usize) {
        if rows > 0 {
            self.completed.fetch_add(rows, Ordering::Relaxed);
        }
    }

    pub fn total(&self) -> usize {
        self.total.load(Ordering::Relaxed)
    }

    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::Relaxed)
    }

    /// Completed share in `[0, 1]`; 0 before a run starts.
    pub fn fraction(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            (self.completed() as f64 / total as f64).min(1.0)
        }
    }

    pub fn request_abort(&self) {
        self.abort.store(true, Ordering::Release);
    }

    pub fn is_aborted(&self) -> bool {
        self.abort.load(Ordering::Acquire)
    }

    /// Clears an abort request so the monitor can be reused.
    pub fn reset_abort(&self) {
        self.abort.store(false, Ordering::Release);
    }

    /// Clears the abort request and reports whether one was pending.
    pub(crate) fn take_abort(&self) -> bool {
        self.abort.swap(false, Ordering::AcqRel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn fraction_tracks_advances() {
        let monitor = ProgressMonitor::new();
        assert_eq!(monitor.fraction(), 0.0);

        monitor.initialize(64);
        monitor.advance(16);
        monitor.advance(0);
        assert_eq!(monitor.completed(), 16);
        assert_eq!(monitor.fraction(), 0.25);

        monitor.initialize(8);
        assert_eq!(monitor.completed(), 0);
        assert_eq!(monitor.total(), 8);
    }

    #[test]
    fn concurrent_advances_are_not_lost() {
        let monitor = Arc::new(ProgressMonitor::new());
        monitor.initialize(8 * 1000);
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let monitor = Arc::clone(&monitor);
                std::thread::spawn(move || {
                    for _ in 0..1000 {
                        monitor.advance(1);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(monitor.completed(), 8000);
        assert_eq!(monitor.fraction(), 1.0);
    }

    #[test]
    fn abort_survives_initialize() {
        let monitor = ProgressMonitor::new();
        monitor.request_abort();
        monitor.initialize(10);
        assert!(monitor.is_aborted());
        monitor.reset_abort();
        assert!(!monitor.is_aborted());
    }

    #[test]
    fn take_abort_consumes_the_request() {
        let monitor = ProgressMonitor::new();
        assert!(!monitor.take_abort());

        monitor.request_abort();
        assert!(monitor.take_abort());
        assert!(!monitor.is_aborted());
        assert!(!monitor.take_abort());
    }
}
