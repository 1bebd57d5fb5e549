//! Trailing-edge debouncing.
//!
//! A [`Debouncer`] collapses a burst of values into the last one. Each
//! [`push`](Debouncer::push) replaces the pending value and restarts the quiet
//! window, so at most one value is ever pending. The caller owns the clock:
//! the browser passes time since page load, the CLI passes `tokio` instants.

use std::{ops::Add, time::Duration};

#[derive(Debug, Clone)]
struct Pending<T, I> {
    value: T,
    deadline: I,
}

/// Keeps the latest value of a burst until the burst goes quiet.
#[derive(Debug, Clone)]
pub struct Debouncer<T, I = std::time::Instant> {
    window: Duration,
    pending: Option<Pending<T, I>>,
}

impl<T, I> Debouncer<T, I>
where
    I: Copy + Ord + Add<Duration, Output = I>,
{
    /// Create a debouncer with the given quiet window.
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    /// The quiet window.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Record a new value, discarding any pending one.
    ///
    /// Returns the deadline after which the value is released.
    pub fn push(&mut self, value: T, now: I) -> I {
        let deadline = now + self.window;
        self.pending = Some(Pending { value, deadline });
        deadline
    }

    /// Deadline of the pending value, if any.
    pub fn deadline(&self) -> Option<I> {
        self.pending.as_ref().map(|pending| pending.deadline)
    }

    /// Whether a value is waiting for its window to elapse.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Release the pending value if its window has elapsed at `now`.
    pub fn poll(&mut self, now: I) -> Option<T> {
        match &self.pending {
            Some(pending) if pending.deadline <= now => self.flush(),
            _ => None,
        }
    }

    /// Release the pending value regardless of the clock.
    ///
    /// Used when an external timer, restarted on every push, fires.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|pending| pending.value)
    }

    /// Drop the pending value.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(200);

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn test_releases_after_window() {
        let mut debouncer: Debouncer<&str, Duration> = Debouncer::new(WINDOW);
        let deadline = debouncer.push("ru", ms(0));

        assert_eq!(deadline, ms(200));
        assert_eq!(debouncer.poll(ms(199)), None);
        assert_eq!(debouncer.poll(ms(200)), Some("ru"));
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_burst_collapses_to_last_value() {
        let mut debouncer: Debouncer<String, Duration> = Debouncer::new(WINDOW);
        let mut released = Vec::new();

        for (i, query) in ["r", "ru", "rus", "rust"].iter().enumerate() {
            let now = ms(i as u64 * 50);
            if let Some(value) = debouncer.poll(now) {
                released.push(value);
            }
            debouncer.push((*query).to_string(), now);
        }

        assert_eq!(debouncer.deadline(), Some(ms(350)));
        for t in (150..=400).step_by(10) {
            if let Some(value) = debouncer.poll(ms(t)) {
                released.push(value);
            }
        }

        assert_eq!(released, vec!["rust".to_string()]);
    }

    #[test]
    fn test_push_restarts_window() {
        let mut debouncer: Debouncer<u32, Duration> = Debouncer::new(WINDOW);
        debouncer.push(1, ms(0));
        debouncer.push(2, ms(150));

        assert_eq!(debouncer.poll(ms(200)), None);
        assert_eq!(debouncer.poll(ms(350)), Some(2));
    }

    #[test]
    fn test_cancel_and_flush() {
        let mut debouncer: Debouncer<u32, Duration> = Debouncer::new(WINDOW);
        debouncer.push(7, ms(0));
        debouncer.cancel();
        assert_eq!(debouncer.poll(ms(1_000)), None);

        debouncer.push(8, ms(0));
        assert_eq!(debouncer.flush(), Some(8));
        assert_eq!(debouncer.flush(), None);
    }

    #[test]
    fn test_works_with_std_instant() {
        let mut debouncer = Debouncer::new(WINDOW);
        let start = std::time::Instant::now();
        debouncer.push("q", start);
        assert_eq!(debouncer.poll(start), None);
        assert_eq!(debouncer.poll(start + WINDOW), Some("q"));
    }
}
