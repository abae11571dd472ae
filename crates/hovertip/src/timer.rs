//! One-shot timers on an explicit millisecond clock.

/// A single-shot, cancellable timer.
///
/// The interval is read when the timer starts; changing it while the timer
/// runs only affects the next start.
#[derive(Debug, Clone, Default)]
pub struct Timer {
    interval_ms: u64,
    deadline_ms: Option<u64>,
}

impl Timer {
    /// Creates a stopped timer.
    #[must_use]
    pub const fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            deadline_ms: None,
        }
    }

    /// Returns the configured interval.
    #[must_use]
    pub const fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    /// Sets the interval used by the next start.
    pub fn set_interval(&mut self, interval_ms: u64) {
        self.interval_ms = interval_ms;
    }

    /// (Re)starts the timer at `now_ms`.
    pub fn start(&mut self, now_ms: u64) {
        self.deadline_ms = Some(now_ms.saturating_add(self.interval_ms));
    }

    /// Stops the timer without firing.
    pub fn stop(&mut self) {
        self.deadline_ms = None;
    }

    /// Returns true while the timer is armed.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.deadline_ms.is_some()
    }

    /// Absolute deadline, if armed.
    #[must_use]
    pub const fn deadline_ms(&self) -> Option<u64> {
        self.deadline_ms
    }

    /// Fires the timer if its deadline is at or before `now_ms`.
    ///
    /// A fired timer is disarmed.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        match self.deadline_ms {
            Some(deadline) if deadline <= now_ms => {
                self.deadline_ms = None;
                true
            }
            _ => false,
        }
    }
}
