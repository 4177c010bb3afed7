use super::{Clock, FiredTimer, TimerHandle, TimerQueue, TimerTag};
use std::time::Duration;

/// Virtual clock whose time only moves when told to.
///
/// # Example
///
/// ```rust
/// use liftstate::clock::{Clock, ManualClock, TimerPurpose, TimerTag};
/// use std::time::Duration;
///
/// let mut clock = ManualClock::new();
/// let tag = TimerTag { purpose: TimerPurpose::Movement, generation: 0 };
/// clock.after(Duration::from_millis(1000), tag);
///
/// assert!(clock.pop_due().is_none());
/// clock.advance_to(Duration::from_millis(1000));
/// assert_eq!(clock.pop_due().map(|t| t.tag), Some(tag));
/// ```
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Duration,
    queue: TimerQueue,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward to `instant`. Time never runs backwards.
    pub fn advance_to(&mut self, instant: Duration) {
        self.now = self.now.max(instant);
    }

    pub fn advance(&mut self, by: Duration) {
        self.now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now
    }

    fn after(&mut self, delay: Duration, tag: TimerTag) -> TimerHandle {
        self.queue.insert(self.now + delay, tag)
    }

    fn cancel(&mut self, handle: TimerHandle) -> bool {
        self.queue.cancel(handle)
    }

    fn next_deadline(&self) -> Option<Duration> {
        self.queue.next_deadline()
    }

    fn pop_due(&mut self) -> Option<FiredTimer> {
        self.queue.pop_due(self.now)
    }

    fn pending(&self) -> usize {
        self.queue.len()
    }
}
