use super::{Clock, FiredTimer, TimerHandle, TimerQueue, TimerTag};
use std::time::{Duration, Instant};

/// Monotonic wall-clock time, measured from construction.
#[derive(Debug)]
pub struct SystemClock {
    origin: Instant,
    queue: TimerQueue,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            queue: TimerQueue::new(),
        }
    }

    /// How long a driver loop may sleep before the next timer is due.
    /// `None` when nothing is scheduled.
    pub fn time_until_next(&self) -> Option<Duration> {
        self.queue
            .next_deadline()
            .map(|deadline| deadline.saturating_sub(self.now()))
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn after(&mut self, delay: Duration, tag: TimerTag) -> TimerHandle {
        self.queue.insert(self.now() + delay, tag)
    }

    fn cancel(&mut self, handle: TimerHandle) -> bool {
        self.queue.cancel(handle)
    }

    fn next_deadline(&self) -> Option<Duration> {
        self.queue.next_deadline()
    }

    fn pop_due(&mut self) -> Option<FiredTimer> {
        self.queue.pop_due(self.now())
    }

    fn pending(&self) -> usize {
        self.queue.len()
    }
}
