//! One-shot timers: the only source of asynchronous progress.
//!
//! A [`Clock`] keeps a queue of tagged deadlines. It never calls back into
//! the controller on its own; the controller asks for due timers with
//! [`Clock::pop_due`] and turns each into an event. That keeps event
//! processing strictly non-reentrant.
//!
//! Two clocks are provided:
//! - [`ManualClock`]: virtual time, advanced explicitly. Deterministic, used
//!   by tests and simulations.
//! - [`SystemClock`]: monotonic wall time for driving the controller live.

mod manual;
mod queue;
mod system;

pub use manual::ManualClock;
pub use queue::TimerQueue;
pub use system::SystemClock;

use std::fmt;
use std::time::Duration;

/// Opaque handle identifying one scheduled timer.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct TimerHandle(u64);

/// What a timer is for. At most one timer per purpose is outstanding.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum TimerPurpose {
    /// Next one-floor step while travelling.
    Movement,
    /// Door-open pause after arriving.
    ArrivalDwell,
    /// Pause before redirecting an unreachable request.
    ErrorDwell,
}

impl fmt::Display for TimerPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Movement => "movement",
            Self::ArrivalDwell => "arrival-dwell",
            Self::ErrorDwell => "error-dwell",
        })
    }
}

/// Payload carried by a timer: its purpose and the state generation it was
/// scheduled in.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct TimerTag {
    pub purpose: TimerPurpose,
    pub generation: u64,
}

/// A timer whose deadline has passed, removed from the queue.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct FiredTimer {
    pub handle: TimerHandle,
    pub deadline: Duration,
    pub tag: TimerTag,
}

/// Scheduler contract used by the controller.
///
/// Time is measured as a [`Duration`] since the clock's own origin.
pub trait Clock {
    fn now(&self) -> Duration;

    /// Schedule `tag` to fire `delay` from now.
    fn after(&mut self, delay: Duration, tag: TimerTag) -> TimerHandle;

    /// Cancel a pending timer. Returns `false` if it already fired or was
    /// cancelled; a cancelled timer never fires.
    fn cancel(&mut self, handle: TimerHandle) -> bool;

    /// Earliest pending deadline, if any.
    fn next_deadline(&self) -> Option<Duration>;

    /// Remove and return the earliest timer whose deadline is `<= now()`.
    fn pop_due(&mut self) -> Option<FiredTimer>;

    fn pending(&self) -> usize;
}
