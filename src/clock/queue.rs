use super::{FiredTimer, TimerHandle, TimerTag};
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

/// Deadline-ordered timer storage shared by the clock implementations.
///
/// Timers with equal deadlines fire in scheduling order.
#[derive(Debug, Default)]
pub struct TimerQueue {
    entries: BTreeMap<(Duration, u64), TimerTag>,
    deadlines: HashMap<u64, Duration>,
    next_id: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, deadline: Duration, tag: TimerTag) -> TimerHandle {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.insert((deadline, id), tag);
        self.deadlines.insert(id, deadline);
        TimerHandle(id)
    }

    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        match self.deadlines.remove(&handle.0) {
            Some(deadline) => self.entries.remove(&(deadline, handle.0)).is_some(),
            None => false,
        }
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.entries.keys().next().map(|(deadline, _)| *deadline)
    }

    pub fn pop_due(&mut self, now: Duration) -> Option<FiredTimer> {
        let (&(deadline, id), _) = self.entries.first_key_value()?;
        if deadline > now {
            return None;
        }
        let tag = self.entries.remove(&(deadline, id))?;
        self.deadlines.remove(&id);
        Some(FiredTimer {
            handle: TimerHandle(id),
            deadline,
            tag,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
