//! Read-only snapshots and the listeners that receive them.

use crate::core::{Context, ElevatorState, State};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a view needs to render: the state path and a copy of the context.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Dotted state path, e.g. `Moving.GoingUp`.
    pub path: String,
    pub state: ElevatorState,
    pub context: Context,
    pub generation: u64,
}

impl Snapshot {
    pub(crate) fn new(state: ElevatorState, context: Context, generation: u64) -> Self {
        Self {
            path: state.path(),
            state,
            context,
            generation,
        }
    }

    /// Whether the active state is `path` or one of its substates:
    /// `matches("Moving")` holds in `Moving.GoingUp`.
    pub fn matches(&self, path: &str) -> bool {
        self.path == path
            || self
                .path
                .strip_prefix(path)
                .is_some_and(|rest| rest.starts_with('.'))
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ctx = &self.context;
        write!(
            f,
            "{} level={} target={} direction={} door={:?} selection={}",
            self.path,
            ctx.current_level,
            ctx.target_level,
            ctx.direction,
            ctx.door_status,
            ctx.selection_enabled
        )?;
        if let Some(requested) = ctx.requested_level {
            write!(f, " requested={requested}")?;
        }
        Ok(())
    }
}

/// Returned by `subscribe`; pass to `unsubscribe` to stop notifications.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&Snapshot)>;

#[derive(Default)]
pub(crate) struct Observers {
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}

impl Observers {
    pub fn subscribe(&mut self, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Call every listener in subscription order.
    pub fn notify(&mut self, snapshot: &Snapshot) {
        for (_, listener) in &mut self.listeners {
            listener(snapshot);
        }
    }
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Heading;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn matches_accepts_ancestors_only_on_segment_boundaries() {
        let snapshot = Snapshot::new(ElevatorState::GOING_UP, Context::default(), 0);
        assert!(snapshot.matches("Moving"));
        assert!(snapshot.matches("Moving.GoingUp"));
        assert!(!snapshot.matches("Moving.Going"));
        assert!(!snapshot.matches("Idle"));
    }

    #[test]
    fn unsubscribed_listener_is_not_called() {
        let seen = Rc::new(RefCell::new(0));
        let mut observers = Observers::default();

        let counter = Rc::clone(&seen);
        let id = observers.subscribe(Box::new(move |_| *counter.borrow_mut() += 1));
        let snapshot = Snapshot::new(ElevatorState::DoorOpen(Heading::Up), Context::default(), 1);

        observers.notify(&snapshot);
        assert!(observers.unsubscribe(id));
        assert!(!observers.unsubscribe(id));
        observers.notify(&snapshot);

        assert_eq!(*seen.borrow(), 1);
        assert!(observers.is_empty());
    }

    #[test]
    fn display_includes_requested_level_when_set() {
        let ctx = Context {
            current_level: 3,
            requested_level: Some(1),
            ..Context::default()
        };
        let text = Snapshot::new(ElevatorState::Redirect(Heading::Up), ctx, 2).to_string();
        assert!(text.starts_with("Error.RedirectUp level=3"));
        assert!(text.ends_with("requested=1"));
    }

    #[test]
    fn snapshot_serializes_correctly() {
        let snapshot = Snapshot::new(ElevatorState::ARRIVED, Context::default(), 7);
        let json = serde_json::to_string(&snapshot).unwrap();
        let deserialized: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot, deserialized);
    }
}
