//! State transition history tracking.
//!
//! Keeps a bounded, ordered record of the transitions a machine committed,
//! so a view or a test can replay where the car has been.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Record of a single committed transition.
///
/// # Example
///
/// ```rust
/// use liftstate::core::{ElevatorState, Heading, StateTransition};
/// use chrono::Utc;
///
/// let transition = StateTransition {
///     from: ElevatorState::Idle,
///     to: ElevatorState::DoorOpen(Heading::Up),
///     event: "CALL up".to_string(),
///     generation: 1,
///     timestamp: Utc::now(),
/// };
/// assert_eq!(transition.to.to_string(), "DoorOpen.up");
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<S: State> {
    pub from: S,
    pub to: S,
    /// The event that fired the transition, e.g. `SELECT 3` or `TICK`.
    pub event: String,
    /// State generation the machine entered with this transition.
    pub generation: u64,
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of committed transitions, oldest first.
///
/// Once `limit` records are held the oldest one is dropped for each new one;
/// a limit of zero keeps nothing.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: State> {
    transitions: VecDeque<StateTransition<S>>,
    limit: usize,
}

impl<S: State> StateHistory<S> {
    pub fn with_limit(limit: usize) -> Self {
        Self {
            transitions: VecDeque::with_capacity(limit.min(1024)),
            limit,
        }
    }

    pub fn record(&mut self, transition: StateTransition<S>) {
        if self.limit == 0 {
            return;
        }
        if self.transitions.len() == self.limit {
            self.transitions.pop_front();
        }
        self.transitions.push_back(transition);
    }

    /// Get the path of states traversed.
    ///
    /// Returns the `from` state of the oldest retained transition followed by
    /// the `to` state of every transition.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.front() {
            path.push(&first.from);
        }
        path.extend(self.transitions.iter().map(|t| &t.to));
        path
    }

    pub fn transitions(&self) -> impl ExactSizeIterator<Item = &StateTransition<S>> {
        self.transitions.iter()
    }

    pub fn last(&self) -> Option<&StateTransition<S>> {
        self.transitions.back()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ElevatorState, Heading};

    fn transition(from: ElevatorState, to: ElevatorState, generation: u64) -> StateTransition<ElevatorState> {
        StateTransition {
            from,
            to,
            event: "test".to_string(),
            generation,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history: StateHistory<ElevatorState> = StateHistory::with_limit(8);
        assert!(history.is_empty());
        assert!(history.get_path().is_empty());
    }

    #[test]
    fn get_path_returns_state_sequence() {
        let mut history = StateHistory::with_limit(8);
        history.record(transition(ElevatorState::Idle, ElevatorState::DoorOpen(Heading::Up), 1));
        history.record(transition(ElevatorState::DoorOpen(Heading::Up), ElevatorState::GOING_UP, 2));

        let path = history.get_path();
        assert_eq!(path.len(), 3);
        assert_eq!(path[0], &ElevatorState::Idle);
        assert_eq!(path[1], &ElevatorState::DoorOpen(Heading::Up));
        assert_eq!(path[2], &ElevatorState::GOING_UP);
    }

    #[test]
    fn limit_drops_oldest_records() {
        let mut history = StateHistory::with_limit(2);
        history.record(transition(ElevatorState::Idle, ElevatorState::DoorOpen(Heading::Up), 1));
        history.record(transition(ElevatorState::DoorOpen(Heading::Up), ElevatorState::GOING_UP, 2));
        history.record(transition(ElevatorState::GOING_UP, ElevatorState::ARRIVED, 3));

        assert_eq!(history.len(), 2);
        assert_eq!(history.transitions().next().map(|t| t.generation), Some(2));
        assert_eq!(history.last().map(|t| t.to), Some(ElevatorState::ARRIVED));
    }

    #[test]
    fn zero_limit_keeps_nothing() {
        let mut history = StateHistory::with_limit(0);
        history.record(transition(ElevatorState::Idle, ElevatorState::DoorOpen(Heading::Down), 1));
        assert!(history.is_empty());
    }

    #[test]
    fn history_serializes_correctly() {
        let mut history = StateHistory::with_limit(4);
        history.record(transition(ElevatorState::Idle, ElevatorState::DoorOpen(Heading::Up), 1));

        let json = serde_json::to_string(&history).unwrap();
        let deserialized: StateHistory<ElevatorState> = serde_json::from_str(&json).unwrap();

        assert_eq!(history.len(), deserialized.len());
        assert_eq!(deserialized.limit(), 4);
    }
}
