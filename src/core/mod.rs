//! Core state machine types and logic.
//!
//! This module contains the pure part of the controller:
//! - The elevator's states via the `State` trait
//! - The mutable context record
//! - Guard predicates for transition control
//! - Bounded history tracking
//!
//! Nothing in here schedules timers or dispatches events.

mod context;
mod guard;
mod history;
mod state;

pub use context::{Context, Direction, DoorStatus, Level};
pub use guard::{
    has_arrived, is_valid_down_request, is_valid_request, is_valid_up_request, should_continue,
    should_continue_down, should_continue_up, Guard,
};
pub use history::{StateHistory, StateTransition};
pub use state::{ElevatorState, Heading, Motion, State};
