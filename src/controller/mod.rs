//! The event-driven shell around the pure core.
//!
//! This module owns everything with side effects: scheduling timers,
//! mutating the context, and notifying observers.
//!
//! # Key Concepts
//!
//! - **Events**: `CALL` and `SELECT` from the view, validated at the boundary
//! - **Transitions**: a table of guarded rows, tried in order
//! - **Entry actions**: schedule the state's timer or raise `ARRIVED`
//! - **Snapshots**: read-only copies handed to observers

mod error;
mod event;
mod machine;
mod observer;
mod transition;

pub use error::DispatchError;
pub use event::Event;
pub use machine::Controller;
pub use observer::{Snapshot, SubscriptionId};
