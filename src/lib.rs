//! Liftstate: a timer-driven state machine for a single elevator car
//!
//! The controller accepts hall calls (`CALL up`/`CALL down`) and floor
//! selections (`SELECT n`), moves the car one floor per tick, holds the door
//! open on arrival, and redirects requests that cannot be reached in the
//! chosen direction.
//!
//! # Core Concepts
//!
//! - **State**: `Idle`, `DoorOpen`, `Moving` and `Error`, with exclusive substates
//! - **Guards**: Pure predicates deciding which transition fires
//! - **Clock**: Injected scheduler; timers are tagged with a state generation
//!   so late firings are discarded
//! - **Snapshots**: Read-only copies of state and context pushed to observers
//!
//! # Example
//!
//! ```rust
//! use liftstate::{Controller, ControllerConfig, Direction, Event, ManualClock};
//!
//! let mut lift = Controller::new(ControllerConfig::default(), ManualClock::new()).unwrap();
//! lift.subscribe(|snapshot| println!("{snapshot}"));
//!
//! lift.dispatch(Event::Call(Direction::Up)).unwrap();
//! lift.dispatch(Event::Select(4)).unwrap();
//! lift.run_until_settled();
//!
//! assert_eq!(lift.snapshot().path, "Idle");
//! assert_eq!(lift.context().current_level, 4);
//! ```

pub mod builder;
pub mod clock;
pub mod config;
pub mod controller;
pub mod core;

// Re-export commonly used types
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{ConfigError, ControllerConfig};
pub use controller::{Controller, DispatchError, Event, Snapshot, SubscriptionId};
pub use crate::core::{Context, Direction, DoorStatus, ElevatorState, Heading, Level, State};
