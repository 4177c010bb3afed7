//! State trait and the elevator's hierarchical state type.
//!
//! All state machine states implement [`State`], which provides pure methods
//! for inspecting state properties without side effects.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};

/// Trait for state machine states.
///
/// All methods are pure - no side effects. States are small immutable
/// values describing the current position in a state machine.
///
/// # Required Traits
///
/// - `Clone`: States are copied into history records and snapshots
/// - `PartialEq`: States are compared when selecting transitions
/// - `Debug`: States must be debuggable for diagnostics
/// - `Serialize` + `Deserialize`: States travel inside snapshots
///
/// # Example
///
/// ```rust
/// use liftstate::core::{ElevatorState, State};
///
/// assert_eq!(ElevatorState::Idle.path(), "Idle");
/// assert!(!ElevatorState::Idle.is_error());
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Name of the top-level state, e.g. `Moving`.
    fn name(&self) -> &str;

    /// Full dotted path including the active substate, e.g. `Moving.GoingUp`.
    ///
    /// Default implementation returns [`State::name`].
    fn path(&self) -> String {
        self.name().to_string()
    }

    /// Check if this is an error state.
    ///
    /// Default implementation returns `false`.
    fn is_error(&self) -> bool {
        false
    }
}

/// Direction of travel for states that only make sense going somewhere.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Heading {
    Up,
    Down,
}

impl Heading {
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }

    /// Signed one-floor step in this heading.
    pub fn step(self) -> i32 {
        match self {
            Self::Up => 1,
            Self::Down => -1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Substates of `Moving`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Motion {
    /// Travelling one floor per tick in the given heading.
    Going(Heading),
    /// At the target with the door open, waiting out the dwell.
    Arrived,
}

/// The controller's active state.
///
/// `DoorOpen`, `Moving` and `Error` are composite; their payload is the
/// active (exclusive) substate.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum ElevatorState {
    Idle,
    DoorOpen(Heading),
    Moving(Motion),
    /// Waiting out the error dwell before redirecting away from the heading.
    Redirect(Heading),
}

impl ElevatorState {
    pub const GOING_UP: Self = Self::Moving(Motion::Going(Heading::Up));
    pub const GOING_DOWN: Self = Self::Moving(Motion::Going(Heading::Down));
    pub const ARRIVED: Self = Self::Moving(Motion::Arrived);

    /// Heading the car is travelling in, if it is between floors.
    pub fn travelling(&self) -> Option<Heading> {
        match self {
            Self::Moving(Motion::Going(heading)) => Some(*heading),
            _ => None,
        }
    }
}

impl State for ElevatorState {
    fn name(&self) -> &str {
        match self {
            Self::Idle => "Idle",
            Self::DoorOpen(_) => "DoorOpen",
            Self::Moving(_) => "Moving",
            Self::Redirect(_) => "Error",
        }
    }

    fn path(&self) -> String {
        match self {
            Self::Idle => "Idle".to_string(),
            Self::DoorOpen(heading) => format!("DoorOpen.{heading}"),
            Self::Moving(Motion::Going(Heading::Up)) => "Moving.GoingUp".to_string(),
            Self::Moving(Motion::Going(Heading::Down)) => "Moving.GoingDown".to_string(),
            Self::Moving(Motion::Arrived) => "Moving.Arrived".to_string(),
            Self::Redirect(Heading::Up) => "Error.RedirectUp".to_string(),
            Self::Redirect(Heading::Down) => "Error.RedirectDown".to_string(),
        }
    }

    fn is_error(&self) -> bool {
        matches!(self, Self::Redirect(_))
    }
}

impl fmt::Display for ElevatorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
