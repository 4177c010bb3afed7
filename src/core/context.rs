//! The controller's mutable context record.

use super::state::Heading;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A floor number. Valid floors are `1..=max_level`.
pub type Level = i32;

/// The direction the car last committed to.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    None,
    Up,
    Down,
}

impl Direction {
    pub fn heading(self) -> Option<Heading> {
        match self {
            Self::None => None,
            Self::Up => Some(Heading::Up),
            Self::Down => Some(Heading::Down),
        }
    }
}

impl From<Heading> for Direction {
    fn from(heading: Heading) -> Self {
        match heading {
            Heading::Up => Self::Up,
            Heading::Down => Self::Down,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::None => "none",
            Self::Up => "up",
            Self::Down => "down",
        })
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DoorStatus {
    Open,
    #[default]
    Closed,
}

/// Everything the controller remembers besides its state.
///
/// Only the controller's transition and entry actions write to this record;
/// everyone else sees copies.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Context {
    pub current_level: Level,
    pub target_level: Level,
    /// Last floor pressed that could not be reached in the chosen direction.
    pub requested_level: Option<Level>,
    pub direction: Direction,
    pub door_status: DoorStatus,
    pub selection_enabled: bool,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            current_level: 1,
            target_level: 1,
            requested_level: None,
            direction: Direction::None,
            door_status: DoorStatus::Closed,
            selection_enabled: false,
        }
    }
}
