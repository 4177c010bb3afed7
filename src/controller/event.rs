//! Events accepted at the dispatch boundary, and the signals the machine
//! processes internally.

use super::error::DispatchError;
use crate::core::{Direction, Heading, Level};
use std::fmt;
use std::str::FromStr;

/// An event sent by the view.
///
/// Parses from text as `CALL up`, `CALL down` or `SELECT <level>`
/// (case-insensitive).
///
/// ```rust
/// use liftstate::{Direction, Event};
///
/// assert_eq!("CALL up".parse::<Event>().unwrap(), Event::Call(Direction::Up));
/// assert_eq!("select 3".parse::<Event>().unwrap(), Event::Select(3));
/// assert!("OPEN".parse::<Event>().is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Event {
    /// Hall call: the user wants to travel in a direction.
    /// `Direction::None` is malformed and rejected on dispatch.
    Call(Direction),
    /// Floor button pressed inside the car.
    Select(Level),
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Call(direction) => write!(f, "CALL {direction}"),
            Self::Select(level) => write!(f, "SELECT {level}"),
        }
    }
}

impl FromStr for Event {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let name = words.next().ok_or_else(|| DispatchError::InvalidEvent("empty event".to_string()))?;
        let argument = words.next();
        if words.next().is_some() {
            return Err(DispatchError::InvalidEvent(format!("too many arguments in '{s}'")));
        }

        match (name.to_ascii_uppercase().as_str(), argument) {
            ("CALL", Some(direction)) => match direction.to_ascii_lowercase().as_str() {
                "up" => Ok(Self::Call(Direction::Up)),
                "down" => Ok(Self::Call(Direction::Down)),
                other => Err(DispatchError::InvalidEvent(format!(
                    "CALL direction must be 'up' or 'down', got '{other}'"
                ))),
            },
            ("SELECT", Some(level)) => level.parse().map(Self::Select).map_err(|_| {
                DispatchError::InvalidEvent(format!("SELECT level must be an integer, got '{level}'"))
            }),
            ("CALL" | "SELECT", None) => Err(DispatchError::InvalidEvent(format!(
                "{name} needs an argument"
            ))),
            _ => Err(DispatchError::InvalidEvent(format!("unknown event '{name}'"))),
        }
    }
}

/// A validated event, either from the view or raised by a timer or an
/// entry action.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Signal {
    Call(Heading),
    Select(Level),
    Tick,
    Arrived,
    DwellElapsed,
}

/// The part of a signal a transition row matches on.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Trigger {
    Call(Heading),
    Select,
    Tick,
    Arrived,
    DwellElapsed,
}

impl Signal {
    pub(crate) fn trigger(&self) -> Trigger {
        match self {
            Self::Call(heading) => Trigger::Call(*heading),
            Self::Select(_) => Trigger::Select,
            Self::Tick => Trigger::Tick,
            Self::Arrived => Trigger::Arrived,
            Self::DwellElapsed => Trigger::DwellElapsed,
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Call(heading) => write!(f, "CALL {heading}"),
            Self::Select(level) => write!(f, "SELECT {level}"),
            Self::Tick => f.write_str("TICK"),
            Self::Arrived => f.write_str("ARRIVED"),
            Self::DwellElapsed => f.write_str("DWELL_ELAPSED"),
        }
    }
}
