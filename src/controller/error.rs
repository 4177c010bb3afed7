use crate::core::Level;
use thiserror::Error;

/// Why an event was rejected at the dispatch boundary.
///
/// A rejected event never changes the controller's state or context.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// Unknown event name or wrong event shape.
    #[error("Invalid event: {0}")]
    InvalidEvent(String),

    #[error("Level {level} is outside 1..={max_level}")]
    InvalidLevel { level: Level, max_level: Level },

    /// Well-formed, but the current state has no transition for it.
    #[error("Event '{event}' is not accepted in state '{state}'")]
    NotHandled { event: String, state: String },
}
