//! Builder API for ergonomic controller construction.

pub mod error;
pub mod machine;

pub use error::BuildError;
pub use machine::ControllerBuilder;
