//! Builder for constructing controllers.

use crate::builder::error::BuildError;
use crate::clock::Clock;
use crate::config::ControllerConfig;
use crate::controller::Controller;
use crate::core::Level;
use std::time::Duration;

/// Builder for constructing controllers with a fluent API.
///
/// # Example
///
/// ```rust
/// use liftstate::builder::ControllerBuilder;
/// use liftstate::ManualClock;
/// use std::time::Duration;
///
/// let lift = ControllerBuilder::new()
///     .max_level(10)
///     .tick_interval(Duration::from_millis(500))
///     .clock(ManualClock::new())
///     .build()
///     .unwrap();
///
/// assert_eq!(lift.config().max_level, 10);
/// ```
pub struct ControllerBuilder<C: Clock> {
    config: ControllerConfig,
    clock: Option<C>,
}

impl<C: Clock> ControllerBuilder<C> {
    /// Create a new builder with the default configuration.
    pub fn new() -> Self {
        Self {
            config: ControllerConfig::default(),
            clock: None,
        }
    }

    /// Replace the whole configuration, e.g. one loaded from TOML.
    pub fn config(mut self, config: ControllerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn max_level(mut self, max_level: Level) -> Self {
        self.config.max_level = max_level;
        self
    }

    pub fn tick_interval(mut self, interval: Duration) -> Self {
        self.config.tick_interval_ms = millis(interval);
        self
    }

    pub fn arrival_dwell(mut self, dwell: Duration) -> Self {
        self.config.arrival_dwell_ms = millis(dwell);
        self
    }

    pub fn error_dwell(mut self, dwell: Duration) -> Self {
        self.config.error_dwell_ms = millis(dwell);
        self
    }

    pub fn history_limit(mut self, limit: usize) -> Self {
        self.config.history_limit = limit;
        self
    }

    /// Set the clock (required).
    pub fn clock(mut self, clock: C) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Build the controller.
    /// Returns an error if the clock is missing or the configuration is invalid.
    pub fn build(self) -> Result<Controller<C>, BuildError> {
        let clock = self.clock.ok_or(BuildError::MissingClock)?;
        Ok(Controller::new(self.config, clock)?)
    }
}

impl<C: Clock> Default for ControllerBuilder<C> {
    fn default() -> Self {
        Self::new()
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
