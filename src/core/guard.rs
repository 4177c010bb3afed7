//! Guard predicates for controlling state transitions.
//!
//! Guards are pure boolean functions that decide whether a transition may
//! fire. They never raise events or schedule timers; any follow-up work is
//! an action performed by the controller after the guard has answered.

use super::context::Level;
use super::state::Heading;
use std::fmt;
use std::marker::PhantomData;

/// A `SELECT` while heading up is legal only for a floor above the car.
pub fn is_valid_up_request(level: Level, requested: Level) -> bool {
    requested > level
}

/// A `SELECT` while heading down is legal only for a floor below the car.
pub fn is_valid_down_request(level: Level, requested: Level) -> bool {
    requested < level
}

pub fn should_continue_up(level: Level, target: Level) -> bool {
    level < target
}

pub fn should_continue_down(level: Level, target: Level) -> bool {
    level > target
}

pub fn has_arrived(level: Level, target: Level) -> bool {
    level == target
}

/// [`is_valid_up_request`] or [`is_valid_down_request`] depending on `heading`.
pub fn is_valid_request(heading: Heading, level: Level, requested: Level) -> bool {
    match heading {
        Heading::Up => is_valid_up_request(level, requested),
        Heading::Down => is_valid_down_request(level, requested),
    }
}

/// [`should_continue_up`] or [`should_continue_down`] depending on `heading`.
pub fn should_continue(heading: Heading, level: Level, target: Level) -> bool {
    match heading {
        Heading::Up => should_continue_up(level, target),
        Heading::Down => should_continue_down(level, target),
    }
}

/// Pure predicate over a context and the event being handled.
///
/// # Example
///
/// ```rust
/// use liftstate::core::{Context, Guard};
///
/// let above_ground = Guard::new(|ctx: &Context, _event: &()| ctx.current_level > 1);
///
/// assert!(!above_ground.check(&Context::default(), &()));
/// ```
pub struct Guard<C, E> {
    predicate: Box<dyn Fn(&C, &E) -> bool + Send + Sync>,
    _phantom: PhantomData<fn(&C, &E)>,
}

impl<C, E> Guard<C, E> {
    /// Create a guard from a pure predicate function.
    ///
    /// The predicate must be deterministic and free of side effects.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&C, &E) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Box::new(predicate),
            _phantom: PhantomData,
        }
    }

    pub fn check(&self, context: &C, event: &E) -> bool {
        (self.predicate)(context, event)
    }
}

impl<C, E> fmt::Debug for Guard<C, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Guard(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Context;

    #[test]
    fn current_floor_is_never_a_valid_request() {
        for level in 1..=5 {
            assert!(!is_valid_up_request(level, level));
            assert!(!is_valid_down_request(level, level));
        }
    }

    #[test]
    fn direction_requests_compare_against_the_car() {
        assert!(is_valid_up_request(2, 4));
        assert!(!is_valid_up_request(4, 2));
        assert!(is_valid_down_request(4, 2));
        assert!(!is_valid_down_request(2, 4));
    }

    #[test]
    fn continue_and_arrive_partition_the_floors() {
        for level in 1..=5 {
            for target in 1..=5 {
                let up = should_continue_up(level, target);
                let down = should_continue_down(level, target);
                let arrived = has_arrived(level, target);
                assert_eq!([up, down, arrived].iter().filter(|b| **b).count(), 1);
            }
        }
    }

    #[test]
    fn heading_dispatch_matches_directional_predicates() {
        assert!(is_valid_request(Heading::Up, 1, 2));
        assert!(!is_valid_request(Heading::Up, 2, 1));
        assert!(is_valid_request(Heading::Down, 2, 1));
        assert!(should_continue(Heading::Up, 1, 3));
        assert!(!should_continue(Heading::Down, 1, 3));
    }

    #[test]
    fn guard_sees_context_and_event() {
        let guard = Guard::new(|ctx: &Context, requested: &Level| {
            is_valid_up_request(ctx.current_level, *requested)
        });
        let ctx = Context::default();

        assert!(guard.check(&ctx, &3));
        assert!(!guard.check(&ctx, &1));
    }

    #[test]
    fn guard_is_deterministic() {
        let guard = Guard::new(|ctx: &Context, _: &()| ctx.current_level == 1);
        let ctx = Context::default();

        assert_eq!(guard.check(&ctx, &()), guard.check(&ctx, &()));
    }
}
