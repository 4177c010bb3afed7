//! The controller's transition table.

use super::event::{Signal, Trigger};
use crate::core::{
    is_valid_request, should_continue, Context, Direction, DoorStatus, ElevatorState, Guard,
    Heading, Motion,
};
use std::fmt;

/// Context update performed when a transition fires, before the target
/// state's entry action.
pub(crate) type TransitionAction = Box<dyn Fn(&mut Context, &Signal) + Send + Sync>;

/// One row of the table: in `from`, on `on`, if `guard` holds, run `action`
/// and enter `to`.
pub(crate) struct Transition {
    pub from: ElevatorState,
    pub on: Trigger,
    pub to: ElevatorState,
    pub guard: Option<Guard<Context, Signal>>,
    pub action: TransitionAction,
}

impl Transition {
    fn new<A>(from: ElevatorState, on: Trigger, to: ElevatorState, action: A) -> Self
    where
        A: Fn(&mut Context, &Signal) + Send + Sync + 'static,
    {
        Self {
            from,
            to,
            on,
            guard: None,
            action: Box::new(action),
        }
    }

    fn when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Context, &Signal) -> bool + Send + Sync + 'static,
    {
        self.guard = Some(Guard::new(predicate));
        self
    }

    /// Check if this row applies (pure).
    pub fn can_execute(&self, state: &ElevatorState, context: &Context, signal: &Signal) -> bool {
        if *state != self.from || signal.trigger() != self.on {
            return false;
        }
        self.guard.as_ref().map_or(true, |g| g.check(context, signal))
    }
}

impl fmt::Debug for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("from", &self.from)
            .field("on", &self.on)
            .field("to", &self.to)
            .field("guarded", &self.guard.is_some())
            .finish()
    }
}

/// Build the full table. Rows are tried in order, so each guarded row comes
/// before its unguarded fallback.
pub(crate) fn table() -> Vec<Transition> {
    let mut rows = Vec::new();

    for heading in [Heading::Up, Heading::Down] {
        let going = ElevatorState::Moving(Motion::Going(heading));

        rows.push(Transition::new(
            ElevatorState::Idle,
            Trigger::Call(heading),
            ElevatorState::DoorOpen(heading),
            move |ctx, _| {
                ctx.direction = heading.into();
                ctx.door_status = DoorStatus::Open;
                ctx.selection_enabled = true;
            },
        ));

        rows.push(
            Transition::new(ElevatorState::DoorOpen(heading), Trigger::Select, going, |ctx, signal| {
                if let Signal::Select(level) = signal {
                    ctx.target_level = *level;
                }
                ctx.door_status = DoorStatus::Closed;
                ctx.requested_level = None;
                ctx.selection_enabled = false;
            })
            .when(move |ctx, signal| match signal {
                Signal::Select(level) => is_valid_request(heading, ctx.current_level, *level),
                _ => false,
            }),
        );

        rows.push(Transition::new(
            ElevatorState::DoorOpen(heading),
            Trigger::Select,
            ElevatorState::Redirect(heading),
            |ctx, signal| {
                if let Signal::Select(level) = signal {
                    ctx.requested_level = Some(*level);
                }
                ctx.door_status = DoorStatus::Closed;
                ctx.selection_enabled = false;
            },
        ));

        // Self-transition: re-entering `going` re-runs the arrival check.
        rows.push(
            Transition::new(going, Trigger::Tick, going, move |ctx, _| {
                ctx.current_level += heading.step();
            })
            .when(move |ctx, _| should_continue(heading, ctx.current_level, ctx.target_level)),
        );

        rows.push(Transition::new(going, Trigger::Arrived, ElevatorState::ARRIVED, |ctx, _| {
            ctx.door_status = DoorStatus::Open;
        }));

        let redirected = heading.opposite();
        rows.push(Transition::new(
            ElevatorState::Redirect(heading),
            Trigger::Arrived,
            ElevatorState::Moving(Motion::Going(redirected)),
            move |ctx, _| {
                ctx.direction = redirected.into();
                ctx.target_level = ctx.requested_level.take().unwrap_or(ctx.current_level);
            },
        ));
    }

    rows.push(Transition::new(
        ElevatorState::ARRIVED,
        Trigger::DwellElapsed,
        ElevatorState::Idle,
        |ctx, _| {
            ctx.direction = Direction::None;
            ctx.door_status = DoorStatus::Closed;
            ctx.selection_enabled = false;
            ctx.target_level = ctx.current_level;
        },
    ));

    rows
}
