//! Property-based tests for the controller.
//!
//! These tests use proptest to check that movement, redirect and rejection
//! rules hold across many randomly generated floors and event sequences.

use liftstate::builder::ControllerBuilder;
use liftstate::core::{is_valid_request, Heading};
use liftstate::{
    Clock, Controller, Direction, DoorStatus, ElevatorState, Event, Level, ManualClock, State,
};
use proptest::prelude::*;
use std::time::Duration;

const MAX_LEVEL: Level = 8;

fn lift_at(level: Level) -> Controller<ManualClock> {
    let mut lift = ControllerBuilder::new()
        .max_level(MAX_LEVEL)
        .history_limit(256)
        .clock(ManualClock::new())
        .build()
        .unwrap();
    if level > 1 {
        lift.dispatch(Event::Call(Direction::Up)).unwrap();
        lift.dispatch(Event::Select(level)).unwrap();
        lift.run_until_settled();
    }
    lift
}

fn heading_towards(from: Level, to: Level) -> Heading {
    if to > from {
        Heading::Up
    } else {
        Heading::Down
    }
}

#[derive(Clone, Debug)]
enum Op {
    Call(Direction),
    Select(Level),
    Advance(u64),
}

prop_compose! {
    fn arbitrary_direction()(variant in 0..3u8) -> Direction {
        match variant {
            0 => Direction::Up,
            1 => Direction::Down,
            _ => Direction::None,
        }
    }
}

fn arbitrary_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        arbitrary_direction().prop_map(Op::Call),
        (-1..=MAX_LEVEL + 2).prop_map(Op::Select),
        (0..2500u64).prop_map(Op::Advance),
    ]
}

fn assert_invariants(lift: &Controller<ManualClock>) -> Result<(), TestCaseError> {
    let state = lift.state();
    let ctx = lift.context();

    prop_assert!((1..=MAX_LEVEL).contains(&ctx.current_level));
    prop_assert_eq!(ctx.direction == Direction::None, state == ElevatorState::Idle);
    prop_assert_eq!(
        ctx.selection_enabled,
        matches!(state, ElevatorState::DoorOpen(_))
    );
    prop_assert_eq!(ctx.requested_level.is_some(), state.is_error());
    if state.travelling().is_some() {
        prop_assert_eq!(ctx.door_status, DoorStatus::Closed);
    }
    if state == ElevatorState::Idle {
        prop_assert_eq!(ctx.target_level, ctx.current_level);
    }
    Ok(())
}

proptest! {
    #[test]
    fn select_at_or_below_while_heading_up_redirects(
        level in 1..=MAX_LEVEL,
        offset in 0..MAX_LEVEL,
    ) {
        let requested = (level - offset).max(1);
        let mut lift = lift_at(level);
        lift.dispatch(Event::Call(Direction::Up)).unwrap();
        lift.dispatch(Event::Select(requested)).unwrap();

        prop_assert_eq!(lift.state(), ElevatorState::Redirect(Heading::Up));
        prop_assert_eq!(lift.context().requested_level, Some(requested));
    }

    #[test]
    fn select_at_or_above_while_heading_down_redirects(
        level in 1..=MAX_LEVEL,
        offset in 0..MAX_LEVEL,
    ) {
        let requested = (level + offset).min(MAX_LEVEL);
        let mut lift = lift_at(level);
        lift.dispatch(Event::Call(Direction::Down)).unwrap();
        lift.dispatch(Event::Select(requested)).unwrap();

        prop_assert_eq!(lift.state(), ElevatorState::Redirect(Heading::Down));
    }

    #[test]
    fn tick_count_equals_distance_and_floors_are_visited_once(
        start in 1..=MAX_LEVEL,
        target in 1..=MAX_LEVEL,
    ) {
        prop_assume!(start != target);
        let mut lift = lift_at(start);
        let heading = heading_towards(start, target);
        let recorded_before = lift.history().len();

        lift.dispatch(Event::Call(heading.into())).unwrap();
        lift.dispatch(Event::Select(target)).unwrap();

        let mut levels = vec![lift.context().current_level];
        while lift.state() != ElevatorState::Idle {
            lift.advance(Duration::from_millis(100));
            let level = lift.context().current_level;
            if levels.last() != Some(&level) {
                levels.push(level);
            }
        }

        let ticks = lift
            .history()
            .transitions()
            .skip(recorded_before)
            .filter(|t| t.event == "TICK")
            .count();
        prop_assert_eq!(ticks as i32, (target - start).abs());

        let expected: Vec<Level> = if heading == Heading::Up {
            (start..=target).collect()
        } else {
            (target..=start).rev().collect()
        };
        prop_assert_eq!(levels, expected);
    }

    #[test]
    fn any_request_round_trips_to_idle_at_the_requested_floor(
        start in 1..=MAX_LEVEL,
        requested in 1..=MAX_LEVEL,
        up in any::<bool>(),
    ) {
        let heading = if up { Heading::Up } else { Heading::Down };
        let mut lift = lift_at(start);
        lift.dispatch(Event::Call(heading.into())).unwrap();
        lift.dispatch(Event::Select(requested)).unwrap();

        let redirected = !is_valid_request(heading, start, requested);
        prop_assert_eq!(lift.state().is_error(), redirected);

        lift.run_until_settled();
        prop_assert_eq!(lift.state(), ElevatorState::Idle);
        prop_assert_eq!(lift.context().current_level, requested);
        prop_assert_eq!(lift.context().direction, Direction::None);
    }

    #[test]
    fn out_of_range_select_never_changes_anything(
        level in prop_oneof![-5..=0, (MAX_LEVEL + 1)..=MAX_LEVEL + 5],
        up in any::<bool>(),
    ) {
        let mut lift = lift_at(1);
        lift.dispatch(Event::Call(if up { Direction::Up } else { Direction::Down })).unwrap();
        let before = lift.snapshot();

        prop_assert!(lift.dispatch(Event::Select(level)).is_err());
        prop_assert_eq!(lift.snapshot(), before);
    }

    #[test]
    fn invariants_hold_under_arbitrary_event_sequences(
        ops in prop::collection::vec(arbitrary_op(), 1..60)
    ) {
        let mut lift = lift_at(1);
        for op in ops {
            match op {
                Op::Call(direction) => {
                    let _ = lift.dispatch(Event::Call(direction));
                }
                Op::Select(level) => {
                    let _ = lift.dispatch(Event::Select(level));
                }
                Op::Advance(ms) => {
                    lift.advance(Duration::from_millis(ms));
                }
            }
            assert_invariants(&lift)?;
            prop_assert!(lift.clock().pending() <= 1);
        }
    }

    #[test]
    fn state_path_is_stable(
        ops in prop::collection::vec(arbitrary_op(), 0..20)
    ) {
        let mut lift = lift_at(1);
        for op in ops {
            match op {
                Op::Call(direction) => { let _ = lift.dispatch(Event::Call(direction)); }
                Op::Select(level) => { let _ = lift.dispatch(Event::Select(level)); }
                Op::Advance(ms) => { lift.advance(Duration::from_millis(ms)); }
            }
        }
        let snapshot = lift.snapshot();
        prop_assert_eq!(snapshot.path, lift.state().path());
    }
}
