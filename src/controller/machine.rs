//! The elevator controller: owns the context, the clock and the table.

use super::error::DispatchError;
use super::event::{Event, Signal};
use super::observer::{Observers, Snapshot, SubscriptionId};
use super::transition::{table, Transition};
use crate::clock::{Clock, FiredTimer, ManualClock, TimerHandle, TimerPurpose, TimerTag};
use crate::config::{ConfigError, ControllerConfig};
use crate::core::{
    has_arrived, Context, ElevatorState, Motion, State, StateHistory, StateTransition,
};
use chrono::Utc;
use log::{debug, info, trace, warn};
use std::collections::{HashMap, VecDeque};
use std::time::Duration;

/// Single-car elevator controller.
///
/// All mutation happens inside [`Controller::dispatch`] and
/// [`Controller::poll`]. Events raised while one is being processed are
/// queued and handled afterwards, in order, so processing is never
/// re-entered.
///
/// # Example
///
/// ```rust
/// use liftstate::{Controller, ControllerConfig, Direction, Event, ManualClock};
/// use std::time::Duration;
///
/// let mut lift = Controller::new(ControllerConfig::default(), ManualClock::new()).unwrap();
/// lift.dispatch(Event::Call(Direction::Up)).unwrap();
/// lift.dispatch(Event::Select(3)).unwrap();
/// assert_eq!(lift.snapshot().path, "Moving.GoingUp");
///
/// lift.advance(Duration::from_secs(2));
/// assert_eq!(lift.snapshot().path, "Moving.Arrived");
/// assert_eq!(lift.context().current_level, 3);
///
/// lift.advance(Duration::from_secs(1));
/// assert_eq!(lift.snapshot().path, "Idle");
/// ```
pub struct Controller<C: Clock> {
    config: ControllerConfig,
    clock: C,
    state: ElevatorState,
    context: Context,
    /// Bumped on every committed transition; timers carry the value they
    /// were scheduled under.
    generation: u64,
    transitions: Vec<Transition>,
    timers: HashMap<TimerPurpose, TimerHandle>,
    raised: VecDeque<Signal>,
    observers: Observers,
    history: StateHistory<ElevatorState>,
}

impl<C: Clock> Controller<C> {
    /// Create a controller in `Idle` on floor 1.
    pub fn new(config: ControllerConfig, clock: C) -> Result<Self, ConfigError> {
        config.validate()?;
        let history = StateHistory::with_limit(config.history_limit);
        Ok(Self {
            config,
            clock,
            state: ElevatorState::Idle,
            context: Context::default(),
            generation: 0,
            transitions: table(),
            timers: HashMap::new(),
            raised: VecDeque::new(),
            observers: Observers::default(),
            history,
        })
    }

    /// Send an event from the view.
    ///
    /// Malformed events and events the current state has no transition for
    /// are rejected without touching the context.
    pub fn dispatch(&mut self, event: Event) -> Result<(), DispatchError> {
        let signal = self.validate(event).map_err(|err| {
            warn!("Rejected {event}: {err}");
            err
        })?;

        if !self.step(&signal) {
            let err = DispatchError::NotHandled {
                event: event.to_string(),
                state: self.state.path(),
            };
            warn!("{err}");
            return Err(err);
        }
        self.drain();
        Ok(())
    }

    /// Fire every timer that is due, in deadline order. Returns how many
    /// timers were taken off the clock, stale ones included.
    pub fn poll(&mut self) -> usize {
        let mut fired = 0;
        while let Some(timer) = self.clock.pop_due() {
            fired += 1;
            self.fire(timer);
        }
        fired
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&Snapshot) + 'static,
    {
        self.observers.subscribe(Box::new(listener))
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(self.state, self.context, self.generation)
    }

    pub fn state(&self) -> ElevatorState {
        self.state
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn history(&self) -> &StateHistory<ElevatorState> {
        &self.history
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// When the next timer is due, on the clock's own time line.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.clock.next_deadline()
    }

    fn validate(&self, event: Event) -> Result<Signal, DispatchError> {
        match event {
            Event::Call(direction) => direction.heading().map(Signal::Call).ok_or_else(|| {
                DispatchError::InvalidEvent(format!(
                    "CALL direction must be up or down, got {direction}"
                ))
            }),
            Event::Select(level) if self.config.contains(level) => Ok(Signal::Select(level)),
            Event::Select(level) => Err(DispatchError::InvalidLevel {
                level,
                max_level: self.config.max_level,
            }),
        }
    }

    /// Run the first applicable transition for `signal`. Returns `false`,
    /// with nothing changed, if no row applies.
    fn step(&mut self, signal: &Signal) -> bool {
        let Some(index) = self
            .transitions
            .iter()
            .position(|t| t.can_execute(&self.state, &self.context, signal))
        else {
            return false;
        };

        let from = self.state;
        let to = self.transitions[index].to;
        (self.transitions[index].action)(&mut self.context, signal);

        self.exit(from);
        self.generation += 1;
        self.state = to;
        self.history.record(StateTransition {
            from,
            to,
            event: signal.to_string(),
            generation: self.generation,
            timestamp: Utc::now(),
        });
        debug!(
            "{} --{}--> {} (level {})",
            from, signal, to, self.context.current_level
        );

        self.enter(to);

        if !self.observers.is_empty() {
            let snapshot = self.snapshot();
            self.observers.notify(&snapshot);
        }
        true
    }

    /// Process signals raised by entry actions until none are left.
    fn drain(&mut self) {
        while let Some(signal) = self.raised.pop_front() {
            if !self.step(&signal) {
                warn!("Ignoring {signal} raised in {}", self.state);
            }
        }
    }

    fn exit(&mut self, state: ElevatorState) {
        if let Some(purpose) = timer_owned_by(state) {
            if let Some(handle) = self.timers.remove(&purpose) {
                self.clock.cancel(handle);
            }
        }
    }

    fn enter(&mut self, state: ElevatorState) {
        match state {
            ElevatorState::Moving(Motion::Going(_)) => {
                if has_arrived(self.context.current_level, self.context.target_level) {
                    self.raised.push_back(Signal::Arrived);
                } else {
                    self.schedule(TimerPurpose::Movement, self.config.tick_interval());
                }
            }
            ElevatorState::Moving(Motion::Arrived) => {
                self.schedule(TimerPurpose::ArrivalDwell, self.config.arrival_dwell());
            }
            ElevatorState::Redirect(heading) => {
                info!(
                    "Level {} is unreachable going {heading} from level {}; redirecting",
                    self.context.requested_level.unwrap_or(self.context.current_level),
                    self.context.current_level
                );
                self.schedule(TimerPurpose::ErrorDwell, self.config.error_dwell());
            }
            ElevatorState::Idle => {
                info!("Idle at level {}", self.context.current_level);
            }
            ElevatorState::DoorOpen(_) => {}
        }
    }

    /// Schedule a timer for `purpose`, replacing any outstanding one.
    fn schedule(&mut self, purpose: TimerPurpose, delay: Duration) {
        if let Some(previous) = self.timers.remove(&purpose) {
            self.clock.cancel(previous);
        }
        let tag = TimerTag {
            purpose,
            generation: self.generation,
        };
        let handle = self.clock.after(delay, tag);
        self.timers.insert(purpose, handle);
    }

    fn fire(&mut self, timer: FiredTimer) {
        let FiredTimer { handle, tag, .. } = timer;
        if self.timers.get(&tag.purpose) == Some(&handle) {
            self.timers.remove(&tag.purpose);
        }

        if tag.generation != self.generation {
            debug!(
                "Discarding stale {} timer from generation {} (now {})",
                tag.purpose, tag.generation, self.generation
            );
            return;
        }

        let signal = match tag.purpose {
            TimerPurpose::Movement => Signal::Tick,
            TimerPurpose::ArrivalDwell => Signal::DwellElapsed,
            TimerPurpose::ErrorDwell => Signal::Arrived,
        };
        trace!("{} timer fired in {}", tag.purpose, self.state);

        if !self.step(&signal) {
            warn!("Ignoring {signal} in {}; no transition applies", self.state);
            return;
        }
        self.drain();
    }
}

impl Controller<ManualClock> {
    /// Move virtual time forward by `by`, firing timers as their deadlines
    /// pass. Each timer fires with the clock set to its own deadline, so
    /// follow-up timers are scheduled relative to it.
    pub fn advance(&mut self, by: Duration) -> usize {
        let until = self.clock.now() + by;
        let mut fired = 0;
        while let Some(deadline) = self.clock.next_deadline() {
            if deadline > until {
                break;
            }
            self.clock.advance_to(deadline);
            fired += self.poll();
        }
        self.clock.advance_to(until);
        fired
    }

    /// Fire timers until none are left, i.e. the car is `Idle` or waiting
    /// for a floor selection.
    pub fn run_until_settled(&mut self) -> usize {
        let mut fired = 0;
        while let Some(deadline) = self.clock.next_deadline() {
            self.clock.advance_to(deadline);
            fired += self.poll();
        }
        fired
    }
}

/// The timer purpose a state schedules on entry, if any.
fn timer_owned_by(state: ElevatorState) -> Option<TimerPurpose> {
    match state {
        ElevatorState::Moving(Motion::Going(_)) => Some(TimerPurpose::Movement),
        ElevatorState::Moving(Motion::Arrived) => Some(TimerPurpose::ArrivalDwell),
        ElevatorState::Redirect(_) => Some(TimerPurpose::ErrorDwell),
        ElevatorState::Idle | ElevatorState::DoorOpen(_) => None,
    }
}

impl<C: Clock> std::fmt::Debug for Controller<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Controller")
            .field("state", &self.state)
            .field("context", &self.context)
            .field("generation", &self.generation)
            .field("timers", &self.timers)
            .field("observers", &self.observers)
            .finish()
    }
}
