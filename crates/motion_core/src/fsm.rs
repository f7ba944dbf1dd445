//! Typed phase machines
//!
//! A flat machine over `Copy` states and events. The playground uses one per
//! run cycle (idle, starting, running, cancelled). Transitions may carry a
//! predicate and side effects, and phases may run hooks when entered or left.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::fmt::Debug;
use std::hash::Hash;

/// Predicate checked before a transition is taken
pub type Guard = Box<dyn Fn() -> bool>;

/// Side effect run while a transition is taken
pub type Action = Box<dyn FnMut()>;

/// Taken edges kept unless the builder asks for another limit
pub const DEFAULT_HISTORY_LIMIT: usize = 64;

/// Edge from one phase to another, keyed by an event
pub struct Transition<S, E> {
    pub from_state: S,
    pub event: E,
    pub to_state: S,
    pub guard: Option<Guard>,
    pub actions: SmallVec<[Action; 2]>,
}

impl<S, E> Transition<S, E> {
    pub fn new(from: S, event: E, to: S) -> Self {
        Self {
            from_state: from,
            event,
            to_state: to,
            guard: None,
            actions: SmallVec::new(),
        }
    }

    /// Only take this edge while `guard` returns true
    pub fn with_guard<F: Fn() -> bool + 'static>(mut self, guard: F) -> Self {
        self.guard = Some(Box::new(guard));
        self
    }

    /// Run `action` between the exit and entry hooks
    pub fn with_action<F: FnMut() + 'static>(mut self, action: F) -> Self {
        self.actions.push(Box::new(action));
        self
    }

    fn matches(&self, current: S, event: E) -> bool
    where
        S: PartialEq,
        E: PartialEq,
    {
        self.from_state == current
            && self.event == event
            && self.guard.as_ref().map_or(true, |guard| guard())
    }
}

/// Collects edges and hooks before the machine starts
pub struct StateMachineBuilder<S, E> {
    initial_state: S,
    transitions: Vec<Transition<S, E>>,
    on_enter_hooks: FxHashMap<S, Vec<Action>>,
    on_exit_hooks: FxHashMap<S, Vec<Action>>,
    history_limit: usize,
}

impl<S, E> StateMachineBuilder<S, E>
where
    S: Copy + Eq + Hash + Debug,
    E: Copy + Eq + Debug,
{
    pub fn new(initial_state: S) -> Self {
        Self {
            initial_state,
            transitions: Vec::new(),
            on_enter_hooks: FxHashMap::default(),
            on_exit_hooks: FxHashMap::default(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }

    /// Keep at most `limit` taken edges; older ones are dropped first
    pub fn history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    pub fn transition(mut self, transition: Transition<S, E>) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Shorthand for an edge with no predicate or side effects
    pub fn on(mut self, from: S, event: E, to: S) -> Self {
        self.transitions.push(Transition::new(from, event, to));
        self
    }

    /// Hook run each time `state` becomes current
    pub fn on_enter<F: FnMut() + 'static>(mut self, state: S, action: F) -> Self {
        self.on_enter_hooks
            .entry(state)
            .or_default()
            .push(Box::new(action));
        self
    }

    /// Hook run each time `state` stops being current
    pub fn on_exit<F: FnMut() + 'static>(mut self, state: S, action: F) -> Self {
        self.on_exit_hooks
            .entry(state)
            .or_default()
            .push(Box::new(action));
        self
    }

    pub fn build(self) -> StateMachine<S, E> {
        StateMachine {
            current_state: self.initial_state,
            transitions: self.transitions,
            on_enter_hooks: self.on_enter_hooks,
            on_exit_hooks: self.on_exit_hooks,
            history: Vec::new(),
            history_limit: self.history_limit,
        }
    }
}

/// Running machine; owns its edges, hooks and a log of taken edges
pub struct StateMachine<S, E> {
    current_state: S,
    transitions: Vec<Transition<S, E>>,
    on_enter_hooks: FxHashMap<S, Vec<Action>>,
    on_exit_hooks: FxHashMap<S, Vec<Action>>,
    history: Vec<(S, E, S)>,
    history_limit: usize,
}

impl<S, E> StateMachine<S, E>
where
    S: Copy + Eq + Hash + Debug,
    E: Copy + Eq + Debug,
{
    /// Machine without hooks
    pub fn new(initial_state: S, transitions: Vec<Transition<S, E>>) -> Self {
        Self {
            current_state: initial_state,
            transitions,
            on_enter_hooks: FxHashMap::default(),
            on_exit_hooks: FxHashMap::default(),
            history: Vec::new(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }

    pub fn builder(initial_state: S) -> StateMachineBuilder<S, E> {
        StateMachineBuilder::new(initial_state)
    }

    pub fn current_state(&self) -> S {
        self.current_state
    }

    pub fn is_in(&self, state: S) -> bool {
        self.current_state == state
    }

    /// Most recent taken edges as `(from, event, to)`, oldest first
    pub fn history(&self) -> &[(S, E, S)] {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Whether `event` would move the machine right now
    pub fn can_send(&self, event: E) -> bool {
        let current = self.current_state;
        self.transitions.iter().any(|t| t.matches(current, event))
    }

    /// Feed an event and return the phase afterwards.
    ///
    /// The first matching edge wins. Unmatched events are dropped.
    pub fn send(&mut self, event: E) -> S {
        let current = self.current_state;

        let Some(idx) = self
            .transitions
            .iter()
            .position(|t| t.matches(current, event))
        else {
            tracing::trace!(?current, ?event, "no transition");
            return current;
        };

        let to_state = self.transitions[idx].to_state;

        run_hooks(self.on_exit_hooks.get_mut(&current));
        self.transitions[idx].actions.iter_mut().for_each(|action| action());

        self.current_state = to_state;
        self.record(current, event, to_state);
        tracing::trace!(from = ?current, ?event, to = ?to_state, "transition");

        run_hooks(self.on_enter_hooks.get_mut(&to_state));

        to_state
    }
}

impl<S, E> StateMachine<S, E> {
    fn record(&mut self, from: S, event: E, to: S) {
        if self.history_limit == 0 {
            return;
        }
        if self.history.len() == self.history_limit {
            self.history.remove(0);
        }
        self.history.push((from, event, to));
    }
}

fn run_hooks(hooks: Option<&mut Vec<Action>>) {
    for hook in hooks.into_iter().flatten() {
        hook();
    }
}
