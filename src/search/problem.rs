//! Search problem and heuristic interfaces

use std::hash::Hash;

/// One transition out of a search state
#[derive(Debug, Clone, PartialEq)]
pub struct Successor<S, A> {
    pub state: S,
    pub action: A,
    pub cost: f64,
}

impl<S, A> Successor<S, A> {
    pub fn new(state: S, action: A, cost: f64) -> Self {
        Self {
            state,
            action,
            cost,
        }
    }
}

/// A deterministic state-transition problem.
///
/// States are immutable values; a transition always yields a new state.
/// Concrete problems (mazes, puzzles, route finding) are adapters that
/// implement this trait.
pub trait SearchProblem {
    type State: Clone + Eq + Hash;
    type Action: Clone;

    fn start_state(&self) -> Self::State;

    fn is_goal_state(&self, state: &Self::State) -> bool;

    /// Transitions out of `state` as `(next state, action, step cost)` triples
    fn successors(&self, state: &Self::State) -> Vec<Successor<Self::State, Self::Action>>;

    /// Total cost of a sequence of legal actions taken from the start state
    fn cost_of_actions(&self, actions: &[Self::Action]) -> f64;
}

impl<P: SearchProblem + ?Sized> SearchProblem for &P {
    type State = P::State;
    type Action = P::Action;

    fn start_state(&self) -> Self::State {
        (**self).start_state()
    }

    fn is_goal_state(&self, state: &Self::State) -> bool {
        (**self).is_goal_state(state)
    }

    fn successors(&self, state: &Self::State) -> Vec<Successor<Self::State, Self::Action>> {
        (**self).successors(state)
    }

    fn cost_of_actions(&self, actions: &[Self::Action]) -> f64 {
        (**self).cost_of_actions(actions)
    }
}

/// Estimate of the remaining cost from a state to the nearest goal.
///
/// Estimates must be non-negative. Admissibility and consistency are the
/// implementor's responsibility.
pub trait Heuristic<P: SearchProblem + ?Sized> {
    fn estimate(&self, state: &P::State, problem: &P) -> f64;
}

/// The trivial heuristic; A* with it behaves like uniform-cost search.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullHeuristic;

impl<P: SearchProblem + ?Sized> Heuristic<P> for NullHeuristic {
    fn estimate(&self, _state: &P::State, _problem: &P) -> f64 {
        0.0
    }
}

impl<P, F> Heuristic<P> for F
where
    P: SearchProblem + ?Sized,
    F: Fn(&P::State, &P) -> f64,
{
    fn estimate(&self, state: &P::State, problem: &P) -> f64 {
        self(state, problem)
    }
}
