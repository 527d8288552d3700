//! Markov decision process and value-estimation interfaces

use std::hash::Hash;

/// A finite Markov decision process.
///
/// Transition probabilities returned for a `(state, action)` pair sum to one.
pub trait MarkovDecisionProcess {
    type State: Clone + Eq + Hash;
    type Action: Clone;

    fn states(&self) -> Vec<Self::State>;

    fn possible_actions(&self, state: &Self::State) -> Vec<Self::Action>;

    /// `(next state, probability)` pairs for taking `action` in `state`
    fn transition_states_and_probs(
        &self,
        state: &Self::State,
        action: &Self::Action,
    ) -> Vec<(Self::State, f64)>;

    fn reward(&self, state: &Self::State, action: &Self::Action, next_state: &Self::State) -> f64;

    fn is_terminal(&self, state: &Self::State) -> bool;
}

impl<M: MarkovDecisionProcess + ?Sized> MarkovDecisionProcess for &M {
    type State = M::State;
    type Action = M::Action;

    fn states(&self) -> Vec<Self::State> {
        (**self).states()
    }

    fn possible_actions(&self, state: &Self::State) -> Vec<Self::Action> {
        (**self).possible_actions(state)
    }

    fn transition_states_and_probs(
        &self,
        state: &Self::State,
        action: &Self::Action,
    ) -> Vec<(Self::State, f64)> {
        (**self).transition_states_and_probs(state, action)
    }

    fn reward(&self, state: &Self::State, action: &Self::Action, next_state: &Self::State) -> f64 {
        (**self).reward(state, action, next_state)
    }

    fn is_terminal(&self, state: &Self::State) -> bool {
        (**self).is_terminal(state)
    }
}

/// Agent that answers value, Q-value and policy queries for an MDP
pub trait ValueEstimation {
    type State;
    type Action;

    /// V(s)
    fn value(&self, state: &Self::State) -> f64;

    /// Q(s, a)
    fn q_value(&self, state: &Self::State, action: &Self::Action) -> f64;

    /// Greedy action under the current estimates, `None` when no action applies
    fn policy(&self, state: &Self::State) -> Option<Self::Action>;

    /// Action to take in `state`. Defaults to the policy (no exploration).
    fn action(&self, state: &Self::State) -> Option<Self::Action> {
        self.policy(state)
    }
}
