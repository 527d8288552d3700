//! Batch value iteration

use tracing::debug;

use super::process::{MarkovDecisionProcess, ValueEstimation};
use crate::{
    config::ValueIterationConfig,
    counter::Counter,
    error::{Error, Result},
};

/// Runs a fixed number of synchronous Bellman backups on construction and
/// then acts greedily with respect to the frozen value table.
pub struct ValueIterationAgent<M: MarkovDecisionProcess> {
    mdp: M,
    discount: f64,
    iterations: usize,
    values: Counter<M::State>,
}

impl<M: MarkovDecisionProcess> ValueIterationAgent<M> {
    /// Plan over `mdp` with discount factor `discount` for `iterations` sweeps.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDiscount`] if `discount` is outside `[0, 1]`.
    pub fn new(mdp: M, discount: f64, iterations: usize) -> Result<Self> {
        if !(0.0..=1.0).contains(&discount) {
            return Err(Error::InvalidDiscount { value: discount });
        }

        let mut agent = Self {
            mdp,
            discount,
            iterations,
            values: Counter::new(),
        };
        for sweep in 0..iterations {
            let residual = agent.sweep();
            debug!(sweep, residual, "value iteration sweep");
        }
        Ok(agent)
    }

    pub fn from_config(mdp: M, config: &ValueIterationConfig) -> Result<Self> {
        Self::new(mdp, config.discount, config.iterations)
    }

    pub fn discount(&self) -> f64 {
        self.discount
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn mdp(&self) -> &M {
        &self.mdp
    }

    /// The frozen value table; states never written read as zero
    pub fn values(&self) -> &Counter<M::State> {
        &self.values
    }

    /// One Bellman backup of every state against the previous table.
    /// Returns the largest absolute change.
    fn sweep(&mut self) -> f64 {
        let mut next = Counter::new();
        let mut residual = 0.0f64;

        for state in self.mdp.states() {
            let value = if self.mdp.is_terminal(&state) {
                0.0
            } else {
                self.mdp
                    .possible_actions(&state)
                    .iter()
                    .map(|action| self.q_value(&state, action))
                    .reduce(f64::max)
                    .unwrap_or(0.0)
            };
            residual = residual.max((value - self.values.get(&state)).abs());
            next.set(state, value);
        }

        self.values = next;
        residual
    }
}

impl<M: MarkovDecisionProcess> ValueEstimation for ValueIterationAgent<M> {
    type State = M::State;
    type Action = M::Action;

    fn value(&self, state: &M::State) -> f64 {
        self.values.get(state)
    }

    fn q_value(&self, state: &M::State, action: &M::Action) -> f64 {
        self.mdp
            .transition_states_and_probs(state, action)
            .iter()
            .map(|(next_state, probability)| {
                let reward = self.mdp.reward(state, action, next_state);
                probability * (reward + self.discount * self.values.get(next_state))
            })
            .sum()
    }

    /// Ties go to the first action in enumeration order.
    fn policy(&self, state: &M::State) -> Option<M::Action> {
        if self.mdp.is_terminal(state) {
            return None;
        }

        let mut best: Option<(M::Action, f64)> = None;
        for action in self.mdp.possible_actions(state) {
            let q = self.q_value(state, &action);
            match &best {
                Some((_, best_q)) if q <= *best_q => {}
                _ => best = Some((action, q)),
            }
        }
        best.map(|(action, _)| action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Single state "loop" with action "stay" paying 1 forever
    struct Loop;

    impl MarkovDecisionProcess for Loop {
        type State = &'static str;
        type Action = &'static str;

        fn states(&self) -> Vec<&'static str> {
            vec!["loop"]
        }

        fn possible_actions(&self, _state: &&'static str) -> Vec<&'static str> {
            vec!["stay"]
        }

        fn transition_states_and_probs(
            &self,
            state: &&'static str,
            _action: &&'static str,
        ) -> Vec<(&'static str, f64)> {
            vec![(*state, 1.0)]
        }

        fn reward(&self, _: &&'static str, _: &&'static str, _: &&'static str) -> f64 {
            1.0
        }

        fn is_terminal(&self, _state: &&'static str) -> bool {
            false
        }
    }

    #[test]
    fn zero_iterations_leave_all_values_zero() {
        let agent = ValueIterationAgent::new(Loop, 0.9, 0).unwrap();
        assert_eq!(agent.value(&"loop"), 0.0);
        assert!(agent.values().is_empty());
        assert_eq!(agent.policy(&"loop"), Some("stay"));
    }

    #[test]
    fn values_follow_geometric_series() {
        let agent = ValueIterationAgent::new(Loop, 0.5, 3).unwrap();
        // 1 + 0.5 + 0.25
        assert!((agent.value(&"loop") - 1.75).abs() < 1e-12);
        assert!((agent.q_value(&"loop", &"stay") - 1.875).abs() < 1e-12);
    }

    #[test]
    fn discount_out_of_range_is_rejected() {
        assert!(matches!(
            ValueIterationAgent::new(Loop, 1.5, 1),
            Err(Error::InvalidDiscount { .. })
        ));
        assert!(ValueIterationAgent::new(Loop, f64::NAN, 1).is_err());
    }

    #[test]
    fn unseen_states_read_zero() {
        let agent = ValueIterationAgent::new(Loop, 0.9, 5).unwrap();
        assert_eq!(agent.value(&"elsewhere"), 0.0);
    }
}
