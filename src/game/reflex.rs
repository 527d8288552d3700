//! One-ply reflex agent

use rand::{SeedableRng, rngs::StdRng, seq::IndexedRandom};

use super::state::GameState;

/// Scores an action for agent 0 in the given state
pub trait ActionEvaluation<S: GameState> {
    fn evaluate(&self, state: &S, action: &S::Action) -> f64;
}

/// Scores an action by the game score of the state it leads to
#[derive(Debug, Clone, Copy, Default)]
pub struct SuccessorScore;

impl<S: GameState> ActionEvaluation<S> for SuccessorScore {
    fn evaluate(&self, state: &S, action: &S::Action) -> f64 {
        state.generate_successor(0, action).score()
    }
}

impl<S, F> ActionEvaluation<S> for F
where
    S: GameState,
    F: Fn(&S, &S::Action) -> f64,
{
    fn evaluate(&self, state: &S, action: &S::Action) -> f64 {
        self(state, action)
    }
}

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Picks the best-scoring legal action for agent 0, breaking ties uniformly at random
#[derive(Debug, Clone)]
pub struct ReflexAgent<F = SuccessorScore> {
    evaluation: F,
    rng: StdRng,
}

impl<F> ReflexAgent<F> {
    pub fn new(evaluation: F) -> Self {
        Self {
            evaluation,
            rng: build_rng(None),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = build_rng(Some(seed));
        self
    }

    /// Best legal action for agent 0, or `None` if it has no legal actions
    pub fn get_action<S>(&mut self, state: &S) -> Option<S::Action>
    where
        S: GameState,
        F: ActionEvaluation<S>,
    {
        let legal = state.legal_actions(0);
        let scores: Vec<f64> = legal
            .iter()
            .map(|action| self.evaluation.evaluate(state, action))
            .collect();
        let best = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let best_indices: Vec<usize> = scores
            .iter()
            .enumerate()
            .filter(|(_, score)| **score == best)
            .map(|(index, _)| index)
            .collect();

        let chosen = *best_indices.choose(&mut self.rng)?;
        Some(legal[chosen].clone())
    }
}

impl Default for ReflexAgent<SuccessorScore> {
    fn default() -> Self {
        Self::new(SuccessorScore)
    }
}
