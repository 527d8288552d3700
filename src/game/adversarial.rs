//! Depth-limited minimax, alpha-beta and expectimax search
//!
//! The recursion returns a `(value, action)` pair at every node, so the
//! root's choice comes straight out of the search rather than being
//! reconstructed from recorded child values.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::state::{EvaluationFunction, GameState, ScoreEvaluation};
use crate::{
    config::AdversarialConfig,
    error::{Error, Result},
};

/// How opponent (non-zero index) agents are modelled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AdversarialStrategy {
    /// Opponents minimize agent 0's value
    #[default]
    Minimax,
    /// Minimax with an (alpha, beta) window; same result, fewer nodes
    AlphaBeta,
    /// Opponents choose uniformly at random among their legal actions
    Expectimax,
}

impl AdversarialStrategy {
    pub const ALL: [AdversarialStrategy; 3] = [
        AdversarialStrategy::Minimax,
        AdversarialStrategy::AlphaBeta,
        AdversarialStrategy::Expectimax,
    ];
}

impl fmt::Display for AdversarialStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AdversarialStrategy::Minimax => "minimax",
            AdversarialStrategy::AlphaBeta => "alpha-beta",
            AdversarialStrategy::Expectimax => "expectimax",
        };
        f.write_str(label)
    }
}

impl FromStr for AdversarialStrategy {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "minimax" => Ok(AdversarialStrategy::Minimax),
            "alpha-beta" | "alphabeta" | "alpha_beta" => Ok(AdversarialStrategy::AlphaBeta),
            "expectimax" => Ok(AdversarialStrategy::Expectimax),
            _ => Err(Error::ParseStrategy {
                input: s.to_string(),
                expected: "minimax, alpha-beta, expectimax".to_string(),
            }),
        }
    }
}

/// Outcome of a root search
#[derive(Debug, Clone, PartialEq)]
pub struct Decision<A> {
    /// Chosen action for agent 0, `None` when it has no legal non-stop action
    pub action: Option<A>,
    /// Backed-up value of the root
    pub value: f64,
    /// Nodes visited, root included
    pub nodes: usize,
}

/// Game-tree search agent for agent 0
#[derive(Debug, Clone)]
pub struct AdversarialSearch<E = ScoreEvaluation> {
    strategy: AdversarialStrategy,
    depth: usize,
    evaluation: E,
}

impl AdversarialSearch<ScoreEvaluation> {
    /// Search agent that evaluates leaves by game score
    pub fn from_config(config: &AdversarialConfig) -> Self {
        Self::new(config.strategy, config.depth, ScoreEvaluation)
    }
}

impl<E> AdversarialSearch<E> {
    /// `depth` counts full rounds: every agent moves once per round.
    pub fn new(strategy: AdversarialStrategy, depth: usize, evaluation: E) -> Self {
        Self {
            strategy,
            depth,
            evaluation,
        }
    }

    pub fn minimax(depth: usize, evaluation: E) -> Self {
        Self::new(AdversarialStrategy::Minimax, depth, evaluation)
    }

    pub fn alpha_beta(depth: usize, evaluation: E) -> Self {
        Self::new(AdversarialStrategy::AlphaBeta, depth, evaluation)
    }

    pub fn expectimax(depth: usize, evaluation: E) -> Self {
        Self::new(AdversarialStrategy::Expectimax, depth, evaluation)
    }

    pub fn strategy(&self) -> AdversarialStrategy {
        self.strategy
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Best action for agent 0 in `state`
    pub fn get_action<S>(&self, state: &S) -> Result<Option<S::Action>>
    where
        S: GameState,
        E: EvaluationFunction<S>,
    {
        Ok(self.decide(state)?.action)
    }

    /// Search from `state` and report the chosen action, root value and node count.
    ///
    /// The root is always expanded, so with `depth == 0` the evaluation
    /// function is applied to the root's children. Ties between root
    /// actions go to the first in enumeration order.
    pub fn decide<S>(&self, state: &S) -> Result<Decision<S::Action>>
    where
        S: GameState,
        E: EvaluationFunction<S>,
    {
        let num_agents = state.num_agents();
        if num_agents == 0 {
            return Err(Error::NoAgents);
        }

        let mut walk = Walk {
            evaluation: &self.evaluation,
            strategy: self.strategy,
            num_agents,
            horizon: self.depth * num_agents,
            nodes: 0,
        };
        let (value, action) = walk.value(state, 0, f64::NEG_INFINITY, f64::INFINITY);

        debug!(
            strategy = %self.strategy,
            depth = self.depth,
            value,
            nodes = walk.nodes,
            found = action.is_some(),
            "adversarial search finished"
        );

        Ok(Decision {
            action,
            value,
            nodes: walk.nodes,
        })
    }
}

struct Walk<'a, E> {
    evaluation: &'a E,
    strategy: AdversarialStrategy,
    num_agents: usize,
    horizon: usize,
    nodes: usize,
}

impl<E> Walk<'_, E> {
    fn value<S>(&mut self, state: &S, ply: usize, alpha: f64, beta: f64) -> (f64, Option<S::Action>)
    where
        S: GameState,
        E: EvaluationFunction<S>,
    {
        self.nodes += 1;

        if ply > 0 && (ply >= self.horizon || state.is_over()) {
            return (self.evaluation.evaluate(state), None);
        }

        let agent = ply % self.num_agents;
        let actions: Vec<S::Action> = state
            .legal_actions(agent)
            .into_iter()
            .filter(|action| !S::is_stop(action))
            .collect();

        // A stuck agent ends the line of play here.
        if actions.is_empty() {
            return (self.evaluation.evaluate(state), None);
        }

        if agent == 0 {
            self.max_value(state, agent, ply, actions, alpha, beta)
        } else if self.strategy == AdversarialStrategy::Expectimax {
            self.chance_value(state, agent, ply, actions)
        } else {
            self.min_value(state, agent, ply, actions, alpha, beta)
        }
    }

    fn max_value<S>(
        &mut self,
        state: &S,
        agent: usize,
        ply: usize,
        actions: Vec<S::Action>,
        mut alpha: f64,
        beta: f64,
    ) -> (f64, Option<S::Action>)
    where
        S: GameState,
        E: EvaluationFunction<S>,
    {
        let prune = self.strategy == AdversarialStrategy::AlphaBeta;
        let mut best_value = f64::NEG_INFINITY;
        let mut best_action = None;

        for action in actions {
            let successor = state.generate_successor(agent, &action);
            let (value, _) = self.value(&successor, ply + 1, alpha, beta);
            if ply == 0 {
                trace!(value, "root candidate");
            }

            if best_action.is_none() || value > best_value {
                best_value = value;
                best_action = Some(action);
            }

            if prune {
                if best_value > alpha {
                    alpha = best_value;
                }
                if alpha > beta {
                    break;
                }
            }
        }

        (best_value, best_action)
    }

    fn min_value<S>(
        &mut self,
        state: &S,
        agent: usize,
        ply: usize,
        actions: Vec<S::Action>,
        alpha: f64,
        mut beta: f64,
    ) -> (f64, Option<S::Action>)
    where
        S: GameState,
        E: EvaluationFunction<S>,
    {
        let prune = self.strategy == AdversarialStrategy::AlphaBeta;
        let mut best_value = f64::INFINITY;
        let mut best_action = None;

        for action in actions {
            let successor = state.generate_successor(agent, &action);
            let (value, _) = self.value(&successor, ply + 1, alpha, beta);

            if best_action.is_none() || value < best_value {
                best_value = value;
                best_action = Some(action);
            }

            if prune {
                if best_value < beta {
                    beta = best_value;
                }
                if alpha > beta {
                    break;
                }
            }
        }

        (best_value, best_action)
    }

    fn chance_value<S>(
        &mut self,
        state: &S,
        agent: usize,
        ply: usize,
        actions: Vec<S::Action>,
    ) -> (f64, Option<S::Action>)
    where
        S: GameState,
        E: EvaluationFunction<S>,
    {
        let count = actions.len() as f64;
        let total: f64 = actions
            .iter()
            .map(|action| {
                let successor = state.generate_successor(agent, action);
                self.value(&successor, ply + 1, f64::NEG_INFINITY, f64::INFINITY)
                    .0
            })
            .sum();

        (total / count, None)
    }
}
