//! Adversarial and stochastic game-tree search
//!
//! Agent 0 is the maximizer. Every other agent is either a minimizing
//! adversary (minimax, alpha-beta) or a uniform chance node (expectimax).
//! One search round lets every agent move once; the search horizon is
//! `depth * num_agents` plies, after which states are scored by an
//! [`EvaluationFunction`].

pub mod adversarial;
pub mod reflex;
pub mod state;

pub use adversarial::{AdversarialSearch, AdversarialStrategy, Decision};
pub use reflex::{ActionEvaluation, ReflexAgent, SuccessorScore};
pub use state::{EvaluationFunction, GameState, ScoreEvaluation};
