//! Classic AI agents over pluggable problem definitions
//!
//! This crate provides:
//! - Graph search (DFS, BFS, UCS, A*) over any [`search::SearchProblem`]
//! - Minimax, alpha-beta and expectimax game-tree search plus a one-ply reflex agent
//! - Value iteration for finite Markov decision processes
//! - MIRA and Naive Bayes classifiers with validation-tuned hyperparameters
//! - Serde-backed configuration for every agent

pub mod classify;
pub mod config;
pub mod counter;
pub mod error;
pub mod fringe;
pub mod game;
pub mod mdp;
pub mod search;

pub use classify::{Classifier, Datum, MiraClassifier, NaiveBayesClassifier, accuracy};
pub use config::AgentsConfig;
pub use counter::Counter;
pub use error::{Error, Result};
pub use game::{AdversarialSearch, AdversarialStrategy, GameState, ReflexAgent};
pub use mdp::{MarkovDecisionProcess, ValueEstimation, ValueIterationAgent};
pub use search::{SearchOutcome, SearchProblem, SearchStrategy};
