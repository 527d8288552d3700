//! Markov decision process planning
//!
//! [`ValueIterationAgent`] computes state values with synchronous Bellman
//! backups, where each sweep reads only the table produced by the previous
//! sweep:
//!
//! ```text
//! Q(s, a)    = Σ_{s'} T(s, a, s') [R(s, a, s') + γ V_k(s')]
//! V_{k+1}(s) = max_a Q(s, a)        (0 for terminal or action-less states)
//! ```

pub mod process;
pub mod value_iteration;

pub use process::{MarkovDecisionProcess, ValueEstimation};
pub use value_iteration::ValueIterationAgent;
