//! Uninformed and informed graph search
//!
//! Depth-first, breadth-first, uniform-cost and A* search over any type
//! implementing [`SearchProblem`]. Search is graph search: a state is
//! expanded at most once, and failure to reach a goal is reported as
//! `None` rather than an error.
//!
//! ```
//! use classic_agents::search::{SearchProblem, Successor, breadth_first_search};
//!
//! struct TwoNodes;
//!
//! impl SearchProblem for TwoNodes {
//!     type State = char;
//!     type Action = &'static str;
//!
//!     fn start_state(&self) -> char {
//!         'A'
//!     }
//!
//!     fn is_goal_state(&self, state: &char) -> bool {
//!         *state == 'B'
//!     }
//!
//!     fn successors(&self, state: &char) -> Vec<Successor<char, &'static str>> {
//!         match state {
//!             'A' => vec![Successor::new('B', "East", 1.0)],
//!             _ => Vec::new(),
//!         }
//!     }
//!
//!     fn cost_of_actions(&self, actions: &[&'static str]) -> f64 {
//!         actions.len() as f64
//!     }
//! }
//!
//! assert_eq!(breadth_first_search(&TwoNodes), Some(vec!["East"]));
//! ```

pub mod graph;
pub mod problem;
pub mod strategy;

pub use graph::{
    SearchNode, SearchOutcome, a_star_search, breadth_first_search, depth_first_search,
    graph_search, search, search_uninformed, uniform_cost_search,
};
pub use problem::{Heuristic, NullHeuristic, SearchProblem, Successor};
pub use strategy::SearchStrategy;
