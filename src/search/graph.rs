//! Generic graph search over a `SearchProblem`
//!
//! All four strategies share one loop and differ only in the fringe they
//! use and the priority assigned to each pushed node.

use std::collections::HashSet;

use tracing::{debug, trace};

use super::{
    problem::{Heuristic, NullHeuristic, SearchProblem},
    strategy::SearchStrategy,
};
use crate::fringe::{Fringe, PriorityQueue, Queue, Stack};

/// Fringe entry: a state, the actions that reached it, and their summed step cost
#[derive(Debug, Clone)]
pub struct SearchNode<S, A> {
    pub state: S,
    pub actions: Vec<A>,
    pub cost: f64,
}

impl<S, A: Clone> SearchNode<S, A> {
    fn root(state: S) -> Self {
        Self {
            state,
            actions: Vec::new(),
            cost: 0.0,
        }
    }

    fn child(&self, state: S, action: A, step_cost: f64) -> Self {
        let mut actions = Vec::with_capacity(self.actions.len() + 1);
        actions.extend_from_slice(&self.actions);
        actions.push(action);
        Self {
            state,
            actions,
            cost: self.cost + step_cost,
        }
    }
}

/// Result of a search run
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome<A> {
    /// Actions from the start state to a goal, or `None` when the fringe ran dry
    pub actions: Option<Vec<A>>,
    /// Number of states expanded
    pub expanded: usize,
    /// `cost_of_actions` of the returned plan
    pub cost: Option<f64>,
}

impl<A> SearchOutcome<A> {
    pub fn is_exhausted(&self) -> bool {
        self.actions.is_none()
    }
}

/// Run graph search with the given fringe.
///
/// The goal test happens when a node is popped, before the visited check,
/// so the first goal popped in fringe order is returned. Each state is
/// expanded at most once. `priority` receives a successor's state and its
/// cumulative path cost.
pub fn graph_search<P, F, K>(problem: &P, mut fringe: F, priority: K) -> SearchOutcome<P::Action>
where
    P: SearchProblem + ?Sized,
    F: Fringe<SearchNode<P::State, P::Action>>,
    K: Fn(&P::State, f64) -> f64,
{
    let start = problem.start_state();
    let start_priority = priority(&start, 0.0);
    fringe.push(SearchNode::root(start), start_priority);

    let mut visited: HashSet<P::State> = HashSet::new();
    let mut expanded = 0usize;

    while let Some(node) = fringe.pop() {
        if problem.is_goal_state(&node.state) {
            let cost = problem.cost_of_actions(&node.actions);
            debug!(expanded, plan_length = node.actions.len(), cost, "goal reached");
            return SearchOutcome {
                actions: Some(node.actions),
                expanded,
                cost: Some(cost),
            };
        }

        if visited.contains(&node.state) {
            continue;
        }

        for successor in problem.successors(&node.state) {
            let child = node.child(successor.state, successor.action, successor.cost);
            let child_priority = priority(&child.state, child.cost);
            fringe.push(child, child_priority);
        }

        visited.insert(node.state);
        expanded += 1;
        trace!(expanded, fringe = fringe.len(), "expanded state");
    }

    debug!(expanded, "fringe exhausted without reaching a goal");
    SearchOutcome {
        actions: None,
        expanded,
        cost: None,
    }
}

/// Search the deepest nodes first
pub fn depth_first_search<P>(problem: &P) -> Option<Vec<P::Action>>
where
    P: SearchProblem + ?Sized,
{
    graph_search(problem, Stack::new(), |_, _| 0.0).actions
}

/// Search the shallowest nodes first; plans are shortest by action count
pub fn breadth_first_search<P>(problem: &P) -> Option<Vec<P::Action>>
where
    P: SearchProblem + ?Sized,
{
    graph_search(problem, Queue::new(), |_, _| 0.0).actions
}

/// Search the node of least cumulative path cost first
pub fn uniform_cost_search<P>(problem: &P) -> Option<Vec<P::Action>>
where
    P: SearchProblem + ?Sized,
{
    graph_search(problem, PriorityQueue::new(), |_, cost| cost).actions
}

/// Search the node of least path cost plus heuristic estimate first
pub fn a_star_search<P, H>(problem: &P, heuristic: &H) -> Option<Vec<P::Action>>
where
    P: SearchProblem + ?Sized,
    H: Heuristic<P> + ?Sized,
{
    a_star_outcome(problem, heuristic).actions
}

fn a_star_outcome<P, H>(problem: &P, heuristic: &H) -> SearchOutcome<P::Action>
where
    P: SearchProblem + ?Sized,
    H: Heuristic<P> + ?Sized,
{
    graph_search(problem, PriorityQueue::new(), |state, cost| {
        let estimate = heuristic.estimate(state, problem);
        debug_assert!(estimate >= 0.0, "heuristic estimates must be non-negative");
        cost + estimate
    })
}

/// Run the selected strategy, reporting expansion statistics.
///
/// `heuristic` is only consulted by A*.
pub fn search<P, H>(problem: &P, strategy: SearchStrategy, heuristic: &H) -> SearchOutcome<P::Action>
where
    P: SearchProblem + ?Sized,
    H: Heuristic<P> + ?Sized,
{
    match strategy {
        SearchStrategy::DepthFirst => graph_search(problem, Stack::new(), |_, _| 0.0),
        SearchStrategy::BreadthFirst => graph_search(problem, Queue::new(), |_, _| 0.0),
        SearchStrategy::UniformCost => graph_search(problem, PriorityQueue::new(), |_, cost| cost),
        SearchStrategy::AStar => a_star_outcome(problem, heuristic),
    }
}

/// Run the selected strategy without a heuristic
pub fn search_uninformed<P>(problem: &P, strategy: SearchStrategy) -> SearchOutcome<P::Action>
where
    P: SearchProblem + ?Sized,
{
    search(problem, strategy, &NullHeuristic)
}
