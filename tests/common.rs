//! Common fixtures for the classic-agents test suite.
//!
//! Small explicit problems for each agent family: a weighted digraph for
//! graph search, explicit game trees for adversarial search and a tiny
//! MDP for value iteration.

#![allow(dead_code)]

use classic_agents::{GameState, MarkovDecisionProcess, SearchProblem, search::Successor};
use rand::{Rng, rngs::StdRng};

pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[derive(Debug, Clone)]
struct Edge {
    from: &'static str,
    action: &'static str,
    to: &'static str,
    cost: f64,
}

/// Directed graph with named actions on its edges
#[derive(Debug, Clone)]
pub struct Graph {
    start: &'static str,
    goals: Vec<&'static str>,
    edges: Vec<Edge>,
}

impl Graph {
    pub fn new(start: &'static str, goals: &[&'static str]) -> Self {
        Self {
            start,
            goals: goals.to_vec(),
            edges: Vec::new(),
        }
    }

    pub fn edge(
        mut self,
        from: &'static str,
        action: &'static str,
        to: &'static str,
        cost: f64,
    ) -> Self {
        self.edges.push(Edge {
            from,
            action,
            to,
            cost,
        });
        self
    }

    /// State reached by replaying `actions` from the start, `None` on an illegal step
    pub fn follow(&self, actions: &[&'static str]) -> Option<&'static str> {
        actions.iter().try_fold(self.start, |state, action| {
            self.find(state, action).map(|edge| edge.to)
        })
    }

    fn find(&self, from: &str, action: &str) -> Option<&Edge> {
        self.edges
            .iter()
            .find(|edge| edge.from == from && edge.action == action)
    }
}

impl SearchProblem for Graph {
    type State = &'static str;
    type Action = &'static str;

    fn start_state(&self) -> &'static str {
        self.start
    }

    fn is_goal_state(&self, state: &&'static str) -> bool {
        self.goals.contains(state)
    }

    fn successors(&self, state: &&'static str) -> Vec<Successor<&'static str, &'static str>> {
        self.edges
            .iter()
            .filter(|edge| edge.from == *state)
            .map(|edge| Successor::new(edge.to, edge.action, edge.cost))
            .collect()
    }

    fn cost_of_actions(&self, actions: &[&'static str]) -> f64 {
        let mut state = self.start;
        let mut total = 0.0;
        for action in actions {
            match self.find(state, action) {
                Some(edge) => {
                    total += edge.cost;
                    state = edge.to;
                }
                None => return f64::INFINITY,
            }
        }
        total
    }
}

/// Explicit game tree: leaves carry scores, inner nodes list children
#[derive(Debug, Clone)]
pub enum Tree {
    Leaf(f64),
    Node(Vec<Tree>),
}

impl Tree {
    pub fn leaves(values: &[f64]) -> Self {
        Tree::Node(values.iter().copied().map(Tree::Leaf).collect())
    }
}

/// Random tree of exactly `depth` levels with one to three children per node
/// and integer leaf scores in `[-10, 10]`
pub fn random_tree(rng: &mut StdRng, depth: usize) -> Tree {
    if depth == 0 {
        return Tree::Leaf(f64::from(rng.random_range(-10i32..=10)));
    }
    let width = rng.random_range(1..=3);
    Tree::Node((0..width).map(|_| random_tree(rng, depth - 1)).collect())
}

/// Game played down a [`Tree`]; agents move in turn and pick a child index
#[derive(Debug, Clone)]
pub struct TreeGame {
    pub tree: Tree,
    pub agents: usize,
}

impl TreeGame {
    pub fn new(tree: Tree, agents: usize) -> Self {
        Self { tree, agents }
    }
}

impl GameState for TreeGame {
    type Action = usize;

    fn legal_actions(&self, _agent: usize) -> Vec<usize> {
        match &self.tree {
            Tree::Leaf(_) => Vec::new(),
            Tree::Node(children) => (0..children.len()).collect(),
        }
    }

    fn generate_successor(&self, _agent: usize, action: &usize) -> Self {
        let tree = match &self.tree {
            Tree::Node(children) => children[*action].clone(),
            Tree::Leaf(_) => panic!("no moves from a leaf"),
        };
        Self {
            tree,
            agents: self.agents,
        }
    }

    fn num_agents(&self) -> usize {
        self.agents
    }

    fn is_win(&self) -> bool {
        false
    }

    fn is_lose(&self) -> bool {
        false
    }

    fn score(&self) -> f64 {
        match self.tree {
            Tree::Leaf(value) => value,
            Tree::Node(_) => 0.0,
        }
    }
}

/// Expectimax value computed directly on the tree, without a horizon
pub fn expectimax_value(tree: &Tree, ply: usize, agents: usize) -> f64 {
    match tree {
        Tree::Leaf(value) => *value,
        Tree::Node(children) => {
            let values = children
                .iter()
                .map(|child| expectimax_value(child, ply + 1, agents));
            if ply % agents == 0 {
                values.fold(f64::NEG_INFINITY, f64::max)
            } else {
                values.sum::<f64>() / children.len() as f64
            }
        }
    }
}

/// One live state with two actions plus an absorbing terminal state.
///
/// `stay` earns 1 and remains in `Live`. `gamble` earns 4 and ends the
/// episode with probability 1/2, otherwise earns nothing and remains.
#[derive(Debug, Clone, Copy)]
pub struct Gamble;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Room {
    Live,
    Done,
}

impl MarkovDecisionProcess for Gamble {
    type State = Room;
    type Action = &'static str;

    fn states(&self) -> Vec<Room> {
        vec![Room::Live, Room::Done]
    }

    fn possible_actions(&self, state: &Room) -> Vec<&'static str> {
        match state {
            Room::Live => vec!["stay", "gamble"],
            Room::Done => Vec::new(),
        }
    }

    fn transition_states_and_probs(&self, _state: &Room, action: &&'static str) -> Vec<(Room, f64)> {
        match *action {
            "gamble" => vec![(Room::Done, 0.5), (Room::Live, 0.5)],
            _ => vec![(Room::Live, 1.0)],
        }
    }

    fn reward(&self, _state: &Room, action: &&'static str, next_state: &Room) -> f64 {
        match (*action, next_state) {
            ("stay", _) => 1.0,
            ("gamble", Room::Done) => 4.0,
            _ => 0.0,
        }
    }

    fn is_terminal(&self, state: &Room) -> bool {
        *state == Room::Done
    }
}

/// Deterministic chain `0 -> 1 -> 2` where only the last step pays.
///
/// States are listed back to front so that an in-place sweep would
/// propagate values further than a synchronous one.
#[derive(Debug, Clone, Copy)]
pub struct Chain;

impl MarkovDecisionProcess for Chain {
    type State = u8;
    type Action = ();

    fn states(&self) -> Vec<u8> {
        vec![1, 0, 2]
    }

    fn possible_actions(&self, state: &u8) -> Vec<()> {
        if *state < 2 { vec![()] } else { Vec::new() }
    }

    fn transition_states_and_probs(&self, state: &u8, _action: &()) -> Vec<(u8, f64)> {
        vec![(state + 1, 1.0)]
    }

    fn reward(&self, _state: &u8, _action: &(), next_state: &u8) -> f64 {
        if *next_state == 2 { 1.0 } else { 0.0 }
    }

    fn is_terminal(&self, state: &u8) -> bool {
        *state == 2
    }
}

/// `Start` offers two equally good moves into `Stuck`, a state that is not
/// terminal but has no actions.
#[derive(Debug, Clone, Copy)]
pub struct Fork;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Junction {
    Start,
    Stuck,
}

impl MarkovDecisionProcess for Fork {
    type State = Junction;
    type Action = &'static str;

    fn states(&self) -> Vec<Junction> {
        vec![Junction::Start, Junction::Stuck]
    }

    fn possible_actions(&self, state: &Junction) -> Vec<&'static str> {
        match state {
            Junction::Start => vec!["left", "right"],
            Junction::Stuck => Vec::new(),
        }
    }

    fn transition_states_and_probs(
        &self,
        _state: &Junction,
        _action: &&'static str,
    ) -> Vec<(Junction, f64)> {
        vec![(Junction::Stuck, 1.0)]
    }

    fn reward(&self, _state: &Junction, _action: &&'static str, _next_state: &Junction) -> f64 {
        1.0
    }

    fn is_terminal(&self, _state: &Junction) -> bool {
        false
    }
}
