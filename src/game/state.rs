//! Multi-agent game state and evaluation interfaces

/// Turn-based game with one maximizing agent and any number of opponents.
///
/// Agent 0 maximizes; agents `1..num_agents()` are adversaries or chance
/// agents, moving in cyclic index order. States are immutable values.
pub trait GameState: Sized {
    type Action: Clone + PartialEq;

    fn legal_actions(&self, agent: usize) -> Vec<Self::Action>;

    fn generate_successor(&self, agent: usize, action: &Self::Action) -> Self;

    fn num_agents(&self) -> usize;

    fn is_win(&self) -> bool;

    fn is_lose(&self) -> bool;

    /// Current game score, used by [`ScoreEvaluation`]
    fn score(&self) -> f64;

    /// Whether `action` is the no-op "stop" move. Stop moves are never
    /// considered by game-tree search.
    fn is_stop(_action: &Self::Action) -> bool {
        false
    }

    fn is_over(&self) -> bool {
        self.is_win() || self.is_lose()
    }
}

/// Static evaluation of a game state from agent 0's point of view
pub trait EvaluationFunction<S> {
    fn evaluate(&self, state: &S) -> f64;
}

/// Default evaluation: the state's own score
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreEvaluation;

impl<S: GameState> EvaluationFunction<S> for ScoreEvaluation {
    fn evaluate(&self, state: &S) -> f64 {
        state.score()
    }
}

impl<S, F> EvaluationFunction<S> for F
where
    F: Fn(&S) -> f64,
{
    fn evaluate(&self, state: &S) -> f64 {
        self(state)
    }
}
