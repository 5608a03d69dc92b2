use crate::error::GameError;
use crate::game_state::GameState;
use crate::mark::Mark;
use crate::moves::Move;
use crate::search::{SearchEngine, SearchSettings};
use crate::session_rng::SessionRng;

/// Anything that can pick a move for its mark.
pub trait Player {
    fn mark(&self) -> Mark;

    /// A move for the side to move, or `None` when the player has nothing to play.
    fn choose_move(
        &mut self,
        state: &GameState,
        rng: &mut SessionRng,
    ) -> Result<Option<Move>, GameError>;

    fn make_move(&mut self, state: &GameState, rng: &mut SessionRng) -> Result<GameState, GameError> {
        let expected = state.current_mark();
        if self.mark() != expected {
            return Err(GameError::WrongTurn {
                expected,
                actual: self.mark(),
            });
        }
        match self.choose_move(state, rng)? {
            Some(mv) => Ok(mv.next_state),
            None => Err(GameError::NoLegalMoves),
        }
    }
}

pub struct RandomPlayer {
    mark: Mark,
}

impl RandomPlayer {
    pub fn new(mark: Mark) -> Self {
        Self { mark }
    }
}

impl Player for RandomPlayer {
    fn mark(&self) -> Mark {
        self.mark
    }

    fn choose_move(
        &mut self,
        state: &GameState,
        rng: &mut SessionRng,
    ) -> Result<Option<Move>, GameError> {
        let positions = state.legal_positions();
        if positions.is_empty() {
            return Ok(None);
        }
        let index = rng.random_range(0..positions.len());
        state.apply_move(positions[index]).map(Some)
    }
}

pub struct SearchPlayer {
    mark: Mark,
    depth: usize,
    engine: SearchEngine,
    random_opening: bool,
}

impl SearchPlayer {
    pub fn new(mark: Mark, depth: usize, settings: SearchSettings) -> Self {
        Self {
            mark,
            depth,
            engine: SearchEngine::new(settings),
            random_opening: true,
        }
    }

    /// Search the first move too instead of opening on a random cell.
    pub fn with_searched_opening(mut self) -> Self {
        self.random_opening = false;
        self
    }

    pub fn depth(&self) -> usize {
        self.depth
    }
}

impl Player for SearchPlayer {
    fn mark(&self) -> Mark {
        self.mark
    }

    fn choose_move(
        &mut self,
        state: &GameState,
        rng: &mut SessionRng,
    ) -> Result<Option<Move>, GameError> {
        if state.has_ended() {
            return Ok(None);
        }
        if self.random_opening && !state.has_started() {
            return Ok(state.random_legal_move(rng));
        }
        self.engine
            .find_best_move(state, self.depth, true, rng)
            .map(Some)
    }
}
