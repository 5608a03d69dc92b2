use crate::error::GameError;
use crate::grid::Grid;
use crate::mark::Mark;
use crate::moves::Move;
use crate::notation::to_notation;
use crate::session_rng::SessionRng;
use crate::validate::{validate_game_state, validate_move};

pub const DEFAULT_RUN_LENGTH: usize = 3;

/// Immutable snapshot of a game. Every move yields a new state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    grid: Grid,
    starting_mark: Mark,
    run_length: usize,
    last_move_position: Option<usize>,
    winning_sequence: Vec<usize>,
}

impl GameState {
    pub fn new(grid: Grid, starting_mark: Mark, run_length: usize) -> Result<Self, GameError> {
        let winning_sequence = find_winning_sequence(&grid, run_length);
        let winner = winning_sequence.first().map(|&i| grid.cells()[i]);
        validate_game_state(&grid, starting_mark, run_length, winner)?;
        Ok(Self {
            grid,
            starting_mark,
            run_length,
            last_move_position: None,
            winning_sequence,
        })
    }

    pub fn empty(dimension: usize, run_length: usize, starting_mark: Mark) -> Result<Self, GameError> {
        Self::new(Grid::new(dimension)?, starting_mark, run_length)
    }

    /// State from a row-major string of 'X', 'O' and ' ' cells.
    pub fn parse(
        dimension: usize,
        run_length: usize,
        starting_mark: Mark,
        cells: &str,
    ) -> Result<Self, GameError> {
        Self::new(Grid::parse(dimension, cells)?, starting_mark, run_length)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn dimension(&self) -> usize {
        self.grid.dimension()
    }

    pub fn starting_mark(&self) -> Mark {
        self.starting_mark
    }

    pub fn run_length(&self) -> usize {
        self.run_length
    }

    pub fn last_move_position(&self) -> Option<usize> {
        self.last_move_position
    }

    pub fn last_move_notation(&self) -> Option<String> {
        self.last_move_position
            .map(|index| to_notation(index, self.dimension()))
    }

    pub fn current_mark(&self) -> Mark {
        let counts = self.grid.mark_counts();
        if counts.x == counts.o {
            self.starting_mark
        } else {
            self.starting_mark.other()
        }
    }

    pub fn has_started(&self) -> bool {
        self.grid.mark_counts().empty != self.grid.cell_count()
    }

    pub fn winning_sequence(&self) -> &[usize] {
        &self.winning_sequence
    }

    pub fn winner(&self) -> Option<Mark> {
        self.winning_sequence
            .first()
            .map(|&index| self.grid.cells()[index])
    }

    pub fn is_draw(&self) -> bool {
        self.winner().is_none() && self.grid.mark_counts().empty == 0
    }

    pub fn has_ended(&self) -> bool {
        self.has_started() && (self.winner().is_some() || self.is_draw())
    }

    /// Cells the side to move may mark: any cell before the first move,
    /// afterwards only empty cells next to a marked one.
    pub fn legal_positions(&self) -> Vec<usize> {
        if self.has_ended() {
            return Vec::new();
        }
        if !self.has_started() {
            return self.grid.empty_cells();
        }
        self.grid.candidate_moves()
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        self.legal_positions()
            .into_iter()
            .map(|index| self.move_to(index))
            .collect()
    }

    pub fn apply_move(&self, index: usize) -> Result<Move, GameError> {
        validate_move(self, index)?;
        Ok(self.move_to(index))
    }

    pub fn random_legal_move(&self, rng: &mut SessionRng) -> Option<Move> {
        let positions = self.legal_positions();
        rng.choose(&positions).map(|&index| self.move_to(index))
    }

    /// Successor for a cell already known to be legal. The successor
    /// inherits the invariants of `self`, so it is not re-validated.
    fn move_to(&self, index: usize) -> Move {
        let mark = self.current_mark();
        let grid = self.grid.with_mark(index, mark);
        let winning_sequence = find_winning_sequence(&grid, self.run_length);
        let next_state = GameState {
            grid,
            starting_mark: self.starting_mark,
            run_length: self.run_length,
            last_move_position: Some(index),
            winning_sequence,
        };
        Move::new(mark, index, self.clone(), next_state)
    }
}

fn find_winning_sequence(grid: &Grid, run_length: usize) -> Vec<usize> {
    let cells = grid.cells();
    grid.potential_win_windows(run_length)
        .into_iter()
        .find(|window| {
            let first = cells[window[0]];
            !first.is_empty() && window.iter().all(|&i| cells[i] == first)
        })
        .unwrap_or_default()
}
