use crate::error::{GameError, MoveRejection};
use crate::game_state::GameState;
use crate::grid::{Grid, MIN_DIMENSION, MarkCounts};
use crate::mark::Mark;

pub fn validate_dimension(dimension: usize) -> Result<(), GameError> {
    if dimension < MIN_DIMENSION {
        return Err(GameError::InvalidDimension(dimension));
    }
    Ok(())
}

pub fn validate_grid_size(dimension: usize, cell_count: usize) -> Result<(), GameError> {
    let expected = dimension * dimension;
    if cell_count != expected {
        return Err(GameError::InvalidSize {
            expected,
            actual: cell_count,
        });
    }
    Ok(())
}

pub fn validate_run_length(run_length: usize, dimension: usize) -> Result<(), GameError> {
    if run_length < MIN_DIMENSION || run_length > dimension {
        return Err(GameError::InvalidRunLength {
            run_length,
            dimension,
        });
    }
    Ok(())
}

pub fn validate_game_state(
    grid: &Grid,
    starting_mark: Mark,
    run_length: usize,
    winner: Option<Mark>,
) -> Result<(), GameError> {
    validate_run_length(run_length, grid.dimension())?;
    let counts = grid.mark_counts();
    validate_number_of_marks(&counts)?;
    validate_starting_mark(&counts, starting_mark)?;
    validate_winner(grid, &counts, starting_mark, run_length, winner)
}

fn validate_number_of_marks(counts: &MarkCounts) -> Result<(), GameError> {
    if counts.x.abs_diff(counts.o) > 1 {
        return Err(GameError::InvalidGameState(format!(
            "number of X ({}) and O ({}) marks must differ by at most one",
            counts.x, counts.o
        )));
    }
    Ok(())
}

fn validate_starting_mark(counts: &MarkCounts, starting_mark: Mark) -> Result<(), GameError> {
    if starting_mark.is_empty() {
        return Err(GameError::InvalidGameState(
            "starting mark must be X or O".to_string(),
        ));
    }
    for mark in [Mark::X, Mark::O] {
        if counts.of(mark) > counts.of(mark.other()) && starting_mark != mark {
            return Err(GameError::InvalidGameState(format!(
                "starting mark must be {} when it has more marks on the grid",
                mark
            )));
        }
    }
    Ok(())
}

fn validate_winner(
    grid: &Grid,
    counts: &MarkCounts,
    starting_mark: Mark,
    run_length: usize,
    winner: Option<Mark>,
) -> Result<(), GameError> {
    let Some(winner) = winner else {
        return Ok(());
    };

    let loser = winner.other();
    let loser_has_run = grid
        .potential_win_windows(run_length)
        .iter()
        .any(|window| window.iter().all(|&i| grid.cells()[i] == loser));
    if loser_has_run {
        return Err(GameError::InvalidGameState(
            "both players have a winning sequence".to_string(),
        ));
    }

    let winner_count = counts.of(winner);
    let loser_count = counts.of(loser);
    let started = winner == starting_mark;
    if started && winner_count <= loser_count {
        return Err(GameError::InvalidGameState(format!(
            "winner {} started and must have more marks than {}",
            winner, loser
        )));
    }
    if !started && winner_count != loser_count {
        return Err(GameError::InvalidGameState(format!(
            "winner {} moved second and must have as many marks as {}",
            winner, loser
        )));
    }
    Ok(())
}

pub fn validate_move(state: &GameState, index: usize) -> Result<(), GameError> {
    let reject = |reason| GameError::InvalidMove {
        position: index,
        reason,
    };

    let grid = state.grid();
    if index >= grid.cell_count() {
        return Err(reject(MoveRejection::OutOfBounds));
    }
    if state.has_ended() {
        return Err(reject(MoveRejection::GameOver));
    }
    if grid.is_occupied(index) {
        return Err(reject(MoveRejection::Occupied));
    }
    if state.has_started() && !grid.candidate_moves().contains(&index) {
        return Err(reject(MoveRejection::NotAdjacent));
    }
    Ok(())
}
