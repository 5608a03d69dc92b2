use crate::game_state::GameState;
use crate::mark::Mark;

/// Score of a decided win. Larger than any heuristic total: a grid of
/// dimension n has fewer than 4n² windows, each scoring at most n.
pub const WIN_SCORE: i64 = 1 << 48;

pub fn evaluate(state: &GameState, maximizer: Mark, heuristic: bool) -> i64 {
    match state.winner() {
        Some(winner) if winner == maximizer => WIN_SCORE,
        Some(_) => -WIN_SCORE,
        None if state.is_draw() => 0,
        None if heuristic => heuristic_score(state, maximizer),
        None => 0,
    }
}

/// Sum over windows of how far each side has got along lines that can
/// still be completed, maximizer minus opponent.
pub fn heuristic_score(state: &GameState, maximizer: Mark) -> i64 {
    let grid = state.grid();
    let run_length = state.run_length();
    let minimizer = maximizer.other();

    let mut max_score = 0;
    let mut min_score = 0;
    for window in grid.potential_win_windows(run_length) {
        let line = grid.marks_at(&window);
        max_score += evaluate_line(&line, maximizer, run_length);
        min_score += evaluate_line(&line, minimizer, run_length);
    }
    max_score - min_score
}

/// Splits `line` on the opponent's marks and returns the highest count of
/// `player` marks in a segment. Interior segments shorter than `run_length`
/// are dead and ignored.
pub fn evaluate_line(line: &[Mark], player: Mark, run_length: usize) -> i64 {
    let opponent = player.other();
    let segments: Vec<&[Mark]> = line.split(|&mark| mark == opponent).collect();
    let last = segments.len() - 1;

    segments
        .iter()
        .enumerate()
        .filter(|(i, segment)| {
            let interior = *i > 0 && *i < last;
            !segment.is_empty() && !(interior && segment.len() < run_length)
        })
        .map(|(_, segment)| segment.iter().filter(|&&mark| mark == player).count() as i64)
        .max()
        .unwrap_or(0)
}
