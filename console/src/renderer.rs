use nrow_engine::notation::column_name;
use nrow_engine::{GameState, Mark};

const EMPTY_CELL: char = '.';

/// Board with column letters on top and row numbers on the left. Cells of
/// the winning sequence are bracketed.
pub fn render_board(state: &GameState) -> String {
    let dimension = state.dimension();
    let cells = state.grid().cells();
    let winning = state.winning_sequence();
    let label_width = dimension.to_string().len();

    let mut lines = Vec::with_capacity(dimension + 1);
    let mut header = " ".repeat(label_width + 1);
    for column in 0..dimension {
        header.push_str(&format!(" {} ", column_name(column)));
    }
    lines.push(header);

    for (row, row_cells) in cells.chunks(dimension).enumerate() {
        let mut line = format!("{:>width$} ", row + 1, width = label_width);
        for (column, mark) in row_cells.iter().enumerate() {
            let symbol = match mark {
                Mark::Empty => EMPTY_CELL,
                mark => mark.to_char(),
            };
            if winning.contains(&(row * dimension + column)) {
                line.push_str(&format!("[{}]", symbol));
            } else {
                line.push_str(&format!(" {} ", symbol));
            }
        }
        lines.push(line);
    }

    lines
        .iter()
        .map(|line| format!("{}\n", line.trim_end()))
        .collect()
}

pub fn render_status(state: &GameState) -> String {
    let last_move = state
        .last_move_notation()
        .map(|notation| format!("Last move: {}. ", notation))
        .unwrap_or_default();

    let outcome = match state.winner() {
        Some(winner) => format!("{} wins!", winner),
        None if state.is_draw() => "Draw.".to_string(),
        None => format!("{} to move.", state.current_mark()),
    };
    format!("{}{}", last_move, outcome)
}
