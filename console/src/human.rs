use std::io::{self, BufRead, Cursor, Stdin};

use nrow_engine::{GameError, GameState, Mark, Move, Player, SessionRng, parse_notation};

/// Line source for a human player. `Stdin` locks per line, so two players
/// can share the terminal.
pub trait LineInput {
    /// Appends bytes up to and including the next newline; `Ok(0)` at end of input.
    fn read_line(&mut self, buf: &mut Vec<u8>) -> io::Result<usize>;
}

impl LineInput for Stdin {
    fn read_line(&mut self, buf: &mut Vec<u8>) -> io::Result<usize> {
        self.lock().read_until(b'\n', buf)
    }
}

impl<T: AsRef<[u8]>> LineInput for Cursor<T> {
    fn read_line(&mut self, buf: &mut Vec<u8>) -> io::Result<usize> {
        self.read_until(b'\n', buf)
    }
}

/// Reads one cell per line, e.g. "B2". A closed input yields no move.
pub struct HumanPlayer<R: LineInput> {
    mark: Mark,
    input: R,
}

impl<R: LineInput> HumanPlayer<R> {
    pub fn new(mark: Mark, input: R) -> Self {
        Self { mark, input }
    }
}

impl<R: LineInput> Player for HumanPlayer<R> {
    fn mark(&self) -> Mark {
        self.mark
    }

    fn choose_move(
        &mut self,
        state: &GameState,
        _rng: &mut SessionRng,
    ) -> Result<Option<Move>, GameError> {
        let mut bytes = Vec::new();
        match self.input.read_line(&mut bytes) {
            Ok(0) => return Ok(None),
            Ok(_) => {}
            Err(err) => return Err(GameError::Input(err.to_string())),
        }

        let line = String::from_utf8(bytes).map_err(|err| {
            GameError::InvalidNotation(String::from_utf8_lossy(err.as_bytes()).trim().to_string())
        })?;
        let position = parse_notation(line.trim(), state.dimension())?;
        state.apply_move(position).map(Some)
    }
}
