use std::error::Error;
use std::io::Write;
use std::time::Duration;

use nrow_engine::{GameError, GameState, Mark, Player, SessionRng, log, to_notation};

use crate::renderer::{render_board, render_status};

pub struct Seat {
    pub player: Box<dyn Player>,
    /// Pause before this seat moves, so computer games can be followed.
    pub delay: Duration,
    pub prompt: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    Winner(Mark),
    Draw,
    /// A player stopped answering, e.g. stdin was closed.
    Abandoned,
}

pub fn run_match<W: Write>(
    mut state: GameState,
    mut seats: Vec<Seat>,
    rng: &mut SessionRng,
    out: &mut W,
) -> Result<MatchOutcome, Box<dyn Error>> {
    log!(
        "Match started: {}x{} board, run length {}, {} moves first",
        state.dimension(),
        state.dimension(),
        state.run_length(),
        state.starting_mark()
    );

    while !state.has_ended() {
        write!(out, "\n{}", render_board(&state))?;
        writeln!(out, "{}", render_status(&state))?;

        let mark = state.current_mark();
        let seat = seats
            .iter_mut()
            .find(|seat| seat.player.mark() == mark)
            .ok_or_else(|| format!("no player plays {}", mark))?;

        if !seat.delay.is_zero() {
            std::thread::sleep(seat.delay);
        }

        loop {
            if seat.prompt {
                write!(out, "{} > ", mark)?;
                out.flush()?;
            }
            match seat.player.make_move(&state, rng) {
                Ok(next) => {
                    if let Some(position) = next.last_move_position() {
                        log!("{} played {}", mark, to_notation(position, next.dimension()));
                    }
                    state = next;
                    break;
                }
                Err(err) if err.is_recoverable() => writeln!(out, "{}", err)?,
                Err(GameError::NoLegalMoves) => {
                    writeln!(out, "\n{} left the game.", mark)?;
                    log!("Match abandoned by {}", mark);
                    return Ok(MatchOutcome::Abandoned);
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    write!(out, "\n{}", render_board(&state))?;
    writeln!(out, "{}", render_status(&state))?;

    let outcome = match state.winner() {
        Some(winner) => MatchOutcome::Winner(winner),
        None => MatchOutcome::Draw,
    };
    log!("Match finished: {:?}", outcome);
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::human::HumanPlayer;
    use nrow_engine::{RandomPlayer, SearchPlayer, SearchSettings};
    use std::io::Cursor;

    fn seat(player: impl Player + 'static) -> Seat {
        Seat {
            player: Box::new(player),
            delay: Duration::ZERO,
            prompt: false,
        }
    }

    #[test]
    fn test_random_players_finish_the_game() {
        for seed in 0..10 {
            let mut rng = SessionRng::new(seed);
            let state = GameState::empty(4, 3, Mark::O).unwrap();
            let seats = vec![seat(RandomPlayer::new(Mark::X)), seat(RandomPlayer::new(Mark::O))];
            let mut out = Vec::new();
            let outcome = run_match(state, seats, &mut rng, &mut out).unwrap();
            assert_ne!(outcome, MatchOutcome::Abandoned);

            let text = String::from_utf8(out).unwrap();
            assert!(text.contains("wins!") || text.contains("Draw."));
        }
    }

    #[test]
    fn test_same_seed_replays_same_game() {
        let play = |seed| {
            let mut rng = SessionRng::new(seed);
            let state = GameState::empty(5, 4, Mark::X).unwrap();
            let seats = vec![seat(RandomPlayer::new(Mark::X)), seat(RandomPlayer::new(Mark::O))];
            let mut out = Vec::new();
            run_match(state, seats, &mut rng, &mut out).unwrap();
            out
        };
        assert_eq!(play(21), play(21));
    }

    #[test]
    fn test_human_mistakes_are_retried() {
        let mut rng = SessionRng::new(3);
        let state = GameState::empty(3, 3, Mark::X).unwrap();
        let human = HumanPlayer::new(Mark::X, Cursor::new("A1\nhello\nB1\nC1\n"));
        let script = HumanPlayer::new(Mark::O, Cursor::new("A2\nB2\n"));
        let seats = vec![seat(human), seat(script)];

        let mut out = Vec::new();
        let outcome = run_match(state, seats, &mut rng, &mut out).unwrap();
        assert_eq!(outcome, MatchOutcome::Winner(Mark::X));

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("invalid cell notation \"hello\""));
        assert!(text.contains("[X][X][X]"));
    }

    #[test]
    fn test_garbled_line_does_not_end_match() {
        let mut rng = SessionRng::new(3);
        let state = GameState::empty(3, 3, Mark::X).unwrap();
        let mut bytes = vec![0xff, 0xfe, b'\n'];
        bytes.extend_from_slice(b"A1\nB1\nC1\n");
        let seats = vec![
            seat(HumanPlayer::new(Mark::X, Cursor::new(bytes))),
            seat(HumanPlayer::new(Mark::O, Cursor::new("A2\nB2\n"))),
        ];

        let mut out = Vec::new();
        let outcome = run_match(state, seats, &mut rng, &mut out).unwrap();
        assert_eq!(outcome, MatchOutcome::Winner(Mark::X));
        assert!(!String::from_utf8(out).unwrap().contains("left the game"));
    }

    #[test]
    fn test_closed_input_abandons_match() {
        let mut rng = SessionRng::new(3);
        let state = GameState::empty(3, 3, Mark::X).unwrap();
        let seats = vec![
            seat(HumanPlayer::new(Mark::X, Cursor::new("B2\n"))),
            seat(SearchPlayer::new(Mark::O, 2, SearchSettings::default())),
        ];
        let mut out = Vec::new();
        let outcome = run_match(state, seats, &mut rng, &mut out).unwrap();
        assert_eq!(outcome, MatchOutcome::Abandoned);
    }

    #[test]
    fn test_missing_seat_is_an_error() {
        let mut rng = SessionRng::new(3);
        let state = GameState::empty(3, 3, Mark::X).unwrap();
        let seats = vec![seat(RandomPlayer::new(Mark::O))];
        let mut out = Vec::new();
        assert!(run_match(state, seats, &mut rng, &mut out).is_err());
    }
}
