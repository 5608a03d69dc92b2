pub mod config;
pub mod error;
pub mod game_state;
pub mod grid;
pub mod logger;
pub mod mark;
pub mod moves;
pub mod notation;
pub mod players;
pub mod search;
pub mod session_rng;
pub mod validate;

pub use error::{GameError, MoveRejection};
pub use game_state::{DEFAULT_RUN_LENGTH, GameState};
pub use grid::{Grid, MIN_DIMENSION, MarkCounts};
pub use mark::Mark;
pub use moves::Move;
pub use notation::{parse_notation, to_notation};
pub use players::{Player, RandomPlayer, SearchPlayer};
pub use search::{Algorithm, MemoTable, SearchEngine, SearchSettings, WIN_SCORE};
pub use session_rng::SessionRng;
