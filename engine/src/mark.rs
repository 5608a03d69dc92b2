use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Cell contents. `X` and `O` are the two player symbols; which of them
/// moves first is a property of the game, not of the mark.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
    Empty,
}

impl Mark {
    pub fn other(&self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
            Mark::Empty => Mark::Empty,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Mark::Empty
    }

    pub fn to_char(&self) -> char {
        match self {
            Mark::X => 'X',
            Mark::O => 'O',
            Mark::Empty => ' ',
        }
    }

    pub fn from_char(c: char) -> Result<Mark, GameError> {
        match c {
            'X' => Ok(Mark::X),
            'O' => Ok(Mark::O),
            ' ' => Ok(Mark::Empty),
            other => Err(GameError::InvalidCellValue(other)),
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mark::Empty => f.write_str("Empty"),
            mark => write!(f, "{}", mark.to_char()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_swaps_players_and_keeps_empty() {
        assert_eq!(Mark::X.other(), Mark::O);
        assert_eq!(Mark::O.other(), Mark::X);
        assert_eq!(Mark::Empty.other(), Mark::Empty);
    }

    #[test]
    fn test_char_conversion() {
        for mark in [Mark::X, Mark::O, Mark::Empty] {
            assert_eq!(Mark::from_char(mark.to_char()), Ok(mark));
        }
        assert_eq!(Mark::from_char('x'), Err(GameError::InvalidCellValue('x')));
        assert_eq!(Mark::from_char('.'), Err(GameError::InvalidCellValue('.')));
    }
}
