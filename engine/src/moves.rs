use crate::game_state::GameState;
use crate::mark::Mark;

/// Edge of the game tree: `mark` placed on `position` turns `previous_state`
/// into `next_state`. Only [`GameState`] creates moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Move {
    pub mark: Mark,
    pub position: usize,
    pub previous_state: GameState,
    pub next_state: GameState,
}

impl Move {
    pub(crate) fn new(
        mark: Mark,
        position: usize,
        previous_state: GameState,
        next_state: GameState,
    ) -> Self {
        Self {
            mark,
            position,
            previous_state,
            next_state,
        }
    }

    pub fn is_winning(&self) -> bool {
        self.next_state.winner() == Some(self.mark)
    }

    pub fn notation(&self) -> String {
        crate::notation::to_notation(self.position, self.next_state.dimension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_winning_move_is_flagged() {
        let state = GameState::parse(3, 3, Mark::X, "XX OO    ").unwrap();
        let win = state.apply_move(2).unwrap();
        assert!(win.is_winning());
        assert_eq!(win.notation(), "C1");

        let other = state.apply_move(5).unwrap();
        assert!(!other.is_winning());
        assert_eq!(other.notation(), "C2");
    }
}
