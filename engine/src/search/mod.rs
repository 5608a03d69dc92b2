mod alpha_beta;
mod context;
mod evaluate;
mod memo;
mod minimax;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::game_state::GameState;
use crate::log;
use crate::mark::Mark;
use crate::moves::Move;
use crate::session_rng::SessionRng;
use alpha_beta::alpha_beta;
use context::SearchContext;
use minimax::minimax;

pub use evaluate::{WIN_SCORE, evaluate, evaluate_line, heuristic_score};
pub use memo::{Bound, MemoEntry, MemoKey, MemoTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Algorithm {
    #[default]
    AlphaBeta,
    Minimax,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    pub algorithm: Algorithm,
    /// Score root moves on the rayon pool.
    pub parallel: bool,
    pub memoize: bool,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::AlphaBeta,
            parallel: true,
            memoize: true,
        }
    }
}

/// Rule that picked the returned move among equally scored ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TieBreak {
    Unique,
    ImmediateWin,
    Block,
    Random,
}

#[derive(Debug, Clone, Default)]
pub struct SearchEngine {
    settings: SearchSettings,
}

impl SearchEngine {
    pub fn new(settings: SearchSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    /// Best move for the side to move in `state`, searching `depth` plies
    /// below each candidate. With `maximize_for_current_player` false the
    /// lowest-scoring move for the side to move is chosen instead.
    pub fn find_best_move(
        &self,
        state: &GameState,
        depth: usize,
        maximize_for_current_player: bool,
        rng: &mut SessionRng,
    ) -> Result<Move, GameError> {
        let memo = MemoTable::new();
        self.find_best_move_with_memo(state, depth, maximize_for_current_player, rng, &memo)
    }

    pub fn find_best_move_with_memo(
        &self,
        state: &GameState,
        depth: usize,
        maximize_for_current_player: bool,
        rng: &mut SessionRng,
        memo: &MemoTable,
    ) -> Result<Move, GameError> {
        let mut scored = self.score_moves(state, depth, maximize_for_current_player, memo)?;
        let scores = scored.iter().map(|(_, score)| *score);
        let best_score = if maximize_for_current_player {
            scores.max()
        } else {
            scores.min()
        }
        .ok_or(GameError::NoLegalMoves)?;

        let best: Vec<usize> = scored
            .iter()
            .enumerate()
            .filter(|(_, (_, score))| *score == best_score)
            .map(|(i, _)| i)
            .collect();
        let moves: Vec<&Move> = best.iter().map(|&i| &scored[i].0).collect();
        let (choice, rule) = break_tie(&moves, state.current_mark(), rng)?;

        log!(
            "{:?} depth {}: {} moves, best score {}, {} tied, picked {} ({:?}), memo {} entries / {} hits",
            self.settings.algorithm,
            depth,
            scored.len(),
            best_score,
            best.len(),
            moves[choice].notation(),
            rule,
            memo.len(),
            memo.hits()
        );

        Ok(scored.swap_remove(best[choice]).0)
    }

    /// Every legal move of `state` paired with its score for the side to move.
    pub fn score_moves(
        &self,
        state: &GameState,
        depth: usize,
        maximize_for_current_player: bool,
        memo: &MemoTable,
    ) -> Result<Vec<(Move, i64)>, GameError> {
        let moves = state.legal_moves();
        if moves.is_empty() {
            return Err(GameError::NoLegalMoves);
        }

        let ctx = SearchContext::new(
            state.current_mark(),
            self.settings.memoize.then_some(memo),
        );
        let maximizing = !maximize_for_current_player;
        let score = |mv: &Move| match self.settings.algorithm {
            Algorithm::AlphaBeta => alpha_beta(&ctx, mv, depth, i64::MIN, i64::MAX, maximizing),
            Algorithm::Minimax => minimax(&ctx, mv, depth, maximizing),
        };

        let scores: Vec<i64> = if self.settings.parallel {
            moves.par_iter().map(score).collect()
        } else {
            moves.iter().map(score).collect()
        };

        log!("Searched {} nodes for {} root moves", ctx.nodes(), moves.len());
        Ok(moves.into_iter().zip(scores).collect())
    }
}

/// Picks among equally scored moves: an immediate win first, then a move
/// after which no opponent reply wins at once, otherwise a random one.
fn break_tie(
    moves: &[&Move],
    mover: Mark,
    rng: &mut SessionRng,
) -> Result<(usize, TieBreak), GameError> {
    if moves.len() == 1 {
        return Ok((0, TieBreak::Unique));
    }

    if let Some(i) = moves.iter().position(|mv| mv.is_winning()) {
        return Ok((i, TieBreak::ImmediateWin));
    }

    let opponent = mover.other();
    let blocks = |mv: &&Move| {
        mv.next_state
            .legal_moves()
            .iter()
            .all(|reply| reply.next_state.winner() != Some(opponent))
    };
    if let Some(i) = moves.iter().position(blocks) {
        return Ok((i, TieBreak::Block));
    }

    let indices: Vec<usize> = (0..moves.len()).collect();
    let choice = rng.choose(&indices).ok_or(GameError::NoLegalMoves)?;
    Ok((*choice, TieBreak::Random))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sequential(algorithm: Algorithm) -> SearchEngine {
        SearchEngine::new(SearchSettings {
            algorithm,
            parallel: false,
            memoize: true,
        })
    }

    fn state(cells: &str) -> GameState {
        GameState::parse(3, 3, Mark::X, cells).unwrap()
    }

    #[test]
    fn test_takes_immediate_win() {
        let mut rng = SessionRng::new(1);
        let state = state("XX OO    ");
        for depth in 0..4 {
            for engine in [SearchEngine::default(), sequential(Algorithm::Minimax)] {
                let mv = engine.find_best_move(&state, depth, true, &mut rng).unwrap();
                assert_eq!(mv.position, 2, "depth {depth}");
                assert_eq!(mv.next_state.winner(), Some(Mark::X));
            }
        }
    }

    #[test]
    fn test_blocks_opponent_threat() {
        // O to move; X threatens C1.
        let mut rng = SessionRng::new(3);
        let state = state("XX  O    ");
        let mv = SearchEngine::default()
            .find_best_move(&state, 2, true, &mut rng)
            .unwrap();
        assert_eq!(mv.position, 2);
    }

    #[test]
    fn test_ended_state_has_no_moves() {
        let mut rng = SessionRng::new(1);
        let engine = SearchEngine::default();
        assert_eq!(
            engine.find_best_move(&state("XXXOO    "), 2, true, &mut rng),
            Err(GameError::NoLegalMoves)
        );
        assert_eq!(
            engine.find_best_move(&state("XOXXOOOXX"), 2, true, &mut rng),
            Err(GameError::NoLegalMoves)
        );
    }

    #[test]
    fn test_alpha_beta_matches_minimax_scores() {
        let positions = [
            (3, 3, "X        "),
            (3, 3, "X   O    "),
            (3, 3, "XO  X    "),
            (3, 3, "XOX O    "),
            (4, 3, "X    O          "),
            (4, 4, "X    O    X     "),
        ];
        for (dimension, run_length, cells) in positions {
            let state = GameState::parse(dimension, run_length, Mark::X, cells).unwrap();
            for depth in 0..3 {
                for maximize in [true, false] {
                    let scores = |algorithm, memoize| {
                        let engine = SearchEngine::new(SearchSettings {
                            algorithm,
                            parallel: false,
                            memoize,
                        });
                        engine
                            .score_moves(&state, depth, maximize, &MemoTable::new())
                            .unwrap()
                            .into_iter()
                            .map(|(mv, score)| (mv.position, score))
                            .collect::<Vec<_>>()
                    };
                    let reference = scores(Algorithm::Minimax, false);
                    assert_eq!(scores(Algorithm::AlphaBeta, false), reference, "{cells} depth {depth}");
                    assert_eq!(scores(Algorithm::AlphaBeta, true), reference, "{cells} depth {depth}");
                    assert_eq!(scores(Algorithm::Minimax, true), reference, "{cells} depth {depth}");
                }
            }
        }
    }

    #[test]
    fn test_parallel_and_sequential_agree() {
        let state = state("X   O    ");
        let parallel = SearchEngine::default()
            .score_moves(&state, 3, true, &MemoTable::new())
            .unwrap();
        let sequential = sequential(Algorithm::AlphaBeta)
            .score_moves(&state, 3, true, &MemoTable::new())
            .unwrap();
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_shared_memo_is_reused() {
        let mut rng = SessionRng::new(5);
        let memo = MemoTable::new();
        let engine = sequential(Algorithm::AlphaBeta);
        let state = state("X   O    ");
        let first = engine.find_best_move_with_memo(&state, 3, true, &mut rng, &memo).unwrap();
        assert!(!memo.is_empty());
        let hits_before = memo.hits();
        let second = engine.find_best_move_with_memo(&state, 3, true, &mut rng, &memo).unwrap();
        assert!(memo.hits() > hits_before);
        let legal = state.legal_positions();
        assert!(legal.contains(&first.position));
        assert!(legal.contains(&second.position));
    }

    #[test]
    fn test_perfect_play_from_empty_board_is_a_draw() {
        let mut rng = SessionRng::new(11);
        let engine = SearchEngine::default();
        let mut state = GameState::empty(3, 3, Mark::X).unwrap();
        while !state.has_ended() {
            state = engine.find_best_move(&state, 9, true, &mut rng).unwrap().next_state;
        }
        assert!(state.is_draw());
    }

    #[test]
    fn test_tie_break_prefers_win_then_block() {
        let mut rng = SessionRng::new(2);
        let state = state("XX OO    ");
        let moves = state.legal_moves();
        let refs: Vec<&Move> = moves.iter().collect();
        let (choice, rule) = break_tie(&refs, Mark::X, &mut rng).unwrap();
        assert_eq!(rule, TieBreak::ImmediateWin);
        assert_eq!(refs[choice].position, 2);

        let without_win: Vec<&Move> = moves.iter().filter(|mv| mv.position != 2).collect();
        let (choice, rule) = break_tie(&without_win, Mark::X, &mut rng).unwrap();
        // Only X on C2 stops O completing the middle row.
        assert_eq!(rule, TieBreak::Block);
        assert_eq!(without_win[choice].position, 5);
    }

    #[test]
    fn test_settings_default_from_partial_yaml() {
        let settings: SearchSettings = serde_yaml_ng::from_str("algorithm: Minimax\n").unwrap();
        assert_eq!(settings.algorithm, Algorithm::Minimax);
        assert!(settings.parallel);
        assert!(settings.memoize);
    }
}
