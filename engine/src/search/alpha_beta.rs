use super::context::SearchContext;
use super::memo::Bound;
use crate::moves::Move;

/// Value of `mv.next_state` for `ctx.maximizer`, searching `depth` more plies.
/// Returns the exact minimax value whenever it lies inside `(alpha, beta)`.
pub(crate) fn alpha_beta(
    ctx: &SearchContext,
    mv: &Move,
    depth: usize,
    mut alpha: i64,
    mut beta: i64,
    maximizing: bool,
) -> i64 {
    ctx.visit();
    let state = &mv.next_state;
    if let Some(score) = ctx.leaf_score(state, depth) {
        return score;
    }

    let key = ctx.key(state, depth, maximizing);
    if let Some(score) = ctx.probe(key.as_ref(), alpha, beta) {
        return score;
    }

    let (window_alpha, window_beta) = (alpha, beta);
    let mut best = if maximizing { i64::MIN } else { i64::MAX };
    for child in state.legal_moves() {
        let score = alpha_beta(ctx, &child, depth - 1, alpha, beta, !maximizing);
        if maximizing {
            best = best.max(score);
            alpha = alpha.max(score);
        } else {
            best = best.min(score);
            beta = beta.min(score);
        }
        if beta <= alpha {
            break;
        }
    }

    ctx.store(key, best, Bound::classify(best, window_alpha, window_beta));
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::GameState;
    use crate::mark::Mark;
    use crate::search::WIN_SCORE;

    #[test]
    fn test_finished_child_scores_immediately() {
        let state = GameState::parse(3, 3, Mark::X, "XX OO    ").unwrap();
        let ctx = SearchContext::new(Mark::X, None);
        let win = state.apply_move(2).unwrap();
        assert_eq!(alpha_beta(&ctx, &win, 3, i64::MIN, i64::MAX, false), WIN_SCORE);
        assert_eq!(ctx.nodes(), 1);
    }

    #[test]
    fn test_opponent_reply_is_found() {
        let state = GameState::parse(3, 3, Mark::X, "XX OO    ").unwrap();
        let ctx = SearchContext::new(Mark::X, None);
        let miss = state.apply_move(8).unwrap();
        assert_eq!(alpha_beta(&ctx, &miss, 1, i64::MIN, i64::MAX, false), -WIN_SCORE);
    }
}
