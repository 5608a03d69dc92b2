use super::context::SearchContext;
use super::memo::Bound;
use crate::moves::Move;

/// Unpruned counterpart of [`super::alpha_beta::alpha_beta`].
pub(crate) fn minimax(ctx: &SearchContext, mv: &Move, depth: usize, maximizing: bool) -> i64 {
    ctx.visit();
    let state = &mv.next_state;
    if let Some(score) = ctx.leaf_score(state, depth) {
        return score;
    }

    let key = ctx.key(state, depth, maximizing);
    if let Some(score) = ctx.probe(key.as_ref(), i64::MIN, i64::MAX) {
        return score;
    }

    let children = state.legal_moves();
    let scores = children
        .iter()
        .map(|child| minimax(ctx, child, depth - 1, !maximizing));
    let best = if maximizing {
        scores.max().unwrap_or(i64::MIN)
    } else {
        scores.min().unwrap_or(i64::MAX)
    };

    ctx.store(key, best, Bound::Exact);
    best
}
