use std::sync::atomic::{AtomicU64, Ordering};

use super::evaluate::evaluate;
use super::memo::{Bound, MemoKey, MemoTable};
use crate::game_state::GameState;
use crate::mark::Mark;

/// Read-only inputs and shared counters for one search.
pub(crate) struct SearchContext<'a> {
    pub maximizer: Mark,
    memo: Option<&'a MemoTable>,
    nodes: AtomicU64,
}

impl<'a> SearchContext<'a> {
    pub fn new(maximizer: Mark, memo: Option<&'a MemoTable>) -> Self {
        Self {
            maximizer,
            memo,
            nodes: AtomicU64::new(0),
        }
    }

    pub fn visit(&self) {
        self.nodes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn nodes(&self) -> u64 {
        self.nodes.load(Ordering::Relaxed)
    }

    /// Score of a node the search will not expand, or `None` when it must be
    /// expanded. Depth exhaustion falls back to the heuristic.
    pub fn leaf_score(&self, state: &GameState, depth: usize) -> Option<i64> {
        if state.has_ended() || depth == 0 {
            return Some(evaluate(state, self.maximizer, depth == 0));
        }
        None
    }

    pub fn key(&self, state: &GameState, depth: usize, maximizing: bool) -> Option<MemoKey> {
        self.memo
            .map(|_| MemoKey::new(state, self.maximizer, depth, maximizing))
    }

    pub fn probe(&self, key: Option<&MemoKey>, alpha: i64, beta: i64) -> Option<i64> {
        self.memo?.probe(key?, alpha, beta)
    }

    pub fn store(&self, key: Option<MemoKey>, score: i64, bound: Bound) {
        if let (Some(memo), Some(key)) = (self.memo, key) {
            memo.store(key, score, bound);
        }
    }
}
