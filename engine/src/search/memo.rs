use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::game_state::GameState;
use crate::grid::Grid;
use crate::mark::Mark;

/// How a stored score relates to the true minimax value of its node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// The search completed inside the window.
    Exact,
    /// A beta cut-off happened; the true value is at least the score.
    LowerBound,
    /// Every child failed low; the true value is at most the score.
    UpperBound,
}

impl Bound {
    pub fn classify(score: i64, alpha: i64, beta: i64) -> Self {
        if score <= alpha {
            Bound::UpperBound
        } else if score >= beta {
            Bound::LowerBound
        } else {
            Bound::Exact
        }
    }
}

/// Everything the score of a searched node depends on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MemoKey {
    grid: Grid,
    starting_mark: Mark,
    run_length: usize,
    maximizer: Mark,
    depth: usize,
    maximizing: bool,
}

impl MemoKey {
    pub fn new(state: &GameState, maximizer: Mark, depth: usize, maximizing: bool) -> Self {
        Self {
            grid: state.grid().clone(),
            starting_mark: state.starting_mark(),
            run_length: state.run_length(),
            maximizer,
            depth,
            maximizing,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoEntry {
    pub score: i64,
    pub bound: Bound,
}

/// Score cache shared by all branches of a search. Concurrent inserts for the
/// same key are last-writer-wins.
#[derive(Debug, Default)]
pub struct MemoTable {
    entries: Mutex<HashMap<MemoKey, MemoEntry>>,
    hits: AtomicU64,
}

impl MemoTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a score usable under the window `(alpha, beta)`, if any.
    pub fn probe(&self, key: &MemoKey, alpha: i64, beta: i64) -> Option<i64> {
        let entry = {
            let entries = self.entries.lock().ok()?;
            *entries.get(key)?
        };
        let usable = match entry.bound {
            Bound::Exact => true,
            Bound::LowerBound => entry.score >= beta,
            Bound::UpperBound => entry.score <= alpha,
        };
        if usable {
            self.hits.fetch_add(1, Ordering::Relaxed);
            Some(entry.score)
        } else {
            None
        }
    }

    pub fn store(&self, key: MemoKey, score: i64, bound: Bound) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key, MemoEntry { score, bound });
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
        self.hits.store(0, Ordering::Relaxed);
    }
}
