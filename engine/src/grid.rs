use std::collections::{BTreeSet, HashSet, VecDeque};
use std::fmt;
use std::sync::Arc;

use crate::error::GameError;
use crate::mark::Mark;
use crate::validate::{validate_dimension, validate_grid_size};

pub const MIN_DIMENSION: usize = 3;

const NEIGHBOR_SEARCH_DEPTH: usize = 1;

const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Row,
    Column,
    Diagonal,
    AntiDiagonal,
}

/// Scan order for windows; the first winning window found is reported.
const DIRECTIONS: [Direction; 4] = [
    Direction::Row,
    Direction::Column,
    Direction::Diagonal,
    Direction::AntiDiagonal,
];

impl Direction {
    /// Column and row step. The anti-diagonal runs top-right to bottom-left
    /// so its cells come out in ascending index order.
    fn step(self) -> (isize, isize) {
        match self {
            Direction::Row => (1, 0),
            Direction::Column => (0, 1),
            Direction::Diagonal => (1, 1),
            Direction::AntiDiagonal => (-1, 1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkCounts {
    pub x: usize,
    pub o: usize,
    pub empty: usize,
}

impl MarkCounts {
    pub fn of(&self, mark: Mark) -> usize {
        match mark {
            Mark::X => self.x,
            Mark::O => self.o,
            Mark::Empty => self.empty,
        }
    }
}

/// Square, immutable board stored row-major. Placing a mark produces a new grid.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    dimension: usize,
    cells: Arc<[Mark]>,
}

impl Grid {
    pub fn new(dimension: usize) -> Result<Self, GameError> {
        validate_dimension(dimension)?;
        Ok(Self {
            dimension,
            cells: vec![Mark::Empty; dimension * dimension].into(),
        })
    }

    pub fn with_cells(dimension: usize, cells: Vec<Mark>) -> Result<Self, GameError> {
        validate_dimension(dimension)?;
        validate_grid_size(dimension, cells.len())?;
        Ok(Self {
            dimension,
            cells: cells.into(),
        })
    }

    /// Builds a grid from one character per cell: 'X', 'O' or ' '.
    pub fn parse(dimension: usize, cells: &str) -> Result<Self, GameError> {
        validate_dimension(dimension)?;
        validate_grid_size(dimension, cells.chars().count())?;
        let cells = cells
            .chars()
            .map(Mark::from_char)
            .collect::<Result<Vec<_>, _>>()?;
        Self::with_cells(dimension, cells)
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn cells(&self) -> &[Mark] {
        &self.cells
    }

    pub fn get(&self, index: usize) -> Option<Mark> {
        self.cells.get(index).copied()
    }

    pub fn is_occupied(&self, index: usize) -> bool {
        self.get(index).is_some_and(|mark| !mark.is_empty())
    }

    pub fn mark_counts(&self) -> MarkCounts {
        let mut counts = MarkCounts { x: 0, o: 0, empty: 0 };
        for cell in self.cells.iter() {
            match cell {
                Mark::X => counts.x += 1,
                Mark::O => counts.o += 1,
                Mark::Empty => counts.empty += 1,
            }
        }
        counts
    }

    pub fn occupied_cells(&self) -> Vec<usize> {
        self.indices_where(|mark| !mark.is_empty())
    }

    pub fn empty_cells(&self) -> Vec<usize> {
        self.indices_where(Mark::is_empty)
    }

    fn indices_where(&self, predicate: impl Fn(&Mark) -> bool) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, mark)| predicate(mark))
            .map(|(index, _)| index)
            .collect()
    }

    pub fn neighbors(&self, index: usize) -> Vec<usize> {
        let column = (index % self.dimension) as isize;
        let row = (index / self.dimension) as isize;
        NEIGHBOR_OFFSETS
            .iter()
            .filter_map(|&(dx, dy)| self.index_at(column + dx, row + dy))
            .collect()
    }

    /// Empty cells within one step (8-neighbourhood) of any marked cell, in
    /// ascending order. On an empty grid every cell is a candidate.
    pub fn candidate_moves(&self) -> Vec<usize> {
        let occupied = self.occupied_cells();
        if occupied.is_empty() {
            return self.empty_cells();
        }

        let mut visited = HashSet::new();
        let mut candidates = Vec::new();
        for seed in occupied {
            self.collect_empty_neighbors(seed, NEIGHBOR_SEARCH_DEPTH, &mut visited, &mut candidates);
        }
        candidates.sort_unstable();
        candidates
    }

    fn collect_empty_neighbors(
        &self,
        seed: usize,
        max_depth: usize,
        visited: &mut HashSet<usize>,
        found: &mut Vec<usize>,
    ) {
        visited.insert(seed);
        let mut queue = VecDeque::from([(seed, 0)]);
        while let Some((index, depth)) = queue.pop_front() {
            if depth >= max_depth {
                continue;
            }
            for neighbor in self.neighbors(index) {
                if self.cells[neighbor].is_empty() && visited.insert(neighbor) {
                    found.push(neighbor);
                    queue.push_back((neighbor, depth + 1));
                }
            }
        }
    }

    /// Every row, column and diagonal window of exactly `length` cells that
    /// contains at least one marked cell. Windows are grouped by direction
    /// (rows, columns, diagonals, anti-diagonals) and ordered by first cell.
    pub fn potential_win_windows(&self, length: usize) -> Vec<Vec<usize>> {
        if length == 0 || length > self.dimension {
            return Vec::new();
        }

        let occupied = self.occupied_cells();
        let mut windows = Vec::new();
        for direction in DIRECTIONS {
            let (dx, dy) = direction.step();
            let mut starts = BTreeSet::new();
            for &cell in &occupied {
                let column = (cell % self.dimension) as isize;
                let row = (cell / self.dimension) as isize;
                for offset in 0..length as isize {
                    let start_column = column - dx * offset;
                    let start_row = row - dy * offset;
                    if self.window_fits(start_column, start_row, direction, length) {
                        starts.insert((start_row, start_column));
                    }
                }
            }
            windows.extend(
                starts
                    .into_iter()
                    .map(|(row, column)| self.window_cells(column, row, direction, length)),
            );
        }
        windows
    }

    fn window_fits(&self, column: isize, row: isize, direction: Direction, length: usize) -> bool {
        let (dx, dy) = direction.step();
        let last = length as isize - 1;
        self.index_at(column, row).is_some()
            && self.index_at(column + dx * last, row + dy * last).is_some()
    }

    fn window_cells(&self, column: isize, row: isize, direction: Direction, length: usize) -> Vec<usize> {
        let (dx, dy) = direction.step();
        (0..length as isize)
            .filter_map(|i| self.index_at(column + dx * i, row + dy * i))
            .collect()
    }

    fn index_at(&self, column: isize, row: isize) -> Option<usize> {
        let size = self.dimension as isize;
        if column < 0 || row < 0 || column >= size || row >= size {
            return None;
        }
        Some(row as usize * self.dimension + column as usize)
    }

    /// Copy of this grid with one cell replaced. Bounds are checked by the caller.
    pub(crate) fn with_mark(&self, index: usize, mark: Mark) -> Grid {
        let mut cells = self.cells.to_vec();
        cells[index] = mark;
        Grid {
            dimension: self.dimension,
            cells: cells.into(),
        }
    }

    pub fn marks_at(&self, window: &[usize]) -> Vec<Mark> {
        window.iter().map(|&index| self.cells[index]).collect()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for mark in self.cells.iter() {
            write!(f, "{}", mark.to_char())?;
        }
        Ok(())
    }
}
