//! Flat, fixed-size grids for the dynamic-programming core.
//!
//! Cumulative costs and backtrace pointers live in plain `Vec`s indexed by
//! `(row, col)`: an arena-of-indices layout, not a pointer graph. Every grid
//! is created fresh per call and dropped once the result is extracted.

use std::ops::{Index, IndexMut};

/// Dense `(rows x cols)` grid over `T`.
#[derive(Debug, Clone)]
pub struct Grid<T> {
    cols: usize,
    data: Vec<T>,
}

impl<T: Clone> Grid<T> {
    /// Grid filled with `fill`.
    pub fn new(rows: usize, cols: usize, fill: T) -> Self {
        Grid {
            cols,
            data: vec![fill; rows * cols],
        }
    }
}

impl<T> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        &self.data[row * self.cols + col]
    }
}

impl<T> IndexMut<(usize, usize)> for Grid<T> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        &mut self.data[row * self.cols + col]
    }
}

/// Cumulative-cost matrix: `cell[(i, j)]` is the minimal cost of transforming
/// `src[:i]` into `tar[:j]`.
pub type DpMatrix = Grid<f64>;

/// Which operation produced a cell's minimum, under the fixed tie-break
/// order match > substitution > deletion > insertion > transposition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Step {
    /// Border cell, nothing before it.
    #[default]
    Stop,
    /// Diagonal move over equal symbols.
    Match,
    /// Diagonal move over unequal symbols.
    Sub,
    /// Vertical move: delete from the source.
    Del,
    /// Horizontal move: insert into the source.
    Ins,
    /// Transposition. For full-transposition mode the jump target is kept in
    /// a companion grid.
    Trans,
}

/// Backtrace matrix parallel to a [`DpMatrix`].
pub type TraceMatrix = Grid<Step>;

mod test {
    use super::*;

    #[test]
    fn test_grid_roundtrip() {
        let mut grid = Grid::new(3, 4, 0.0);
        grid[(2, 3)] = 7.5;
        grid[(0, 0)] = 1.0;
        assert_eq!(grid[(2, 3)], 7.5);
        assert_eq!(grid[(0, 0)], 1.0);
        assert_eq!(grid[(1, 1)], 0.0);
    }

    #[test]
    #[should_panic]
    fn test_out_of_bounds_panics() {
        let grid: Grid<f64> = Grid::new(2, 2, 0.0);
        let _ = grid[(2, 0)];
    }
}
