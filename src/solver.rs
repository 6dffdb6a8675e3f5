//! This module contains the logic for solving partial Sudoku grids.
//!
//! Most importantly, it contains the definition of the [Solver] trait and
//! the [BacktrackingSolver] as a generally usable implementation. Solving is
//! used for the "reveal solution" feature of the game and as a correctness
//! oracle in tests.

use crate::{Grid, SIZE};
use crate::error::{SudokuError, SudokuResult};
use crate::validator::{ScanValidator, Validator};

/// A trait for structs which have the ability to complete partial Sudoku
/// grids.
pub trait Solver {

    /// Attempts to fill the empty cells of the given grid such that the
    /// result is complete and valid. The input grid is never mutated; on
    /// success a new, fully-populated grid is returned. An already-complete
    /// consistent grid solves to an equal grid.
    ///
    /// If the grid has multiple completions, any one of them may be
    /// returned.
    ///
    /// # Errors
    ///
    /// * `SudokuError::Unsolvable` if the grid admits no completion, that
    /// is, it is already contradictory.
    fn solve(&self, grid: &Grid) -> SudokuResult<Grid>;
}

/// A [Solver] which completes grids by recursively testing all valid digits
/// for each empty cell in row-major order, reverting each failed branch
/// before trying the next candidate. Unlike the
/// [Generator](crate::generator::Generator), it starts from an arbitrary
/// partial grid, so it may legitimately fail.
///
/// Its worst-case runtime is exponential, but on 9x9 grids with the usual
/// clue counts it is more than fast enough.
#[derive(Clone, Copy, Debug, Default)]
pub struct BacktrackingSolver<V: Validator = ScanValidator> {
    validator: V
}

impl BacktrackingSolver<ScanValidator> {

    /// Creates a new backtracking solver that validates placements with a
    /// [ScanValidator].
    pub fn new_default() -> BacktrackingSolver<ScanValidator> {
        BacktrackingSolver::new(ScanValidator)
    }
}

impl<V: Validator> BacktrackingSolver<V> {

    /// Creates a new backtracking solver with the given validator.
    pub fn new(validator: V) -> BacktrackingSolver<V> {
        BacktrackingSolver {
            validator
        }
    }

    fn solve_rec(&self, grid: &mut Grid, row: usize, column: usize) -> bool {
        if row == SIZE {
            return true;
        }

        let next_column = (column + 1) % SIZE;
        let next_row = if next_column == 0 { row + 1 } else { row };

        if grid.get(row, column).unwrap() != 0 {
            return self.solve_rec(grid, next_row, next_column);
        }

        for digit in 1..=9 {
            if self.validator.can_place(grid, row, column, digit) {
                grid.set(row, column, digit).unwrap();

                if self.solve_rec(grid, next_row, next_column) {
                    return true;
                }

                grid.clear(row, column).unwrap();
            }
        }

        false
    }
}

impl<V: Validator> Solver for BacktrackingSolver<V> {
    fn solve(&self, grid: &Grid) -> SudokuResult<Grid> {
        let mut work = grid.clone();

        if self.solve_rec(&mut work, 0, 0) {
            Ok(work)
        }
        else {
            Err(SudokuError::Unsolvable)
        }
    }
}
