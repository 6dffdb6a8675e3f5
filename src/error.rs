//! This module contains some error and result definitions used in this crate.

use std::fmt::{self, Display, Formatter};
use std::num::ParseIntError;

/// The errors that can occur when operating on Sudoku grids, generating
/// puzzles, or solving them. Parsing has its own error type, see
/// [GridParseError].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SudokuError {

    /// Indicates that a row or column index outside `[0, 8]` or a digit
    /// outside `[0, 9]` was passed to an operation. The operation was not
    /// applied, not even partially.
    OutOfRange,

    /// Indicates that the backtracking search for a complete grid exhausted
    /// all possibilities. This should never happen when filling an empty
    /// grid, but it must not be swallowed if it does: a caller receiving
    /// this error has no grid to carve or display.
    Unsatisfiable,

    /// Indicates that a partial grid admits no completion, that is, it is
    /// already contradictory.
    Unsolvable
}

impl Display for SudokuError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SudokuError::OutOfRange =>
                write!(f, "row, column, or digit out of range"),
            SudokuError::Unsatisfiable =>
                write!(f, "no complete grid satisfies the given cells"),
            SudokuError::Unsolvable =>
                write!(f, "the partial grid has no solution")
        }
    }
}

impl std::error::Error for SudokuError { }

/// Syntactic sugar for `Result<V, SudokuError>`.
pub type SudokuResult<V> = Result<V, SudokuError>;

/// An enumeration of the errors that may occur when parsing a
/// [Grid](crate::Grid) from its comma-separated cell code.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GridParseError {

    /// Indicates that the number of cells (which are separated by commas) is
    /// not exactly 81.
    WrongNumberOfCells,

    /// Indicates that one of the cell entries could not be parsed as a
    /// number.
    NumberFormatError,

    /// Indicates that a cell is filled with a number outside `[1, 9]`.
    InvalidNumber
}

impl Display for GridParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            GridParseError::WrongNumberOfCells =>
                write!(f, "expected exactly 81 cells"),
            GridParseError::NumberFormatError =>
                write!(f, "cell entry is not a number"),
            GridParseError::InvalidNumber =>
                write!(f, "cell digit must be in [1, 9]")
        }
    }
}

impl std::error::Error for GridParseError { }

impl From<ParseIntError> for GridParseError {
    fn from(_: ParseIntError) -> Self {
        GridParseError::NumberFormatError
    }
}

/// Syntactic sugar for `Result<V, GridParseError>`.
pub type GridParseResult<V> = Result<V, GridParseError>;
