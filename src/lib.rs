// Code lints

#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unreachable_pub)]
#![warn(unused_import_braces)]
#![warn(unused_lifetimes)]
#![warn(unused_qualifications)]

// Doc lints

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

//! This crate implements the engine behind a desktop Sudoku game. It covers
//! everything below the presentation layer:
//!
//! * The 9x9 [Grid] value type with pure placement and query operations
//! * Move validation with two interchangeable strategies (see the
//! [validator] module)
//! * Complete-grid generation by randomized backtracking and puzzle carving
//! by difficulty tier (see the [generator] module)
//! * Full-grid solving (see the [solver] module)
//! * An explicit game-session state machine (see the [session] module)
//! * A flat-file score log with a fixed-field record type (see the [score]
//! module)
//!
//! # Parsing and printing grids
//!
//! See [Grid::parse] for the exact format of a grid code. Codes can be used
//! to exchange grids, while the `Display` implementation pretty-prints a
//! grid for debugging.
//!
//! ```
//! use sudoku_engine::Grid;
//!
//! let grid = Grid::parse("\
//!     5,3, , ,7, , , , ,\
//!     6, , ,1,9,5, , , ,\
//!      ,9,8, , , , ,6, ,\
//!     8, , , ,6, , , ,3,\
//!     4, , ,8, ,3, , ,1,\
//!     7, , , ,2, , , ,6,\
//!      ,6, , , , ,2,8, ,\
//!      , , ,4,1,9, , ,5,\
//!      , , , ,8, , ,7,9").unwrap();
//! println!("{}", grid);
//! ```
//!
//! # Playing a move
//!
//! [Grid::place] never mutates its input. It returns a new grid, so the
//! displayed state is undisturbed by speculative checks and earlier
//! references remain valid snapshots.
//!
//! ```
//! use sudoku_engine::Grid;
//!
//! let grid = Grid::new();
//! let next = grid.place(0, 0, 5).unwrap();
//!
//! assert_eq!(0, grid.get(0, 0).unwrap());
//! assert_eq!(5, next.get(0, 0).unwrap());
//! ```
//!
//! # Generating a puzzle
//!
//! [generator::generate] is the entry point the presentation layer calls to
//! obtain a new game. It yields a puzzle and its paired solution.
//!
//! ```
//! use sudoku_engine::Difficulty;
//! use sudoku_engine::generator;
//!
//! let generated = generator::generate(Difficulty::Easy).unwrap();
//!
//! assert!(generated.solution.is_complete());
//! assert!(generated.solution.is_board_valid());
//! assert!(!generated.puzzle.is_complete());
//! ```

pub mod error;
pub mod generator;
pub mod score;
pub mod session;
pub mod solver;
pub mod task;
pub mod util;
pub mod validator;


use error::{GridParseError, GridParseResult, SudokuError, SudokuResult};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde::de::Error as DeserializeError;

use std::fmt::{self, Display, Formatter};
use std::ops::RangeInclusive;

/// The number of rows and columns of a Sudoku grid.
pub const SIZE: usize = 9;

/// The width and height of one block of a Sudoku grid.
pub const BLOCK_SIZE: usize = 3;

/// The total number of cells of a Sudoku grid.
pub const CELL_COUNT: usize = SIZE * SIZE;

pub(crate) fn index(row: usize, column: usize) -> usize {
    row * SIZE + column
}

/// A Sudoku grid: 81 cells organized in 9 rows, 9 columns, and 9
/// non-overlapping 3x3 blocks. Each cell holds a value in `[0, 9]`, where 0
/// represents an empty cell and 1 to 9 a placed digit.
///
/// Two grids with semantic roles appear throughout this crate: a *solution*
/// is always fully populated and satisfies the Sudoku constraints, while a
/// *working grid* may contain empty cells and changes as the player plays.
/// The type itself does not distinguish them; the invariants are upheld by
/// the components that hand grids around.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Grid {
    cells: [u8; CELL_COUNT]
}

impl Default for Grid {
    fn default() -> Grid {
        Grid::new()
    }
}

fn to_char(cell: u8) -> char {
    if cell == 0 {
        ' '
    }
    else {
        (b'0' + cell) as char
    }
}

fn line(start: char, thick_sep: char, thin_sep: char,
        segment: impl Fn(usize) -> char, pad: char, end: char, newline: bool)
        -> String {
    let mut result = String::new();

    for column in 0..SIZE {
        if column == 0 {
            result.push(start);
        }
        else if column % BLOCK_SIZE == 0 {
            result.push(thick_sep);
        }
        else {
            result.push(thin_sep);
        }

        result.push(pad);
        result.push(segment(column));
        result.push(pad);
    }

    result.push(end);

    if newline {
        result.push('\n');
    }

    result
}

fn top_row() -> String {
    line('╔', '╦', '╤', |_| '═', '═', '╗', true)
}

fn thin_separator_line() -> String {
    line('╟', '╫', '┼', |_| '─', '─', '╢', true)
}

fn thick_separator_line() -> String {
    line('╠', '╬', '╪', |_| '═', '═', '╣', true)
}

fn bottom_row() -> String {
    line('╚', '╩', '╧', |_| '═', '═', '╝', false)
}

fn content_row(grid: &Grid, row: usize) -> String {
    line('║', '║', '│', |column| to_char(grid.cells[index(row, column)]),
        ' ', '║', true)
}

impl Display for Grid {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for row in 0..SIZE {
            if row == 0 {
                f.write_str(top_row().as_str())?;
            }
            else if row % BLOCK_SIZE == 0 {
                f.write_str(thick_separator_line().as_str())?;
            }
            else {
                f.write_str(thin_separator_line().as_str())?;
            }

            f.write_str(content_row(self, row).as_str())?;
        }

        f.write_str(bottom_row().as_str())
    }
}

fn cell_to_string(cell: &u8) -> String {
    if *cell == 0 {
        String::from("")
    }
    else {
        cell.to_string()
    }
}

impl Grid {

    /// Creates a new, completely empty grid.
    pub fn new() -> Grid {
        Grid {
            cells: [0; CELL_COUNT]
        }
    }

    /// Parses a code encoding a grid. The code is a comma-separated list of
    /// exactly 81 entries, which are either empty or a digit from 1 to 9.
    /// The entries are assigned left-to-right, top-to-bottom, where each row
    /// is completed before the next one is started. Whitespace in the
    /// entries is ignored to allow for more intuitive formatting.
    ///
    /// # Errors
    ///
    /// Any specialization of [GridParseError] (see that documentation).
    pub fn parse(code: &str) -> GridParseResult<Grid> {
        let entries: Vec<&str> = code.split(',').collect();

        if entries.len() != CELL_COUNT {
            return Err(GridParseError::WrongNumberOfCells);
        }

        let mut grid = Grid::new();

        for (i, entry) in entries.iter().enumerate() {
            let entry = entry.trim();

            if entry.is_empty() {
                continue;
            }

            let digit = entry.parse::<u8>()?;

            if digit == 0 || digit > 9 {
                return Err(GridParseError::InvalidNumber);
            }

            grid.cells[i] = digit;
        }

        Ok(grid)
    }

    /// Converts the grid into a `String` in a way that is consistent with
    /// [Grid::parse]. That is, a grid that is converted to a string and
    /// parsed again will not change.
    pub fn to_parseable_string(&self) -> String {
        self.cells.iter()
            .map(cell_to_string)
            .collect::<Vec<String>>()
            .join(",")
    }

    /// Gets the value of the cell at the specified position: 0 if the cell
    /// is empty, otherwise the digit it holds.
    ///
    /// # Errors
    ///
    /// If `row` or `column` is not in the range `[0, 8]`. In that case,
    /// `SudokuError::OutOfRange` is returned.
    pub fn get(&self, row: usize, column: usize) -> SudokuResult<u8> {
        if row >= SIZE || column >= SIZE {
            Err(SudokuError::OutOfRange)
        }
        else {
            Ok(self.cells[index(row, column)])
        }
    }

    /// Indicates whether the cell at the specified position holds the given
    /// digit. This returns `false` if the cell is empty or holds a different
    /// digit, and also for digits outside `[1, 9]`.
    ///
    /// # Errors
    ///
    /// If `row` or `column` is not in the range `[0, 8]`. In that case,
    /// `SudokuError::OutOfRange` is returned.
    pub fn has_digit(&self, row: usize, column: usize, digit: u8)
            -> SudokuResult<bool> {
        Ok(digit != 0 && self.get(row, column)? == digit)
    }

    /// Sets the cell at the specified position to the given digit,
    /// overwriting any previous value. For the pure counterpart that leaves
    /// this grid untouched, see [Grid::place].
    ///
    /// # Errors
    ///
    /// * `SudokuError::OutOfRange` if `row` or `column` is not in the range
    /// `[0, 8]` or `digit` is not in the range `[1, 9]`.
    pub fn set(&mut self, row: usize, column: usize, digit: u8)
            -> SudokuResult<()> {
        if row >= SIZE || column >= SIZE || digit == 0 || digit > 9 {
            return Err(SudokuError::OutOfRange);
        }

        self.cells[index(row, column)] = digit;
        Ok(())
    }

    /// Clears the cell at the specified position, that is, sets it to 0. If
    /// the cell is already empty, it is left that way.
    ///
    /// # Errors
    ///
    /// If `row` or `column` is not in the range `[0, 8]`. In that case,
    /// `SudokuError::OutOfRange` is returned.
    pub fn clear(&mut self, row: usize, column: usize) -> SudokuResult<()> {
        if row >= SIZE || column >= SIZE {
            return Err(SudokuError::OutOfRange);
        }

        self.cells[index(row, column)] = 0;
        Ok(())
    }

    /// Returns a new grid equal to this one except that the cell at
    /// (`row`, `column`) is set to `digit`, where 0 clears the cell. This
    /// grid is never mutated, so speculative checks ("what would the grid
    /// look like without this cell?") can be performed without disturbing
    /// the displayed state.
    ///
    /// # Errors
    ///
    /// If `row` or `column` is not in the range `[0, 8]` or `digit` is not
    /// in the range `[0, 9]`. In that case, `SudokuError::OutOfRange` is
    /// returned and no grid is produced.
    pub fn place(&self, row: usize, column: usize, digit: u8)
            -> SudokuResult<Grid> {
        if row >= SIZE || column >= SIZE || digit > 9 {
            return Err(SudokuError::OutOfRange);
        }

        let mut result = self.clone();
        result.cells[index(row, column)] = digit;
        Ok(result)
    }

    /// The values of the cells in the given row, left to right.
    ///
    /// # Panics
    ///
    /// If `row` is not in the range `[0, 8]`.
    pub fn row_values(&self, row: usize) -> [u8; SIZE] {
        let mut values = [0; SIZE];

        for (column, value) in values.iter_mut().enumerate() {
            *value = self.cells[index(row, column)];
        }

        values
    }

    /// The values of the cells in the given column, top to bottom.
    ///
    /// # Panics
    ///
    /// If `column` is not in the range `[0, 8]`.
    pub fn column_values(&self, column: usize) -> [u8; SIZE] {
        let mut values = [0; SIZE];

        for (row, value) in values.iter_mut().enumerate() {
            *value = self.cells[index(row, column)];
        }

        values
    }

    /// The values of the cells in the block with the given block
    /// coordinates, both in `[0, 2]`, in row-major order within the block.
    ///
    /// # Panics
    ///
    /// If `block_row` or `block_column` is not in the range `[0, 2]`.
    pub fn block_values(&self, block_row: usize, block_column: usize)
            -> [u8; SIZE] {
        assert!(block_row < BLOCK_SIZE && block_column < BLOCK_SIZE);

        let mut values = [0; SIZE];
        let start_row = block_row * BLOCK_SIZE;
        let start_column = block_column * BLOCK_SIZE;

        for sub_row in 0..BLOCK_SIZE {
            for sub_column in 0..BLOCK_SIZE {
                values[sub_row * BLOCK_SIZE + sub_column] = self.cells[
                    index(start_row + sub_row, start_column + sub_column)];
            }
        }

        values
    }

    /// Indicates whether the given digit does *not* already occur in the
    /// given row. Checks are only meaningful for digits 1 to 9; digit 0 is
    /// never present, so this returns `true` for it.
    ///
    /// # Panics
    ///
    /// If `row` is not in the range `[0, 8]`.
    pub fn row_valid(&self, row: usize, digit: u8) -> bool {
        digit == 0 || !self.row_values(row).contains(&digit)
    }

    /// Indicates whether this grid is complete, that is, no cell is empty.
    /// Note this says nothing about validity; see [Grid::is_board_valid].
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(|&c| c != 0)
    }

    /// Indicates whether no cell of this grid is filled.
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&c| c == 0)
    }

    /// Counts the number of clues given by this grid, that is, the number of
    /// non-empty cells.
    pub fn count_clues(&self) -> usize {
        self.cells.iter().filter(|&&c| c != 0).count()
    }

    /// Counts the number of empty cells of this grid.
    pub fn count_empty(&self) -> usize {
        CELL_COUNT - self.count_clues()
    }

    /// Indicates whether no Sudoku constraint is currently violated, that
    /// is, the non-zero values of every row, every column, and every block
    /// are pairwise distinct. Fullness is *not* required: an empty grid is
    /// valid, and a complete grid is valid if and only if every row, column,
    /// and block is a permutation of 1 to 9.
    pub fn is_board_valid(&self) -> bool {
        for i in 0..SIZE {
            if !no_duplicates(&self.row_values(i)) ||
                    !no_duplicates(&self.column_values(i)) {
                return false;
            }
        }

        for block_row in 0..BLOCK_SIZE {
            for block_column in 0..BLOCK_SIZE {
                if !no_duplicates(&self.block_values(block_row,
                        block_column)) {
                    return false;
                }
            }
        }

        true
    }

    /// Gets a reference to the array which holds the cells. They are in
    /// left-to-right, top-to-bottom order, where rows are together.
    pub fn cells(&self) -> &[u8; CELL_COUNT] {
        &self.cells
    }
}

// Grids travel as their parse code, so serialized data is subject to the
// same digit-range checks as any other input.
impl Serialize for Grid {
    fn serialize<S: Serializer>(&self, serializer: S)
            -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_parseable_string())
    }
}

impl<'de> Deserialize<'de> for Grid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D)
            -> Result<Grid, D::Error> {
        let code = String::deserialize(deserializer)?;
        Grid::parse(&code).map_err(DeserializeError::custom)
    }
}

fn no_duplicates(values: &[u8; SIZE]) -> bool {
    let mut seen = util::DigitSet::new();

    for &value in values {
        if value != 0 && !seen.insert(value) {
            return false;
        }
    }

    true
}

/// Indicates whether the nine given values are exactly the set {1, ..., 9}:
/// no repeats and no zero. Used to validate a row, column, or block as a
/// finished unit.
pub fn is_group_valid(values: &[u8; SIZE]) -> bool {
    values.iter().copied().collect::<util::DigitSet>().is_full()
}

/// Converts an on-screen pointer position into grid coordinates. The pointer
/// coordinates are integer-divided relative to the board's on-screen offset;
/// the cell index pair is returned only if both indices land in `[0, 8]`,
/// otherwise the click was outside the grid and `None` is returned.
///
/// `cell_size` is the on-screen size of one cell in pixels and must be
/// positive.
pub fn screen_to_cell(pointer_x: i32, pointer_y: i32, offset_x: i32,
        offset_y: i32, cell_size: i32) -> Option<(usize, usize)> {
    // Euclidean division so that positions left of or above the offset map
    // to negative indices instead of truncating into column/row 0.
    let column = (pointer_x - offset_x).div_euclid(cell_size);
    let row = (pointer_y - offset_y).div_euclid(cell_size);

    if (0..SIZE as i32).contains(&row) && (0..SIZE as i32).contains(&column) {
        Some((row as usize, column as usize))
    }
    else {
        None
    }
}

/// The difficulty tier of a generated puzzle. Each tier maps to a closed
/// range of cells removed from the complete grid by the
/// [Carver](generator::Carver): more removed cells make a harder puzzle.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Difficulty {

    /// 35 to 40 cells removed.
    Easy,

    /// 45 to 50 cells removed. This is the default tier.
    Medium,

    /// 55 to 60 cells removed.
    Hard
}

impl Default for Difficulty {
    fn default() -> Difficulty {
        Difficulty::Medium
    }
}

impl Difficulty {

    /// The closed range of how many cells the carver removes for this tier.
    pub fn removal_range(self) -> RangeInclusive<usize> {
        match self {
            Difficulty::Easy => 35..=40,
            Difficulty::Medium => 45..=50,
            Difficulty::Hard => 55..=60
        }
    }

    /// Resolves a tier by name: `"easy"`, `"medium"`, or `"hard"`, matched
    /// case-insensitively. Unrecognized names fall back to
    /// [Difficulty::Medium].
    pub fn from_name(name: &str) -> Difficulty {
        match name.to_ascii_lowercase().as_str() {
            "easy" => Difficulty::Easy,
            "hard" => Difficulty::Hard,
            _ => Difficulty::Medium
        }
    }
}

impl Display for Difficulty {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard")
        }
    }
}
