//! This module contains the state machine for one game of Sudoku.
//!
//! A [GameSession] owns everything one running game needs: the carved
//! puzzle, its solution, the player's working grid, the fixed-cell mask, the
//! display-only error mask, and the error and hint counters. There is no
//! module-level state; every player action is a method on the session, and
//! the working grid is *replaced* by a new grid on every accepted move
//! rather than mutated in place, so earlier references remain valid
//! snapshots.

use crate::{CELL_COUNT, Difficulty, Grid, index, SIZE};
use crate::error::{SudokuError, SudokuResult};
use crate::generator::{self, GeneratedSudoku};
use crate::solver::{BacktrackingSolver, Solver};
use crate::validator::{ScanValidator, Validator};

use rand::Rng;
use rand::rngs::ThreadRng;

/// The number of conflicting moves after which the game is lost.
pub const MAX_ERRORS: u32 = 3;

const BASE_SCORE: f64 = 10000.0;

/// The result of entering a digit through [GameSession::enter_digit].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MoveOutcome {

    /// The move was applied and violates no Sudoku constraint. Erasing a
    /// cell always yields this outcome.
    Applied,

    /// The move was applied, but the digit conflicts with its row, column,
    /// or block. The cell is flagged in the error mask and the error counter
    /// was incremented.
    Conflict,

    /// The addressed cell is one of the original clues and must never be
    /// overwritten. Nothing changed.
    FixedCell
}

/// The state of one running game. See the module documentation.
pub struct GameSession<V: Validator, R: Rng> {
    validator: V,
    rng: R,
    difficulty: Difficulty,
    puzzle: Grid,
    solution: Grid,
    current: Grid,
    fixed: [bool; CELL_COUNT],
    errors: [bool; CELL_COUNT],
    error_count: u32,
    hint_count: u32
}

impl GameSession<ScanValidator, ThreadRng> {

    /// Starts a new game of the given difficulty: generates a fresh
    /// puzzle/solution pair and wraps it in a session with a
    /// [ScanValidator] and a thread-local RNG.
    ///
    /// # Errors
    ///
    /// * `SudokuError::Unsatisfiable` if puzzle generation fails. No session
    /// is created in that case.
    pub fn new(difficulty: Difficulty)
            -> SudokuResult<GameSession<ScanValidator, ThreadRng>> {
        let generated = generator::generate(difficulty)?;
        Ok(GameSession::with_parts(ScanValidator, rand::thread_rng(),
            generated, difficulty))
    }
}

impl<V: Validator, R: Rng> GameSession<V, R> {

    /// Creates a session over an already generated game, with the given
    /// validator and random number generator. The fixed-cell mask is a
    /// snapshot of the puzzle's non-empty cells, taken now and never
    /// updated.
    pub fn with_parts(validator: V, rng: R, generated: GeneratedSudoku,
            difficulty: Difficulty) -> GameSession<V, R> {
        let GeneratedSudoku { puzzle, solution } = generated;
        let mut fixed = [false; CELL_COUNT];

        for (i, &cell) in puzzle.cells().iter().enumerate() {
            fixed[i] = cell != 0;
        }

        GameSession {
            validator,
            rng,
            difficulty,
            current: puzzle.clone(),
            puzzle,
            solution,
            fixed,
            errors: [false; CELL_COUNT],
            error_count: 0,
            hint_count: 0
        }
    }

    /// The difficulty this game was generated with.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// The working grid as the player currently sees it.
    pub fn current(&self) -> &Grid {
        &self.current
    }

    /// The carved puzzle this game started from.
    pub fn puzzle(&self) -> &Grid {
        &self.puzzle
    }

    /// The solution paired with the puzzle.
    pub fn solution(&self) -> &Grid {
        &self.solution
    }

    /// The number of conflicting moves made so far.
    pub fn error_count(&self) -> u32 {
        self.error_count
    }

    /// The number of hints taken so far.
    pub fn hint_count(&self) -> u32 {
        self.hint_count
    }

    /// Indicates whether the cell at the given position is one of the
    /// original clues, which the player must not overwrite.
    ///
    /// # Errors
    ///
    /// If `row` or `column` is not in the range `[0, 8]`. In that case,
    /// `SudokuError::OutOfRange` is returned.
    pub fn is_fixed(&self, row: usize, column: usize) -> SudokuResult<bool> {
        if row >= SIZE || column >= SIZE {
            return Err(SudokuError::OutOfRange);
        }

        Ok(self.fixed[index(row, column)])
    }

    /// Indicates whether the cell at the given position is currently flagged
    /// as conflicting. This mask exists for display only; it is recomputed
    /// per move and plays no part in solving.
    ///
    /// # Errors
    ///
    /// If `row` or `column` is not in the range `[0, 8]`. In that case,
    /// `SudokuError::OutOfRange` is returned.
    pub fn is_flagged(&self, row: usize, column: usize) -> SudokuResult<bool> {
        if row >= SIZE || column >= SIZE {
            return Err(SudokuError::OutOfRange);
        }

        Ok(self.errors[index(row, column)])
    }

    /// Enters a digit at the given position, where digit 0 erases the cell.
    /// Fixed cells are refused. A digit that conflicts with its row, column,
    /// or block is still placed (the player sees their mistake on the
    /// board), but the cell is flagged and the error counter incremented;
    /// erasing is never counted as an error.
    ///
    /// The conflict check is performed against the working grid with the
    /// target cell cleared, so that overwriting a digit with itself is not
    /// reported as a self-conflict.
    ///
    /// # Errors
    ///
    /// If `row` or `column` is not in the range `[0, 8]` or `digit` is not
    /// in the range `[0, 9]`. In that case, `SudokuError::OutOfRange` is
    /// returned and the session is unchanged.
    pub fn enter_digit(&mut self, row: usize, column: usize, digit: u8)
            -> SudokuResult<MoveOutcome> {
        if row >= SIZE || column >= SIZE || digit > 9 {
            return Err(SudokuError::OutOfRange);
        }

        if self.fixed[index(row, column)] {
            return Ok(MoveOutcome::FixedCell);
        }

        // Speculatively clear the target cell so the check does not see the
        // value being replaced.
        let without_cell = self.current.place(row, column, 0)?;
        let conflict = digit != 0 &&
            !self.validator.can_place(&without_cell, row, column, digit);

        self.current = self.current.place(row, column, digit)?;
        self.errors[index(row, column)] = conflict;

        if conflict {
            self.error_count += 1;
            Ok(MoveOutcome::Conflict)
        }
        else {
            Ok(MoveOutcome::Applied)
        }
    }

    /// Reveals the solution's digit in a uniformly random empty cell of the
    /// working grid, clears that cell's error flag, and counts the hint.
    /// Returns the revealed position and digit, or `None` if no cell is
    /// empty.
    pub fn hint(&mut self) -> Option<(usize, usize, u8)> {
        let empty: Vec<(usize, usize)> = (0..SIZE)
            .flat_map(|row| (0..SIZE).map(move |col| (row, col)))
            .filter(|&(row, col)|
                self.current.get(row, col).unwrap() == 0)
            .collect();

        if empty.is_empty() {
            return None;
        }

        let (row, column) = empty[self.rng.gen_range(0..empty.len())];
        let digit = self.solution.get(row, column).unwrap();

        self.current = self.current.place(row, column, digit).unwrap();
        self.errors[index(row, column)] = false;
        self.hint_count += 1;

        Some((row, column, digit))
    }

    /// Resets the working grid to the carved puzzle and clears the error
    /// mask and both counters. The puzzle and solution stay the same.
    pub fn restart(&mut self) {
        self.current = self.puzzle.clone();
        self.errors = [false; CELL_COUNT];
        self.error_count = 0;
        self.hint_count = 0;
    }

    /// Replaces the working grid with the fully solved grid and clears the
    /// error mask. The solution grid is already complete, so solving it is a
    /// no-op pass through the solver; this keeps the session honest in case
    /// the stored solution were ever inconsistent.
    ///
    /// # Errors
    ///
    /// * `SudokuError::Unsolvable` if the stored solution is contradictory,
    /// which indicates a defect in generation.
    pub fn reveal_solution(&mut self) -> SudokuResult<()> {
        self.current = BacktrackingSolver::new_default()
            .solve(&self.solution)?;
        self.errors = [false; CELL_COUNT];
        Ok(())
    }

    /// Indicates whether the game is lost, that is, the player has made
    /// [MAX_ERRORS] conflicting moves.
    pub fn is_lost(&self) -> bool {
        self.error_count >= MAX_ERRORS
    }

    /// Indicates whether the game is won: the working grid is complete and
    /// valid and the error limit was not reached.
    pub fn is_won(&self) -> bool {
        !self.is_lost() && self.current.is_complete() &&
            self.current.is_board_valid()
    }

    /// Computes the score for this session after `elapsed_seconds` of play:
    /// a base of 10000, minus 2 per second, 100 per error, and 200 per hint,
    /// floored at 0.
    pub fn score(&self, elapsed_seconds: f64) -> u32 {
        let score = BASE_SCORE
            - elapsed_seconds * 2.0
            - f64::from(self.error_count) * 100.0
            - f64::from(self.hint_count) * 200.0;

        if score <= 0.0 {
            0
        }
        else {
            score as u32
        }
    }
}
