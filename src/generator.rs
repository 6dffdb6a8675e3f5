//! This module contains logic for generating random Sudoku puzzles.
//!
//! Generation is done in two steps: a [Generator] fills an empty grid by
//! randomized backtracking, yielding the *solution*, and a [Carver] removes
//! a difficulty-controlled number of cells from a copy of it, yielding the
//! *puzzle*. [generate] bundles both steps and is the entry point the
//! presentation layer calls to obtain a new game.

use crate::{Difficulty, Grid, SIZE};
use crate::error::{SudokuError, SudokuResult};
use crate::validator::{ScanValidator, Validator};

use rand::Rng;
use rand::rngs::ThreadRng;

pub(crate) fn shuffle<T>(rng: &mut impl Rng, values: impl Iterator<Item = T>)
        -> Vec<T> {
    let mut vec: Vec<T> = values.collect();
    let len = vec.len();

    for i in 0..(len - 1) {
        let j = rng.gen_range(i..len);
        vec.swap(i, j);
    }

    vec
}

/// A generator produces a complete, valid [Grid], that is, a grid with no
/// empty cell in which every row, column, and block is a permutation of 1 to
/// 9. It owns the grid exclusively while filling it; the finished grid is
/// handed off as an immutable solution.
///
/// The generator is configured with a [Validator] that is consulted at every
/// tentative placement and a random number generator that decides the
/// candidate order. For most cases, sensible defaults are provided by
/// [Generator::new_default].
pub struct Generator<V: Validator, R: Rng> {
    validator: V,
    rng: R
}

impl Generator<ScanValidator, ThreadRng> {

    /// Creates a new generator that validates placements with a
    /// [ScanValidator] and draws candidate digits from a thread-local RNG.
    pub fn new_default() -> Generator<ScanValidator, ThreadRng> {
        Generator::new(ScanValidator, rand::thread_rng())
    }
}

impl<V: Validator, R: Rng> Generator<V, R> {

    /// Creates a new generator with the given validator and random number
    /// generator.
    pub fn new(validator: V, rng: R) -> Generator<V, R> {
        Generator {
            validator,
            rng
        }
    }

    fn fill_rec(&mut self, grid: &mut Grid, row: usize, column: usize)
            -> bool {
        // Row index 9 means every cell up to and past (8, 8) is assigned.
        if row == SIZE {
            return true;
        }

        let next_column = (column + 1) % SIZE;
        let next_row = if next_column == 0 { row + 1 } else { row };

        if grid.get(row, column).unwrap() != 0 {
            return self.fill_rec(grid, next_row, next_column);
        }

        for digit in shuffle(&mut self.rng, 1..=9) {
            if self.validator.can_place(grid, row, column, digit) {
                grid.set(row, column, digit).unwrap();

                if self.fill_rec(grid, next_row, next_column) {
                    return true;
                }

                grid.clear(row, column).unwrap();
            }
        }

        false
    }

    /// Fills the empty cells of the given grid with random digits such that
    /// the result is complete and valid, keeping all digits already present.
    /// The candidate order at each cell is a fresh uniformly random
    /// permutation of 1 to 9, so the shape of the resulting grid is not
    /// biased towards any fixed order.
    ///
    /// # Errors
    ///
    /// * `SudokuError::Unsatisfiable` if no assignment of the empty cells
    /// completes the grid. The grid is left exactly as it was on entry; in
    /// particular, no partially filled state leaks out of failed branches.
    pub fn fill(&mut self, grid: &mut Grid) -> SudokuResult<()> {
        if self.fill_rec(grid, 0, 0) {
            Ok(())
        }
        else {
            Err(SudokuError::Unsatisfiable)
        }
    }

    /// Generates a new complete, valid grid from scratch.
    ///
    /// # Errors
    ///
    /// * `SudokuError::Unsatisfiable` if the backtracking search exhausts
    /// all possibilities. This cannot happen for the empty starting grid in
    /// practice, but the condition is surfaced rather than swallowed: a
    /// caller receiving it must not proceed to carve or display anything.
    pub fn generate_full(&mut self) -> SudokuResult<Grid> {
        let mut grid = Grid::new();
        self.fill(&mut grid)?;
        Ok(grid)
    }
}

/// A carver derives a puzzle from a complete grid by clearing a
/// difficulty-controlled number of cells. The input grid is never touched;
/// the puzzle is a new, independently-owned grid.
///
/// The carver guarantees the cleared-cell count, *not* that the resulting
/// puzzle has a unique solution. That is an accepted limitation of this
/// engine, not a bug.
pub struct Carver<R: Rng> {
    rng: R
}

impl Carver<ThreadRng> {

    /// Creates a new carver that decides which cells to clear using a
    /// thread-local RNG.
    pub fn new_default() -> Carver<ThreadRng> {
        Carver::new(rand::thread_rng())
    }
}

impl<R: Rng> Carver<R> {

    /// Creates a new carver with the given random number generator.
    pub fn new(rng: R) -> Carver<R> {
        Carver {
            rng
        }
    }

    /// Derives a puzzle from the given complete `solution`. The number of
    /// cleared cells is drawn uniformly from the difficulty tier's closed
    /// range; the cells themselves are the first entries of a uniformly
    /// shuffled enumeration of all 81 positions.
    pub fn carve(&mut self, solution: &Grid, difficulty: Difficulty) -> Grid {
        let range = difficulty.removal_range();
        let count = self.rng.gen_range(*range.start()..=*range.end());
        let positions = shuffle(&mut self.rng,
            (0..SIZE).flat_map(|row| (0..SIZE).map(move |col| (row, col))));
        let mut puzzle = solution.clone();

        for &(row, column) in positions.iter().take(count) {
            puzzle.clear(row, column).unwrap();
        }

        puzzle
    }
}

/// A freshly generated game: the puzzle presented to the player and its
/// paired solution. The solution is complete and valid; the puzzle agrees
/// with the solution on every non-empty cell.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GeneratedSudoku {

    /// The partially-filled grid the player starts from.
    pub puzzle: Grid,

    /// The complete grid the puzzle was carved from.
    pub solution: Grid
}

/// Generates a new game of the given difficulty using the default generator
/// and carver. This is the sole entry point the presentation layer needs for
/// a new game.
///
/// # Errors
///
/// * `SudokuError::Unsatisfiable` if grid generation fails (see
/// [Generator::generate_full]). No puzzle is carved in that case.
pub fn generate(difficulty: Difficulty) -> SudokuResult<GeneratedSudoku> {
    generate_with(&mut Generator::new_default(), &mut Carver::new_default(),
        difficulty)
}

/// Generates a new game of the given difficulty using the provided generator
/// and carver, for callers that need seeded or otherwise customized
/// randomness.
///
/// # Errors
///
/// * `SudokuError::Unsatisfiable` if grid generation fails.
pub fn generate_with<V, R1, R2>(generator: &mut Generator<V, R1>,
    carver: &mut Carver<R2>, difficulty: Difficulty)
    -> SudokuResult<GeneratedSudoku>
where
    V: Validator,
    R1: Rng,
    R2: Rng
{
    let solution = generator.generate_full()?;
    let puzzle = carver.carve(&solution, difficulty);

    Ok(GeneratedSudoku {
        puzzle,
        solution
    })
}

#[cfg(test)]
mod tests {

    use super::*;

    use crate::is_group_valid;
    use crate::validator::{CrossCheckValidator, RuleValidator};

    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn seeded_generator(seed: u64)
            -> Generator<ScanValidator, ChaCha8Rng> {
        Generator::new(ScanValidator, ChaCha8Rng::seed_from_u64(seed))
    }

    fn assert_fully_valid(grid: &Grid) {
        assert!(grid.is_complete());

        for i in 0..SIZE {
            assert!(is_group_valid(&grid.row_values(i)),
                "row {} is not a permutation of 1-9", i);
            assert!(is_group_valid(&grid.column_values(i)),
                "column {} is not a permutation of 1-9", i);
        }

        for block_row in 0..3 {
            for block_column in 0..3 {
                assert!(is_group_valid(
                    &grid.block_values(block_row, block_column)),
                    "block ({}, {}) is not a permutation of 1-9",
                    block_row, block_column);
            }
        }
    }

    #[test]
    fn shuffling_uniformly_distributed() {
        // 18000 experiments, 6 options (3!), so if uniformly distributed:
        // p = 1/6, my = 3000, sigma = sqrt(18000 * 1/6 * 5/6) = 50
        // with a probability of the amount being in the range [2600, 3400]
        // is more than 99,9999999999999 %.

        let mut counts = [0; 6];
        let mut rng = ChaCha8Rng::seed_from_u64(18);

        for _ in 0..18000 {
            let result = shuffle(&mut rng, 1..=3);

            match result.as_slice() {
                [1, 2, 3] => counts[0] += 1,
                [1, 3, 2] => counts[1] += 1,
                [2, 1, 3] => counts[2] += 1,
                [2, 3, 1] => counts[3] += 1,
                [3, 1, 2] => counts[4] += 1,
                [3, 2, 1] => counts[5] += 1,
                _ => panic!("shuffle invented or dropped elements")
            }
        }

        for count in counts.iter() {
            assert!(*count >= 2600 && *count <= 3400,
                "Count is not in range [2600, 3400].");
        }
    }

    #[test]
    fn generated_grid_is_complete_and_valid() {
        let grid = seeded_generator(1).generate_full().unwrap();
        assert_fully_valid(&grid);
    }

    #[test]
    fn filled_grid_keeps_given_digits() {
        let mut grid = Grid::new();
        grid.set(0, 1, 1).unwrap();
        grid.set(0, 3, 3).unwrap();
        grid.set(1, 0, 2).unwrap();
        grid.set(2, 4, 4).unwrap();

        seeded_generator(2).fill(&mut grid).unwrap();

        assert_fully_valid(&grid);
        assert_eq!(1, grid.get(0, 1).unwrap());
        assert_eq!(3, grid.get(0, 3).unwrap());
        assert_eq!(2, grid.get(1, 0).unwrap());
        assert_eq!(4, grid.get(2, 4).unwrap());
    }

    #[test]
    fn unsatisfiable_grid_is_not_changed() {
        // The top-left block already holds 1-8, and the remaining block cell
        // (2, 2) sees a 9 in its row, so no digit fits there.
        let mut grid = Grid::parse("\
            1,2,3, , , , , , ,\
            4,5,6, , , , , , ,\
            7,8, , , ,9, , , ,\
             , , , , , , , , ,\
             , , , , , , , , ,\
             , , , , , , , , ,\
             , , , , , , , , ,\
             , , , , , , , , ,\
             , , , , , , , , ").unwrap();
        let before = grid.clone();
        let result = seeded_generator(3).fill(&mut grid);

        assert_eq!(Err(SudokuError::Unsatisfiable), result);
        assert_eq!(before, grid);
    }

    #[test]
    fn generation_works_with_the_rule_validator() {
        let mut generator = Generator::new(
            CrossCheckValidator::new(ScanValidator, RuleValidator),
            ChaCha8Rng::seed_from_u64(4));
        let grid = generator.generate_full().unwrap();
        assert_fully_valid(&grid);
    }

    #[test]
    fn carve_clears_within_range_and_keeps_solution_untouched() {
        for (seed, difficulty) in
                [(5, Difficulty::Easy), (6, Difficulty::Medium),
                 (7, Difficulty::Hard)] {
            let solution = seeded_generator(seed).generate_full().unwrap();
            let before = solution.clone();
            let mut carver = Carver::new(ChaCha8Rng::seed_from_u64(seed));
            let puzzle = carver.carve(&solution, difficulty);
            let range = difficulty.removal_range();

            assert_eq!(before, solution);
            assert!(range.contains(&puzzle.count_empty()),
                "{} empty cells outside {:?} for {}", puzzle.count_empty(),
                range, difficulty);
        }
    }

    #[test]
    fn puzzle_agrees_with_solution_on_clues() {
        let mut generator = seeded_generator(8);
        let mut carver = Carver::new(ChaCha8Rng::seed_from_u64(8));
        let generated = generate_with(&mut generator, &mut carver,
            Difficulty::Medium).unwrap();

        for row in 0..SIZE {
            for column in 0..SIZE {
                let clue = generated.puzzle.get(row, column).unwrap();

                if clue != 0 {
                    assert_eq!(
                        generated.solution.get(row, column).unwrap(), clue,
                        "puzzle disagrees with solution at ({}, {})",
                        row, column);
                }
            }
        }
    }

    #[test]
    fn generate_yields_valid_pair_for_every_tier() {
        for difficulty in
                [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            let generated = generate(difficulty).unwrap();

            assert_fully_valid(&generated.solution);
            assert!(difficulty.removal_range()
                .contains(&generated.puzzle.count_empty()));
        }
    }

    #[test]
    fn unknown_tier_name_behaves_as_medium() {
        let difficulty = Difficulty::from_name("nightmare");
        let generated = generate(difficulty).unwrap();

        assert!(Difficulty::Medium.removal_range()
            .contains(&generated.puzzle.count_empty()));
    }
}
