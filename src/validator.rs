//! This module decides whether a digit may be placed at a coordinate without
//! violating row, column, or 3x3-block uniqueness.
//!
//! There are two interchangeable implementations of the [Validator] trait:
//! [ScanValidator] scans the nine row cells, nine column cells, and nine
//! block cells directly, while [RuleValidator] conjoins three independent
//! declarative predicates ("not in row", "not in column", "not in block"),
//! each a [PlacementRule]. The two form one contract with two
//! implementations, not a primary/fallback pair: any divergence between them
//! is a defect. [CrossCheckValidator] runs both and asserts agreement.
//!
//! The scan path is self-contained and is the one used by default throughout
//! the crate; nothing depends on the rule formulation being present.

use crate::{BLOCK_SIZE, Grid, SIZE};

/// Determines whether placing a digit at a coordinate violates row, column,
/// or block uniqueness. Implementations must agree bit-for-bit on every
/// input.
pub trait Validator {

    /// Indicates whether `digit` can be placed at (`row`, `column`) in
    /// `grid` without that digit already appearing in the same row, the same
    /// column, or the containing 3x3 block. The cell itself may currently
    /// hold any value; it is not excluded from the scan, so callers checking
    /// a *replacement* should clear the cell first (see [Grid::place]).
    ///
    /// Coordinates outside `[0, 8]` or digits outside `[1, 9]` are not
    /// meaningful here; callers validate their inputs beforehand.
    fn can_place(&self, grid: &Grid, row: usize, column: usize, digit: u8)
        -> bool;
}

/// A [Validator] that scans the row, column, and block cell-by-cell. This is
/// the binding implementation: it has no dependencies and is usable
/// standalone.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScanValidator;

impl Validator for ScanValidator {
    fn can_place(&self, grid: &Grid, row: usize, column: usize, digit: u8)
            -> bool {
        for i in 0..SIZE {
            if grid.has_digit(row, i, digit).unwrap() ||
                    grid.has_digit(i, column, digit).unwrap() {
                return false;
            }
        }

        let block_row = (row / BLOCK_SIZE) * BLOCK_SIZE;
        let block_column = (column / BLOCK_SIZE) * BLOCK_SIZE;

        for r in block_row..(block_row + BLOCK_SIZE) {
            for c in block_column..(block_column + BLOCK_SIZE) {
                if grid.has_digit(r, c, digit).unwrap() {
                    return false;
                }
            }
        }

        true
    }
}

/// One declarative placement predicate. Each rule checks a single kind of
/// constraint; a placement is admitted overall if every rule admits it.
pub trait PlacementRule {

    /// Indicates whether this rule admits placing `digit` at
    /// (`row`, `column`) in `grid`.
    fn admits(&self, grid: &Grid, row: usize, column: usize, digit: u8)
        -> bool;
}

/// The predicate that the digit does not already occur in the row.
#[derive(Clone, Copy, Debug)]
pub struct RowRule;

impl PlacementRule for RowRule {
    fn admits(&self, grid: &Grid, row: usize, _column: usize, digit: u8)
            -> bool {
        !grid.row_values(row).contains(&digit)
    }
}

/// The predicate that the digit does not already occur in the column.
#[derive(Clone, Copy, Debug)]
pub struct ColumnRule;

impl PlacementRule for ColumnRule {
    fn admits(&self, grid: &Grid, _row: usize, column: usize, digit: u8)
            -> bool {
        !grid.column_values(column).contains(&digit)
    }
}

/// The predicate that the digit does not already occur in the containing
/// 3x3 block.
#[derive(Clone, Copy, Debug)]
pub struct BlockRule;

impl PlacementRule for BlockRule {
    fn admits(&self, grid: &Grid, row: usize, column: usize, digit: u8)
            -> bool {
        !grid.block_values(row / BLOCK_SIZE, column / BLOCK_SIZE)
            .contains(&digit)
    }
}

/// A [Validator] expressed as the conjunction of the three declarative
/// [PlacementRule]s: [RowRule], [ColumnRule], and [BlockRule].
#[derive(Clone, Copy, Debug, Default)]
pub struct RuleValidator;

impl RuleValidator {

    /// The rules conjoined by this validator.
    pub fn rules() -> [&'static dyn PlacementRule; 3] {
        [&RowRule, &ColumnRule, &BlockRule]
    }
}

impl Validator for RuleValidator {
    fn can_place(&self, grid: &Grid, row: usize, column: usize, digit: u8)
            -> bool {
        RuleValidator::rules().iter()
            .all(|rule| rule.admits(grid, row, column, digit))
    }
}

/// A [Validator] that runs two validators on every query and asserts that
/// they agree. A disagreement is a latent defect in one of the two, so it
/// must never be resolved silently by picking a winner; in debug builds it
/// aborts the process via `debug_assert`, in release builds the first
/// validator's verdict is answered.
#[derive(Clone, Copy, Debug, Default)]
pub struct CrossCheckValidator<A: Validator, B: Validator> {
    first: A,
    second: B
}

impl CrossCheckValidator<ScanValidator, RuleValidator> {

    /// Creates a cross-checking validator over the two implementations
    /// shipped with this crate.
    pub fn new_default()
            -> CrossCheckValidator<ScanValidator, RuleValidator> {
        CrossCheckValidator::new(ScanValidator, RuleValidator)
    }
}

impl<A: Validator, B: Validator> CrossCheckValidator<A, B> {

    /// Creates a cross-checking validator over the two given validators.
    pub fn new(first: A, second: B) -> CrossCheckValidator<A, B> {
        CrossCheckValidator {
            first,
            second
        }
    }
}

impl<A: Validator, B: Validator> Validator for CrossCheckValidator<A, B> {
    fn can_place(&self, grid: &Grid, row: usize, column: usize, digit: u8)
            -> bool {
        let first = self.first.can_place(grid, row, column, digit);
        let second = self.second.can_place(grid, row, column, digit);

        debug_assert_eq!(first, second,
            "validators disagree at ({}, {}) for digit {}", row, column,
            digit);

        first
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    fn partial_grid() -> Grid {
        Grid::parse("\
            5,3, , ,7, , , , ,\
            6, , ,1,9,5, , , ,\
             ,9,8, , , , ,6, ,\
            8, , , ,6, , , ,3,\
            4, , ,8, ,3, , ,1,\
            7, , , ,2, , , ,6,\
             ,6, , , , ,2,8, ,\
             , , ,4,1,9, , ,5,\
             , , , ,8, , ,7,9").unwrap()
    }

    #[test]
    fn scan_rejects_row_duplicate() {
        let grid = partial_grid();

        // 7 already occurs in row 0 (at column 4).
        assert!(!ScanValidator.can_place(&grid, 0, 2, 7));
    }

    #[test]
    fn scan_rejects_column_duplicate() {
        let grid = partial_grid();

        // 4 already occurs in column 0 (at row 4).
        assert!(!ScanValidator.can_place(&grid, 2, 0, 4));
    }

    #[test]
    fn scan_rejects_block_duplicate() {
        let grid = partial_grid();

        // 8 occurs in the top-left block at (2, 2), but neither in row 1 nor
        // in column 1.
        assert!(!ScanValidator.can_place(&grid, 1, 1, 8));
    }

    #[test]
    fn scan_accepts_legal_placement() {
        let grid = partial_grid();

        // (0, 2) = 4 conflicts with nothing.
        assert!(ScanValidator.can_place(&grid, 0, 2, 4));
    }

    #[test]
    fn single_rules_check_only_their_unit() {
        let grid = partial_grid();

        // 4 at (2, 0): fine for the row, a duplicate in the column.
        assert!(RowRule.admits(&grid, 2, 0, 4));
        assert!(!ColumnRule.admits(&grid, 2, 0, 4));

        // 8 at (1, 1): fine for row and column, a duplicate in the block.
        assert!(RowRule.admits(&grid, 1, 1, 8));
        assert!(ColumnRule.admits(&grid, 1, 1, 8));
        assert!(!BlockRule.admits(&grid, 1, 1, 8));
    }

    #[test]
    fn validators_agree_on_swept_digits() {
        let grid = partial_grid();

        // (0, 2) is empty; sweep every digit through it.
        for digit in 1..=9 {
            assert_eq!(
                ScanValidator.can_place(&grid, 0, 2, digit),
                RuleValidator.can_place(&grid, 0, 2, digit),
                "validators disagree for digit {}", digit);
        }
    }

    #[test]
    fn validators_agree_on_every_empty_cell() {
        let grid = partial_grid();

        for row in 0..SIZE {
            for column in 0..SIZE {
                if grid.get(row, column).unwrap() != 0 {
                    continue;
                }

                for digit in 1..=9 {
                    assert_eq!(
                        ScanValidator.can_place(&grid, row, column, digit),
                        RuleValidator.can_place(&grid, row, column, digit),
                        "validators disagree at ({}, {}) for digit {}",
                        row, column, digit);
                }
            }
        }
    }

    #[test]
    fn cross_check_answers_like_the_scan() {
        let grid = partial_grid();
        let validator = CrossCheckValidator::new_default();

        assert!(validator.can_place(&grid, 0, 2, 4));
        assert!(!validator.can_place(&grid, 0, 2, 7));
    }
}
