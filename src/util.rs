//! This module contains utility functionality needed for this crate. Most
//! prominently, it contains the definition of the [DigitSet] used to track
//! which digits occur in a row, column, or block.

/// A set of Sudoku digits (1 to 9) implemented as a bit mask. One bit per
/// digit, so membership tests and insertions are constant-time and the set
/// never allocates.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct DigitSet {
    mask: u16
}

impl DigitSet {

    /// Creates a new, empty digit set.
    pub fn new() -> DigitSet {
        DigitSet {
            mask: 0
        }
    }

    /// Creates a digit set containing all digits 1 to 9.
    pub fn full() -> DigitSet {
        DigitSet {
            mask: 0b11_1111_1110
        }
    }

    /// Indicates whether the given digit is contained in this set. Values
    /// outside `[1, 9]`, including 0, are never contained.
    pub fn contains(&self, digit: u8) -> bool {
        (1..=9).contains(&digit) && (self.mask >> digit) & 1 == 1
    }

    /// Inserts the given digit into this set. Returns `true` if the digit was
    /// not present before, analogously to the standard library sets. Values
    /// outside `[1, 9]` are ignored and yield `false`.
    pub fn insert(&mut self, digit: u8) -> bool {
        if !(1..=9).contains(&digit) {
            return false;
        }

        let bit = 1u16 << digit;
        let inserted = self.mask & bit == 0;
        self.mask |= bit;
        inserted
    }

    /// Removes the given digit from this set. Returns `true` if it was
    /// present.
    pub fn remove(&mut self, digit: u8) -> bool {
        if !(1..=9).contains(&digit) {
            return false;
        }

        let bit = 1u16 << digit;
        let removed = self.mask & bit != 0;
        self.mask &= !bit;
        removed
    }

    /// Removes all digits from this set.
    pub fn clear(&mut self) {
        self.mask = 0;
    }

    /// The number of digits contained in this set.
    pub fn len(&self) -> usize {
        self.mask.count_ones() as usize
    }

    /// Indicates whether this set contains no digits.
    pub fn is_empty(&self) -> bool {
        self.mask == 0
    }

    /// Indicates whether this set contains every digit from 1 to 9.
    pub fn is_full(&self) -> bool {
        *self == DigitSet::full()
    }

    /// An iterator over the digits in this set, in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        let mask = self.mask;
        (1u8..=9).filter(move |&d| (mask >> d) & 1 == 1)
    }
}

impl FromIterator<u8> for DigitSet {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> DigitSet {
        let mut set = DigitSet::new();

        for digit in iter {
            set.insert(digit);
        }

        set
    }
}
